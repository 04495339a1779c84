//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::dto::WishlistListResponse;
use super::handlers::{system, wishlist};
use crate::domain::{NewWishlistItem, WishlistId, WishlistItem};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI description, served at `/api-docs/openapi.json`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Wishlist Service",
        description = "E-commerce platform wishlist microservice"
    ),
    paths(
        wishlist::create_wishlist_item,
        wishlist::list_user_wishlist,
        wishlist::delete_wishlist_item,
        wishlist::delete_wishlist_item_by_user_product,
        system::health_handler,
        system::root_handler,
    ),
    components(schemas(
        WishlistItem,
        WishlistId,
        NewWishlistItem,
        WishlistListResponse,
        ErrorResponse,
        ErrorBody,
        system::HealthResponse,
        system::RootResponse,
    )),
    tags(
        (name = "Wishlist", description = "Per-user wishlist management"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;
