//! Wishlist handlers: create, list by user, delete by id, delete by pair.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CreateWishlistRequest, PaginationParams, WishlistListResponse, validate_create_request,
};
use crate::app_state::AppState;
use crate::domain::{WishlistId, WishlistItem};
use crate::error::{ErrorResponse, ServiceError};

/// `POST /wishlist/`: Add a product variation to a user's wishlist.
///
/// Returns `201 Created` with the stored item, also when the pair was
/// already wishlisted and the existing item is returned unchanged.
///
/// # Errors
///
/// Returns [`ServiceError`] on validation, store or publish failure.
#[utoipa::path(
    post,
    path = "/api/v1/wishlist/",
    tag = "Wishlist",
    summary = "Add a wishlist item",
    description = "Adds a product variation to a user's wishlist. Idempotent on (user_id, product_variation_id): an existing item is returned unchanged. Publishes `wishlist.created` either way.",
    request_body = CreateWishlistRequest,
    responses(
        (status = 201, description = "Item stored (or already present)", body = WishlistItem),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
    )
)]
pub async fn create_wishlist_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateWishlistRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(req) = payload?;
    validate_create_request(&req)?;
    let item = state.wishlist_service.create_item(&req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// `GET /wishlist/user/{user_id}`: List a user's wishlist, newest first.
///
/// # Errors
///
/// Returns [`ServiceError::Validation`] on out-of-range pagination.
#[utoipa::path(
    get,
    path = "/api/v1/wishlist/user/{user_id}",
    tag = "Wishlist",
    summary = "List a user's wishlist",
    description = "Returns one page of the user's items ordered by creation time, newest first. `total` counts the returned page only.",
    params(
        ("user_id" = i64, Path, description = "Owning user id"),
        PaginationParams,
    ),
    responses(
        (status = 200, description = "One page of items", body = WishlistListResponse),
        (status = 422, description = "Invalid pagination or user id", body = ErrorResponse),
    )
)]
pub async fn list_user_wishlist(
    State(state): State<AppState>,
    user_id: Result<Path<i64>, PathRejection>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Path(user_id) = user_id?;
    let Query(params) = params?;
    let (skip, limit) = params.validated()?;
    let items = state
        .wishlist_service
        .list_user_items(user_id, skip, limit)
        .await?;

    Ok(Json(WishlistListResponse {
        total: u64::try_from(items.len()).unwrap_or(u64::MAX),
        page: PaginationParams::page(skip, limit),
        size: limit,
        items,
    }))
}

/// `DELETE /wishlist/{wishlist_id}`: Remove an item by id.
///
/// # Errors
///
/// Returns [`ServiceError::WishlistItemNotFound`] if the item does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/wishlist/{wishlist_id}",
    tag = "Wishlist",
    summary = "Delete a wishlist item",
    description = "Removes the item and publishes `wishlist.deleted`.",
    params(
        ("wishlist_id" = i64, Path, description = "Wishlist item id"),
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 422, description = "Malformed path parameter", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
    )
)]
pub async fn delete_wishlist_item(
    State(state): State<AppState>,
    wishlist_id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Path(wishlist_id) = wishlist_id?;
    state
        .wishlist_service
        .delete_item(WishlistId::new(wishlist_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /wishlist/user/{user_id}/product/{product_variation_id}`:
/// Remove an item by its natural key.
///
/// # Errors
///
/// Returns [`ServiceError::WishlistItemNotFound`] if nothing was removed.
#[utoipa::path(
    delete,
    path = "/api/v1/wishlist/user/{user_id}/product/{product_variation_id}",
    tag = "Wishlist",
    summary = "Delete a wishlist item by user and product variation",
    description = "Removes the item for the pair. No event is published for this path.",
    params(
        ("user_id" = i64, Path, description = "Owning user id"),
        ("product_variation_id" = i64, Path, description = "Product variation id"),
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 422, description = "Malformed path parameter", body = ErrorResponse),
        (status = 404, description = "No item for the pair", body = ErrorResponse),
    )
)]
pub async fn delete_wishlist_item_by_user_product(
    State(state): State<AppState>,
    key: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Path((user_id, product_variation_id)) = key?;
    state
        .wishlist_service
        .delete_user_product(user_id, product_variation_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Wishlist routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wishlist", post(create_wishlist_item))
        .route("/wishlist/", post(create_wishlist_item))
        .route("/wishlist/user/{user_id}", get(list_user_wishlist))
        .route("/wishlist/{wishlist_id}", delete(delete_wishlist_item))
        .route(
            "/wishlist/user/{user_id}/product/{product_variation_id}",
            delete(delete_wishlist_item_by_user_product),
        )
}
