//! Wishlist request and response DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{NewWishlistItem, WishlistItem};
use crate::error::ServiceError;

/// Column width of `wishlists.product_name`.
pub const PRODUCT_NAME_MAX_CHARS: usize = 255;

/// Column width of `wishlists.product_image`.
pub const PRODUCT_IMAGE_MAX_CHARS: usize = 500;

/// Request body for `POST /wishlist/`.
pub type CreateWishlistRequest = NewWishlistItem;

/// Rejects payloads the store would refuse.
///
/// # Errors
///
/// Returns [`ServiceError::Validation`] if a cached text field exceeds its
/// column width.
pub fn validate_create_request(req: &CreateWishlistRequest) -> Result<(), ServiceError> {
    check_width("product_name", req.product_name.as_deref(), PRODUCT_NAME_MAX_CHARS)?;
    check_width("product_image", req.product_image.as_deref(), PRODUCT_IMAGE_MAX_CHARS)
}

fn check_width(field: &str, value: Option<&str>, max: usize) -> Result<(), ServiceError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ServiceError::Validation(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}

/// Response body for `GET /wishlist/user/{user_id}`.
///
/// `total` is the number of items in this page, not the size of the whole
/// wishlist.
#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistListResponse {
    /// Items of the requested page, newest first.
    pub items: Vec<WishlistItem>,
    /// Number of items returned.
    pub total: u64,
    /// 1-based page number: `skip / limit + 1`.
    pub page: u64,
    /// Requested page size (`limit`).
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_missing_cached_fields() {
        assert!(validate_create_request(&NewWishlistItem::new(1, 100)).is_ok());
    }

    #[test]
    fn rejects_overlong_name() {
        let mut req = NewWishlistItem::new(1, 100);
        req.product_name = Some("x".repeat(PRODUCT_NAME_MAX_CHARS + 1));
        assert!(matches!(
            validate_create_request(&req),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        let mut req = NewWishlistItem::new(1, 100);
        req.product_name = Some("ü".repeat(PRODUCT_NAME_MAX_CHARS));
        assert!(validate_create_request(&req).is_ok());
    }
}
