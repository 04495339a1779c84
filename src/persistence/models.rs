//! Database row models.

use chrono::{DateTime, Utc};

use crate::domain::{WishlistId, WishlistItem};

/// Column list selected for every wishlist read, in [`WishlistRow`] order.
pub const WISHLIST_COLUMNS: &str = "id, user_id, product_variation_id, product_name, \
     product_price, product_image, created_at, updated_at";

/// A row of the `wishlists` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WishlistRow {
    /// `BIGSERIAL` primary key.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Product variation.
    pub product_variation_id: i64,
    /// Cached product name (`VARCHAR(255)`).
    pub product_name: Option<String>,
    /// Cached product price (`BIGINT`).
    pub product_price: Option<i64>,
    /// Cached product image URL (`VARCHAR(500)`).
    pub product_image: Option<String>,
    /// `DEFAULT now()` on insert.
    pub created_at: DateTime<Utc>,
    /// Set on every update, `NULL` before the first one.
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<WishlistRow> for WishlistItem {
    fn from(row: WishlistRow) -> Self {
        Self {
            id: WishlistId::new(row.id),
            user_id: row.user_id,
            product_variation_id: row.product_variation_id,
            product_name: row.product_name,
            product_price: row.product_price,
            product_image: row.product_image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
