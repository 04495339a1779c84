//! Wishlist item entity and its write-side inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use super::WishlistId;

/// A persisted wishlist row: one user tracking one product variation.
///
/// `product_name`, `product_price` and `product_image` are snapshots of the
/// catalog taken when the item was first added. They are never refreshed
/// by a repeated create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WishlistItem {
    /// Store-generated surrogate key.
    pub id: WishlistId,
    /// Owning user. Not validated against the user service.
    pub user_id: i64,
    /// Wishlisted product variation. Not validated against the catalog.
    pub product_variation_id: i64,
    /// Cached product name.
    pub product_name: Option<String>,
    /// Cached product price in minor currency units.
    pub product_price: Option<i64>,
    /// Cached product image URL.
    pub product_image: Option<String>,
    /// Insertion timestamp, set by the store.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp. `None` until the first update.
    pub updated_at: Option<DateTime<Utc>>,
}

impl WishlistItem {
    /// Returns the `(user_id, product_variation_id)` natural key.
    #[must_use]
    pub const fn natural_key(&self) -> (i64, i64) {
        (self.user_id, self.product_variation_id)
    }
}

/// Input for creating a wishlist item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct NewWishlistItem {
    /// Owning user.
    pub user_id: i64,
    /// Product variation to track.
    pub product_variation_id: i64,
    /// Cached product name.
    #[serde(default)]
    pub product_name: Option<String>,
    /// Cached product price in minor currency units.
    #[serde(default)]
    pub product_price: Option<i64>,
    /// Cached product image URL.
    #[serde(default)]
    pub product_image: Option<String>,
}

impl NewWishlistItem {
    /// Creates an input carrying only the natural key.
    #[must_use]
    pub const fn new(user_id: i64, product_variation_id: i64) -> Self {
        Self {
            user_id,
            product_variation_id,
            product_name: None,
            product_price: None,
            product_image: None,
        }
    }
}

/// Partial update of the cached display fields.
///
/// The outer `Option` records whether a field was supplied at all: `None`
/// leaves the stored value untouched, `Some(None)` clears it and
/// `Some(Some(v))` overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WishlistChanges {
    /// New product name.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub product_name: Option<Option<String>>,
    /// New product price.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub product_price: Option<Option<i64>>,
    /// New product image URL.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub product_image: Option<Option<String>>,
}

impl WishlistChanges {
    /// Returns `true` when no field was supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.product_name.is_none() && self.product_price.is_none() && self.product_image.is_none()
    }

    /// Applies the supplied fields to `item` in place.
    pub fn apply_to(&self, item: &mut WishlistItem) {
        if let Some(name) = &self.product_name {
            item.product_name.clone_from(name);
        }
        if let Some(price) = self.product_price {
            item.product_price = price;
        }
        if let Some(image) = &self.product_image {
            item.product_image.clone_from(image);
        }
    }
}

/// Marks a field as present even when its JSON value is `null`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn item() -> WishlistItem {
        WishlistItem {
            id: WishlistId::new(1),
            user_id: 1,
            product_variation_id: 100,
            product_name: Some("Lamp".to_string()),
            product_price: Some(2_500),
            product_image: Some("https://cdn.example/lamp.png".to_string()),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn absent_fields_are_untouched() {
        let Ok(changes) = serde_json::from_str::<WishlistChanges>(r#"{"product_price": 1999}"#)
        else {
            panic!("valid changes");
        };
        let mut target = item();
        changes.apply_to(&mut target);
        assert_eq!(target.product_price, Some(1_999));
        assert_eq!(target.product_name.as_deref(), Some("Lamp"));
        assert!(target.product_image.is_some());
    }

    #[test]
    fn explicit_null_clears_field() {
        let Ok(changes) = serde_json::from_str::<WishlistChanges>(r#"{"product_image": null}"#)
        else {
            panic!("valid changes");
        };
        assert_eq!(changes.product_image, Some(None));
        let mut target = item();
        changes.apply_to(&mut target);
        assert!(target.product_image.is_none());
        assert_eq!(target.product_price, Some(2_500));
    }

    #[test]
    fn empty_changes_detected() {
        let Ok(changes) = serde_json::from_str::<WishlistChanges>("{}") else {
            panic!("valid changes");
        };
        assert!(changes.is_empty());
    }

    #[test]
    fn create_input_defaults_optional_fields() {
        let Ok(input) = serde_json::from_str::<NewWishlistItem>(
            r#"{"user_id": 1, "product_variation_id": 100}"#,
        ) else {
            panic!("valid input");
        };
        assert_eq!(input, NewWishlistItem::new(1, 100));
    }
}
