//! Type-safe wishlist item identifier.
//!
//! [`WishlistId`] wraps the store-generated `BIGSERIAL` key so it cannot be
//! confused with the user or product variation ids that share its integer
//! representation.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Surrogate key of a wishlist row.
///
/// Assigned by the store on insertion and immutable thereafter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = i64)]
pub struct WishlistId(i64);

impl WishlistId {
    /// Wraps a raw store id.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for WishlistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for WishlistId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<WishlistId> for i64 {
    fn from(id: WishlistId) -> Self {
        id.0
    }
}
