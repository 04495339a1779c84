//! Wishlist lifecycle events.
//!
//! Every successful mutation that other services care about produces a
//! [`WishlistEvent`]. The serialized form is the wire contract published to
//! the broker, so field names and the `service`/`version` constants must not
//! change without a version bump.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{WishlistId, WishlistItem};

/// Name of the originating service stamped on every event.
pub const EVENT_SOURCE_SERVICE: &str = "wishlist-service";

/// Schema version of the event envelope.
pub const EVENT_SCHEMA_VERSION: &str = "1.0";

/// Kind of wishlist change. Doubles as the broker routing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WishlistEventType {
    /// An item was added (or an existing item was re-added).
    #[serde(rename = "wishlist.created")]
    Created,
    /// An item's cached fields were updated.
    #[serde(rename = "wishlist.updated")]
    Updated,
    /// An item was removed.
    #[serde(rename = "wishlist.deleted")]
    Deleted,
}

impl WishlistEventType {
    /// Returns the wire string, e.g. `"wishlist.created"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "wishlist.created",
            Self::Updated => "wishlist.updated",
            Self::Deleted => "wishlist.deleted",
        }
    }
}

impl fmt::Display for WishlistEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity snapshot of the item an event refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEventData {
    /// Item surrogate key.
    pub wishlist_id: WishlistId,
    /// Owning user.
    pub user_id: i64,
    /// Product variation.
    pub product_variation_id: i64,
    /// When the event was produced.
    pub timestamp: DateTime<Utc>,
}

/// Event envelope published to the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEvent {
    /// Event kind.
    pub event_type: WishlistEventType,
    /// Item identity snapshot.
    pub data: WishlistEventData,
    /// Originating service, always [`EVENT_SOURCE_SERVICE`].
    pub service: String,
    /// Envelope version, always [`EVENT_SCHEMA_VERSION`].
    pub version: String,
}

impl WishlistEvent {
    /// Builds an event of `event_type` for `item`, timestamped now.
    #[must_use]
    pub fn for_item(event_type: WishlistEventType, item: &WishlistItem) -> Self {
        Self {
            event_type,
            data: WishlistEventData {
                wishlist_id: item.id,
                user_id: item.user_id,
                product_variation_id: item.product_variation_id,
                timestamp: Utc::now(),
            },
            service: EVENT_SOURCE_SERVICE.to_string(),
            version: EVENT_SCHEMA_VERSION.to_string(),
        }
    }

    /// Shorthand for a `wishlist.created` event.
    #[must_use]
    pub fn created(item: &WishlistItem) -> Self {
        Self::for_item(WishlistEventType::Created, item)
    }

    /// Shorthand for a `wishlist.updated` event.
    #[must_use]
    pub fn updated(item: &WishlistItem) -> Self {
        Self::for_item(WishlistEventType::Updated, item)
    }

    /// Shorthand for a `wishlist.deleted` event.
    #[must_use]
    pub fn deleted(item: &WishlistItem) -> Self {
        Self::for_item(WishlistEventType::Deleted, item)
    }

    /// Routing key used when publishing this event.
    #[must_use]
    pub const fn routing_key(&self) -> &'static str {
        self.event_type.as_str()
    }
}
