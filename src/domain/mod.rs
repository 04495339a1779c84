//! Domain layer: wishlist entity, identifiers and lifecycle events.
//!
//! Contains the server-side model shared by the persistence, event and API
//! layers, plus the in-process event bus.

pub mod event_bus;
pub mod wishlist_event;
pub mod wishlist_id;
pub mod wishlist_item;

pub use event_bus::EventBus;
pub use wishlist_event::{WishlistEvent, WishlistEventData, WishlistEventType};
pub use wishlist_id::WishlistId;
pub use wishlist_item::{NewWishlistItem, WishlistChanges, WishlistItem};
