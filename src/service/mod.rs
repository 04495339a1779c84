//! Service layer: business logic orchestration.
//!
//! [`WishlistService`] coordinates the [`crate::persistence::WishlistRepository`]
//! and the [`crate::events::EventPublisher`].

pub mod wishlist_service;

pub use wishlist_service::WishlistService;
