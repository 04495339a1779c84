//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::WishlistService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Wishlist service for all business logic.
    pub wishlist_service: Arc<WishlistService>,
}

impl AppState {
    /// Wraps a service for sharing across handlers.
    #[must_use]
    pub fn new(wishlist_service: WishlistService) -> Self {
        Self {
            wishlist_service: Arc::new(wishlist_service),
        }
    }
}
