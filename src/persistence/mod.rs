//! Persistence layer: the wishlist data access object.
//!
//! [`WishlistRepository`] is the seam between the service and the store.
//! [`postgres::PostgresWishlistRepository`] is the production backend;
//! [`memory::InMemoryWishlistRepository`] serves deployments running with
//! `PERSISTENCE_ENABLED=false` and the test suite.

pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{NewWishlistItem, WishlistChanges, WishlistId, WishlistItem};
use crate::error::ServiceError;

pub use memory::InMemoryWishlistRepository;
pub use postgres::PostgresWishlistRepository;

/// CRUD access to wishlist rows.
///
/// Every method surfaces store failures as
/// [`ServiceError::PersistenceError`]; nothing is retried.
#[async_trait]
pub trait WishlistRepository: Send + Sync + std::fmt::Debug {
    /// Point lookup by surrogate key. A miss is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PersistenceError`] on store failure.
    async fn get_by_id(&self, id: WishlistId) -> Result<Option<WishlistItem>, ServiceError>;

    /// Point lookup by the `(user_id, product_variation_id)` natural key.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PersistenceError`] on store failure.
    async fn get_by_user_and_product(
        &self,
        user_id: i64,
        product_variation_id: i64,
    ) -> Result<Option<WishlistItem>, ServiceError>;

    /// Items of `user_id`, newest first, skipping `skip` and capped at `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PersistenceError`] on store failure.
    async fn get_by_user(
        &self,
        user_id: i64,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<WishlistItem>, ServiceError>;

    /// Inserts a new item, or returns the existing one for the same natural
    /// key unchanged. The caller cannot tell the two outcomes apart.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PersistenceError`] on store failure.
    async fn create(&self, input: &NewWishlistItem) -> Result<WishlistItem, ServiceError>;

    /// Applies the supplied fields of `changes` to `item` and returns the
    /// refreshed row.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::WishlistItemNotFound`] if the row vanished,
    /// or [`ServiceError::PersistenceError`] on store failure.
    async fn update(
        &self,
        item: &WishlistItem,
        changes: &WishlistChanges,
    ) -> Result<WishlistItem, ServiceError>;

    /// Deletes by surrogate key. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PersistenceError`] on store failure.
    async fn delete(&self, id: WishlistId) -> Result<bool, ServiceError>;

    /// Deletes by natural key. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PersistenceError`] on store failure.
    async fn delete_by_user_and_product(
        &self,
        user_id: i64,
        product_variation_id: i64,
    ) -> Result<bool, ServiceError>;
}
