//! Wishlist service: orchestrates repository calls and event emission.

use std::sync::Arc;

use crate::domain::{NewWishlistItem, WishlistChanges, WishlistEvent, WishlistId, WishlistItem};
use crate::error::ServiceError;
use crate::events::EventPublisher;
use crate::persistence::WishlistRepository;

/// Orchestration layer for all wishlist operations.
///
/// Every mutation follows the same pattern: write through the repository,
/// then publish the matching [`WishlistEvent`]. The two steps are not
/// transactional. A publish failure is returned to the caller even though
/// the write has already been committed.
#[derive(Debug, Clone)]
pub struct WishlistService {
    repository: Arc<dyn WishlistRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl WishlistService {
    /// Creates a new `WishlistService`.
    #[must_use]
    pub fn new(repository: Arc<dyn WishlistRepository>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    /// Adds an item to a user's wishlist.
    ///
    /// If the `(user_id, product_variation_id)` pair already exists, the
    /// stored item is returned unchanged. A `wishlist.created` event is
    /// published in both cases.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PersistenceError`] on store failure or
    /// [`ServiceError::EventPublishError`] if the event cannot be delivered.
    pub async fn create_item(&self, input: &NewWishlistItem) -> Result<WishlistItem, ServiceError> {
        let item = self.repository.create(input).await?;
        self.publisher.publish(&WishlistEvent::created(&item)).await?;

        tracing::info!(
            id = %item.id,
            user_id = item.user_id,
            product_variation_id = item.product_variation_id,
            "wishlist item created"
        );
        Ok(item)
    }

    /// Fetches a single item.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::WishlistItemNotFound`] if no item has `id`.
    pub async fn get_item(&self, id: WishlistId) -> Result<WishlistItem, ServiceError> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(id))
    }

    /// Returns one page of a user's wishlist, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PersistenceError`] on store failure.
    pub async fn list_user_items(
        &self,
        user_id: i64,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<WishlistItem>, ServiceError> {
        self.repository.get_by_user(user_id, skip, limit).await
    }

    /// Updates the cached display fields of an item and publishes
    /// `wishlist.updated`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::WishlistItemNotFound`] if the item does not
    /// exist, or a persistence/publish error.
    pub async fn update_item(
        &self,
        id: WishlistId,
        changes: &WishlistChanges,
    ) -> Result<WishlistItem, ServiceError> {
        let current = self.get_item(id).await?;
        let updated = self.repository.update(&current, changes).await?;
        self.publisher
            .publish(&WishlistEvent::updated(&updated))
            .await?;

        tracing::info!(%id, "wishlist item updated");
        Ok(updated)
    }

    /// Removes an item by id and publishes `wishlist.deleted` carrying the
    /// removed item's identity.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::WishlistItemNotFound`] if no item has `id`,
    /// or a persistence/publish error.
    pub async fn delete_item(&self, id: WishlistId) -> Result<(), ServiceError> {
        let item = self.get_item(id).await?;

        if self.repository.delete(id).await? {
            self.publisher
                .publish(&WishlistEvent::deleted(&item))
                .await?;
            tracing::info!(%id, user_id = item.user_id, "wishlist item deleted");
        }
        Ok(())
    }

    /// Removes the item for a `(user_id, product_variation_id)` pair.
    ///
    /// Unlike [`Self::delete_item`], no event is published.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::WishlistItemNotFound`] if nothing was removed.
    pub async fn delete_user_product(
        &self,
        user_id: i64,
        product_variation_id: i64,
    ) -> Result<(), ServiceError> {
        let removed = self
            .repository
            .delete_by_user_and_product(user_id, product_variation_id)
            .await?;
        if !removed {
            return Err(ServiceError::WishlistItemNotFound);
        }

        tracing::info!(user_id, product_variation_id, "wishlist item deleted by natural key");
        Ok(())
    }
}
