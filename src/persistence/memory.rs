//! In-memory implementation of the wishlist repository.
//!
//! All rows live behind a single [`tokio::sync::RwLock`]. Creates take the
//! write lock for the whole existence check and insert, so the natural-key
//! invariant holds under concurrent requests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::WishlistRepository;
use crate::domain::{NewWishlistItem, WishlistChanges, WishlistId, WishlistItem};
use crate::error::ServiceError;

#[derive(Debug, Default)]
struct Rows {
    items: BTreeMap<WishlistId, WishlistItem>,
    last_id: i64,
}

impl Rows {
    fn find_by_natural_key(&self, user_id: i64, product_variation_id: i64) -> Option<&WishlistItem> {
        self.items
            .values()
            .find(|item| item.natural_key() == (user_id, product_variation_id))
    }
}

/// Volatile wishlist store.
///
/// Ids are assigned sequentially from 1, mirroring a `BIGSERIAL` column.
#[derive(Debug, Default)]
pub struct InMemoryWishlistRepository {
    rows: RwLock<Rows>,
}

impl InMemoryWishlistRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.items.len()
    }

    /// Returns `true` if no rows are stored.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.items.is_empty()
    }
}

#[async_trait]
impl WishlistRepository for InMemoryWishlistRepository {
    async fn get_by_id(&self, id: WishlistId) -> Result<Option<WishlistItem>, ServiceError> {
        Ok(self.rows.read().await.items.get(&id).cloned())
    }

    async fn get_by_user_and_product(
        &self,
        user_id: i64,
        product_variation_id: i64,
    ) -> Result<Option<WishlistItem>, ServiceError> {
        let rows = self.rows.read().await;
        Ok(rows
            .find_by_natural_key(user_id, product_variation_id)
            .cloned())
    }

    async fn get_by_user(
        &self,
        user_id: i64,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<WishlistItem>, ServiceError> {
        let rows = self.rows.read().await;
        let mut owned: Vec<&WishlistItem> = rows
            .items
            .values()
            .filter(|item| item.user_id == user_id)
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(owned
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn create(&self, input: &NewWishlistItem) -> Result<WishlistItem, ServiceError> {
        let mut rows = self.rows.write().await;
        if let Some(existing) = rows.find_by_natural_key(input.user_id, input.product_variation_id)
        {
            return Ok(existing.clone());
        }

        rows.last_id = rows
            .last_id
            .checked_add(1)
            .ok_or_else(|| ServiceError::PersistenceError("id sequence exhausted".to_string()))?;
        let item = WishlistItem {
            id: WishlistId::new(rows.last_id),
            user_id: input.user_id,
            product_variation_id: input.product_variation_id,
            product_name: input.product_name.clone(),
            product_price: input.product_price,
            product_image: input.product_image.clone(),
            created_at: Utc::now(),
            updated_at: None,
        };
        rows.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        item: &WishlistItem,
        changes: &WishlistChanges,
    ) -> Result<WishlistItem, ServiceError> {
        let mut rows = self.rows.write().await;
        let stored = rows
            .items
            .get_mut(&item.id)
            .ok_or_else(|| ServiceError::not_found(item.id))?;

        if !changes.is_empty() {
            changes.apply_to(stored);
            stored.updated_at = Some(Utc::now());
        }
        Ok(stored.clone())
    }

    async fn delete(&self, id: WishlistId) -> Result<bool, ServiceError> {
        Ok(self.rows.write().await.items.remove(&id).is_some())
    }

    async fn delete_by_user_and_product(
        &self,
        user_id: i64,
        product_variation_id: i64,
    ) -> Result<bool, ServiceError> {
        let mut rows = self.rows.write().await;
        let before = rows.items.len();
        rows.items
            .retain(|_, item| item.natural_key() != (user_id, product_variation_id));
        Ok(rows.items.len() < before)
    }
}
