//! PostgreSQL implementation of the wishlist repository.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::WishlistRepository;
use super::models::{WISHLIST_COLUMNS, WishlistRow};
use crate::config::ServiceConfig;
use crate::domain::{NewWishlistItem, WishlistChanges, WishlistId, WishlistItem};
use crate::error::ServiceError;

/// PostgreSQL-backed repository using `sqlx::PgPool`.
///
/// Natural-key uniqueness is enforced by the `wishlists_user_product_key`
/// constraint; [`WishlistRepository::create`] relies on it instead of a
/// check-then-insert.
#[derive(Debug, Clone)]
pub struct PostgresWishlistRepository {
    pool: PgPool,
}

impl PostgresWishlistRepository {
    /// Creates a repository over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PersistenceError`] if the database cannot be
    /// reached within the configured timeout.
    pub async fn connect(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;

        tracing::info!(
            max_connections = config.database_max_connections,
            "connected to postgres"
        );
        Ok(Self::new(pool))
    }

    /// Applies pending schema migrations from `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PersistenceError`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), ServiceError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ServiceError::PersistenceError(e.to_string()))?;
        tracing::info!("database migrations applied");
        Ok(())
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl WishlistRepository for PostgresWishlistRepository {
    async fn get_by_id(&self, id: WishlistId) -> Result<Option<WishlistItem>, ServiceError> {
        let sql = format!("SELECT {WISHLIST_COLUMNS} FROM wishlists WHERE id = $1");
        let row = sqlx::query_as::<_, WishlistRow>(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(WishlistItem::from))
    }

    async fn get_by_user_and_product(
        &self,
        user_id: i64,
        product_variation_id: i64,
    ) -> Result<Option<WishlistItem>, ServiceError> {
        let sql = format!(
            "SELECT {WISHLIST_COLUMNS} FROM wishlists \
             WHERE user_id = $1 AND product_variation_id = $2"
        );
        let row = sqlx::query_as::<_, WishlistRow>(&sql)
            .bind(user_id)
            .bind(product_variation_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(WishlistItem::from))
    }

    async fn get_by_user(
        &self,
        user_id: i64,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<WishlistItem>, ServiceError> {
        let sql = format!(
            "SELECT {WISHLIST_COLUMNS} FROM wishlists WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC OFFSET $2 LIMIT $3"
        );
        let rows = sqlx::query_as::<_, WishlistRow>(&sql)
            .bind(user_id)
            .bind(i64::try_from(skip).unwrap_or(i64::MAX))
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(WishlistItem::from).collect())
    }

    async fn create(&self, input: &NewWishlistItem) -> Result<WishlistItem, ServiceError> {
        let sql = format!(
            "INSERT INTO wishlists \
             (user_id, product_variation_id, product_name, product_price, product_image) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id, product_variation_id) DO NOTHING \
             RETURNING {WISHLIST_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, WishlistRow>(&sql)
            .bind(input.user_id)
            .bind(input.product_variation_id)
            .bind(input.product_name.as_deref())
            .bind(input.product_price)
            .bind(input.product_image.as_deref())
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = inserted {
            tracing::debug!(id = row.id, user_id = row.user_id, "wishlist row inserted");
            return Ok(row.into());
        }

        // Conflict on the natural key: hand back the row that won.
        self.get_by_user_and_product(input.user_id, input.product_variation_id)
            .await?
            .ok_or_else(|| {
                ServiceError::PersistenceError(format!(
                    "wishlist row for user {} and variation {} conflicted but was not found",
                    input.user_id, input.product_variation_id
                ))
            })
    }

    async fn update(
        &self,
        item: &WishlistItem,
        changes: &WishlistChanges,
    ) -> Result<WishlistItem, ServiceError> {
        if changes.is_empty() {
            return self
                .get_by_id(item.id)
                .await?
                .ok_or_else(|| ServiceError::not_found(item.id));
        }

        let mut query = QueryBuilder::<Postgres>::new("UPDATE wishlists SET updated_at = now()");
        if let Some(name) = &changes.product_name {
            query.push(", product_name = ").push_bind(name.clone());
        }
        if let Some(price) = changes.product_price {
            query.push(", product_price = ").push_bind(price);
        }
        if let Some(image) = &changes.product_image {
            query.push(", product_image = ").push_bind(image.clone());
        }
        query.push(" WHERE id = ").push_bind(item.id.get());
        query.push(" RETURNING ").push(WISHLIST_COLUMNS);

        let row = query
            .build_query_as::<WishlistRow>()
            .fetch_optional(&self.pool)
            .await?;

        row.map(WishlistItem::from)
            .ok_or_else(|| ServiceError::not_found(item.id))
    }

    async fn delete(&self, id: WishlistId) -> Result<bool, ServiceError> {
        let result = sqlx::query("DELETE FROM wishlists WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_user_and_product(
        &self,
        user_id: i64,
        product_variation_id: i64,
    ) -> Result<bool, ServiceError> {
        let result = sqlx::query(
            "DELETE FROM wishlists WHERE user_id = $1 AND product_variation_id = $2",
        )
        .bind(user_id)
        .bind(product_variation_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
