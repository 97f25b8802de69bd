//! Store (website project) repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use webify_core::{StoreId, UserId};

use super::{RepositoryError, conflict_on_unique};
use crate::models::Store;

#[derive(sqlx::FromRow)]
struct StoreRow {
    id: i32,
    user_id: i32,
    store_name: String,
    store_id: String,
    created_at: DateTime<Utc>,
    last_accessed: DateTime<Utc>,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Self {
            id: StoreId::new(row.id),
            user_id: UserId::new(row.user_id),
            store_name: row.store_name,
            store_id: row.store_id,
            created_at: row.created_at,
            last_accessed: row.last_accessed,
        }
    }
}

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a store for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the public store id is taken.
    pub async fn create(
        &self,
        user_id: UserId,
        store_name: &str,
        store_id: &str,
    ) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            INSERT INTO webify.user_stores (user_id, store_name, store_id)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, store_name, store_id, created_at, last_accessed
            ",
        )
        .bind(user_id)
        .bind(store_name)
        .bind(store_id)
        .fetch_one(self.pool)
        .await
        .map_err(conflict_on_unique("store"))?;

        Ok(row.into())
    }

    /// List a user's stores, most recently opened first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, user_id, store_name, store_id, created_at, last_accessed
            FROM webify.user_stores
            WHERE user_id = $1
            ORDER BY last_accessed DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Store::from).collect())
    }

    /// Get a store by public id, only if it belongs to `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        user_id: UserId,
        store_id: &str,
    ) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, user_id, store_name, store_id, created_at, last_accessed
            FROM webify.user_stores
            WHERE user_id = $1 AND store_id = $2
            ",
        )
        .bind(user_id)
        .bind(store_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Store::from))
    }

    /// Bump `last_accessed` to now.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store doesn't exist.
    pub async fn touch(&self, id: StoreId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE webify.user_stores
            SET last_accessed = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
