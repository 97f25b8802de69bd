//! Store (website project) service.

use sqlx::PgPool;
use thiserror::Error;

use webify_core::UserId;

use crate::db::RepositoryError;
use crate::db::stores::StoreRepository;
use crate::models::Store;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Blank store name.
    #[error("store name is required")]
    NameRequired,

    /// No such store for this user.
    #[error("store not found")]
    NotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// New opaque public store id: 16 random bytes, hex encoded.
#[must_use]
pub fn generate_store_id() -> String {
    let bytes: [u8; 16] = rand::random();
    hex::encode(bytes)
}

/// Store service.
pub struct StoreService<'a> {
    stores: StoreRepository<'a>,
}

impl<'a> StoreService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            stores: StoreRepository::new(pool),
        }
    }

    /// Create a store with a fresh public id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NameRequired` if the name is blank.
    pub async fn create(&self, user_id: UserId, store_name: &str) -> Result<Store, StoreError> {
        let store_name = store_name.trim();
        if store_name.is_empty() {
            return Err(StoreError::NameRequired);
        }

        let store = self
            .stores
            .create(user_id, store_name, &generate_store_id())
            .await?;

        tracing::info!(user_id = %user_id, store_id = %store.store_id, "Store created");
        Ok(store)
    }

    /// All of a user's stores, most recently opened first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Repository` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Store>, StoreError> {
        Ok(self.stores.list_for_user(user_id).await?)
    }

    /// Resolve a store the user owns and mark it as just opened.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the store doesn't exist or belongs
    /// to someone else.
    pub async fn open(&self, user_id: UserId, store_id: &str) -> Result<Store, StoreError> {
        let store = self
            .stores
            .get_for_user(user_id, store_id)
            .await?
            .ok_or(StoreError::NotFound)?;

        self.stores.touch(store.id).await.map_err(|e| match e {
            RepositoryError::NotFound => StoreError::NotFound,
            other => StoreError::Repository(other),
        })?;

        Ok(store)
    }
}
