//! Website configuration service.

use sqlx::PgPool;
use thiserror::Error;

use webify_core::UserId;
use webify_core::site::{EditorError, WebsiteConfig};

use crate::db::RepositoryError;
use crate::db::websites::WebsiteRepository;
use crate::models::{DEFAULT_STORE_ID, WebsiteDocument};

use super::stores::{StoreError, StoreService};

/// Errors from website operations.
#[derive(Debug, Error)]
pub enum WebsiteError {
    /// Named store doesn't exist or isn't the user's.
    #[error("store not found")]
    StoreNotFound,

    /// Submitted config breaks an invariant.
    #[error("invalid website configuration: {0}")]
    Invalid(#[from] EditorError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<StoreError> for WebsiteError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Repository(inner) => Self::Repository(inner),
            StoreError::NotFound | StoreError::NameRequired => Self::StoreNotFound,
        }
    }
}

/// Website configuration service.
pub struct WebsiteService<'a> {
    websites: WebsiteRepository<'a>,
    stores: StoreService<'a>,
}

impl<'a> WebsiteService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            websites: WebsiteRepository::new(pool),
            stores: StoreService::new(pool),
        }
    }

    /// Load the saved config for a store (`default` when `None`).
    ///
    /// # Errors
    ///
    /// Returns `WebsiteError::StoreNotFound` for a named store the user
    /// doesn't own.
    pub async fn load(
        &self,
        user_id: UserId,
        store_id: Option<&str>,
    ) -> Result<Option<WebsiteDocument>, WebsiteError> {
        let store_id = self.resolve_store(user_id, store_id).await?;
        Ok(self.websites.get(user_id, store_id).await?)
    }

    /// Validate and save `update`; absent sections keep their saved value.
    ///
    /// # Errors
    ///
    /// Returns `WebsiteError::Invalid` if any section has duplicate item ids
    /// or an item in a slot its section does not render.
    /// Returns `WebsiteError::StoreNotFound` for a named store the user
    /// doesn't own.
    pub async fn save(
        &self,
        user_id: UserId,
        store_id: Option<&str>,
        update: WebsiteConfig,
    ) -> Result<WebsiteDocument, WebsiteError> {
        update.validate()?;
        let store_id = self.resolve_store(user_id, store_id).await?;

        let document = self.websites.save_merged(user_id, store_id, update).await?;
        tracing::info!(user_id = %user_id, store_id = %document.store_id, "Website configuration saved");
        Ok(document)
    }

    async fn resolve_store<'s>(
        &self,
        user_id: UserId,
        store_id: Option<&'s str>,
    ) -> Result<&'s str, WebsiteError> {
        let store_id = store_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STORE_ID);

        if store_id != DEFAULT_STORE_ID {
            self.stores.open(user_id, store_id).await?;
        }

        Ok(store_id)
    }
}
