//! Website configuration repository.
//!
//! Configs are stored as one JSONB document per user and store. Saving reads
//! the current document under a row lock and merges the incoming sections
//! over it, so concurrent saves of different sections don't clobber each
//! other. This holds for the first save too: the row is created empty
//! before it is locked.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use webify_core::site::WebsiteConfig;
use webify_core::{UserId, WebsiteId};

use super::RepositoryError;
use crate::models::WebsiteDocument;

#[derive(sqlx::FromRow)]
struct WebsiteRow {
    id: i32,
    user_id: i32,
    store_id: String,
    config: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<WebsiteRow> for WebsiteDocument {
    type Error = RepositoryError;

    fn try_from(row: WebsiteRow) -> Result<Self, Self::Error> {
        let config = decode_config(row.config)?;

        Ok(Self {
            id: WebsiteId::new(row.id),
            user_id: UserId::new(row.user_id),
            store_id: row.store_id,
            config,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn decode_config(value: Value) -> Result<WebsiteConfig, RepositoryError> {
    serde_json::from_value(value).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid website config in database: {e}"))
    })
}

fn encode_config(config: &WebsiteConfig) -> Result<Value, RepositoryError> {
    serde_json::to_value(config)
        .map_err(|e| RepositoryError::DataCorruption(format!("unserializable config: {e}")))
}

/// Repository for website configuration documents.
pub struct WebsiteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WebsiteRepository<'a> {
    /// Create a new website repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the saved config for a user and store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored document no
    /// longer matches the site model.
    pub async fn get(
        &self,
        user_id: UserId,
        store_id: &str,
    ) -> Result<Option<WebsiteDocument>, RepositoryError> {
        sqlx::query_as::<_, WebsiteRow>(
            r"
            SELECT id, user_id, store_id, config, created_at, updated_at
            FROM webify.website_configs
            WHERE user_id = $1 AND store_id = $2
            ",
        )
        .bind(user_id)
        .bind(store_id)
        .fetch_optional(self.pool)
        .await?
        .map(WebsiteDocument::try_from)
        .transpose()
    }

    /// Merge `update` over the saved config and store the result.
    ///
    /// Sections absent from `update` keep their saved value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn save_merged(
        &self,
        user_id: UserId,
        store_id: &str,
        update: WebsiteConfig,
    ) -> Result<WebsiteDocument, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // A first save has no row to lock yet. Seed an empty one so racing
        // first saves serialize on it.
        sqlx::query(
            r"
            INSERT INTO webify.website_configs (user_id, store_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, store_id) DO NOTHING
            ",
        )
        .bind(user_id)
        .bind(store_id)
        .execute(&mut *tx)
        .await?;

        let current: Value = sqlx::query_scalar(
            r"
            SELECT config
            FROM webify.website_configs
            WHERE user_id = $1 AND store_id = $2
            FOR UPDATE
            ",
        )
        .bind(user_id)
        .bind(store_id)
        .fetch_one(&mut *tx)
        .await?;

        let merged = decode_config(current)?.merged_with(update);

        let row = sqlx::query_as::<_, WebsiteRow>(
            r"
            UPDATE webify.website_configs
            SET config = $3, updated_at = NOW()
            WHERE user_id = $1 AND store_id = $2
            RETURNING id, user_id, store_id, config, created_at, updated_at
            ",
        )
        .bind(user_id)
        .bind(store_id)
        .bind(encode_config(&merged)?)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        WebsiteDocument::try_from(row)
    }
}
