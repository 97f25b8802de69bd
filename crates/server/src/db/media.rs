//! Media metadata repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use webify_core::{MediaId, UserId};

use super::{RepositoryError, conflict_on_unique};
use crate::models::{Media, MediaComponent};

#[derive(sqlx::FromRow)]
struct MediaRow {
    id: i32,
    user_id: i32,
    website_id: String,
    filename: String,
    original_name: String,
    mime_type: String,
    size_bytes: i64,
    url: String,
    component: String,
    item_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<MediaRow> for Media {
    type Error = RepositoryError;

    fn try_from(row: MediaRow) -> Result<Self, Self::Error> {
        let component: MediaComponent = row.component.parse().map_err(|value| {
            RepositoryError::DataCorruption(format!("invalid media component: {value}"))
        })?;

        Ok(Self {
            id: MediaId::new(row.id),
            user_id: UserId::new(row.user_id),
            website_id: row.website_id,
            filename: row.filename,
            original_name: row.original_name,
            mime_type: row.mime_type,
            size: row.size_bytes,
            url: row.url,
            component,
            item_id: row.item_id,
            created_at: row.created_at,
        })
    }
}

/// Fields for a new media row.
#[derive(Debug)]
pub struct NewMedia<'a> {
    pub user_id: UserId,
    pub website_id: &'a str,
    pub filename: &'a str,
    pub original_name: &'a str,
    pub mime_type: &'a str,
    pub size: i64,
    pub url: &'a str,
    pub component: MediaComponent,
    pub item_id: Option<&'a str>,
}

/// Repository for uploaded media metadata.
pub struct MediaRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MediaRepository<'a> {
    /// Create a new media repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record an upload.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the filename is already recorded.
    pub async fn create(&self, media: &NewMedia<'_>) -> Result<Media, RepositoryError> {
        sqlx::query_as::<_, MediaRow>(
            r"
            INSERT INTO webify.media
                (user_id, website_id, filename, original_name, mime_type,
                 size_bytes, url, component, item_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, website_id, filename, original_name, mime_type,
                      size_bytes, url, component, item_id, created_at
            ",
        )
        .bind(media.user_id)
        .bind(media.website_id)
        .bind(media.filename)
        .bind(media.original_name)
        .bind(media.mime_type)
        .bind(media.size)
        .bind(media.url)
        .bind(media.component.as_str())
        .bind(media.item_id)
        .fetch_one(self.pool)
        .await
        .map_err(conflict_on_unique("media file"))?
        .try_into()
    }

    /// List a user's uploads for one website, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        user_id: UserId,
        website_id: &str,
    ) -> Result<Vec<Media>, RepositoryError> {
        sqlx::query_as::<_, MediaRow>(
            r"
            SELECT id, user_id, website_id, filename, original_name, mime_type,
                   size_bytes, url, component, item_id, created_at
            FROM webify.media
            WHERE user_id = $1 AND website_id = $2
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .bind(website_id)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(Media::try_from)
        .collect()
    }

    /// Delete one of the user's uploads and return the removed record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such upload belongs to the user.
    pub async fn delete(&self, user_id: UserId, id: MediaId) -> Result<Media, RepositoryError> {
        sqlx::query_as::<_, MediaRow>(
            r"
            DELETE FROM webify.media
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, website_id, filename, original_name, mime_type,
                      size_bytes, url, component, item_id, created_at
            ",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?
        .try_into()
    }
}
