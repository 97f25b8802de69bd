//! Media uploads: bytes on local disk, metadata in the database.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

use webify_core::{MediaId, UserId};

use crate::db::RepositoryError;
use crate::db::media::{MediaRepository, NewMedia};
use crate::models::{DEFAULT_STORE_ID, Media, MediaComponent};

/// Public URL prefix the uploads directory is served under.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Attempts at finding a free filename before giving up.
const MAX_NAME_ATTEMPTS: i64 = 16;

/// Errors from media operations.
#[derive(Debug, Error)]
pub enum MediaError {
    /// Upload had no file part.
    #[error("no file provided")]
    NoFile,

    /// `component` was missing or not one of navbar/hero/collection/logo.
    #[error("invalid component: {0}")]
    InvalidComponent(String),

    /// No such upload for this user.
    #[error("media not found")]
    NotFound,

    /// File system error.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// An upload as received from the client.
#[derive(Debug)]
pub struct Upload {
    pub bytes: Vec<u8>,
    pub original_name: String,
    pub mime_type: String,
    pub component: MediaComponent,
    pub item_id: Option<String>,
    pub website_id: Option<String>,
}

/// Media service.
pub struct MediaService<'a> {
    media: MediaRepository<'a>,
    uploads_dir: &'a Path,
}

impl<'a> MediaService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool, uploads_dir: &'a Path) -> Self {
        Self {
            media: MediaRepository::new(pool),
            uploads_dir,
        }
    }

    /// Write the file and record it.
    ///
    /// The file is named `{component}_{unix_millis}{.ext}`. If the record
    /// can't be saved the file is removed again.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Io` if the file can't be written.
    pub async fn upload(&self, user_id: UserId, upload: Upload) -> Result<Media, MediaError> {
        tokio::fs::create_dir_all(self.uploads_dir).await?;

        let extension = extension_of(&upload.original_name);
        let (filename, path) = self
            .write_new_file(upload.component, &extension, &upload.bytes)
            .await?;
        let url = format!("{UPLOADS_URL_PREFIX}/{filename}");
        let size = i64::try_from(upload.bytes.len()).unwrap_or(i64::MAX);

        let new_media = NewMedia {
            user_id,
            website_id: upload
                .website_id
                .as_deref()
                .filter(|id| !id.trim().is_empty())
                .unwrap_or(DEFAULT_STORE_ID),
            filename: &filename,
            original_name: &upload.original_name,
            mime_type: &upload.mime_type,
            size,
            url: &url,
            component: upload.component,
            item_id: upload.item_id.as_deref().filter(|id| !id.is_empty()),
        };

        match self.media.create(&new_media).await {
            Ok(media) => {
                tracing::info!(
                    user_id = %user_id,
                    filename = %media.filename,
                    size = media.size,
                    "Media uploaded"
                );
                Ok(media)
            }
            Err(e) => {
                if let Err(io) = tokio::fs::remove_file(&path).await {
                    tracing::warn!(error = %io, path = %path.display(), "Failed to remove orphaned upload");
                }
                Err(e.into())
            }
        }
    }

    /// A user's uploads for one website, newest first.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Repository` if the query fails.
    pub async fn list(&self, user_id: UserId, website_id: Option<&str>) -> Result<Vec<Media>, MediaError> {
        let website_id = website_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or(DEFAULT_STORE_ID);
        Ok(self.media.list(user_id, website_id).await?)
    }

    /// Delete the record and its file.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::NotFound` if the upload isn't the user's.
    pub async fn delete(&self, user_id: UserId, id: MediaId) -> Result<Media, MediaError> {
        let media = self.media.delete(user_id, id).await.map_err(|e| match e {
            RepositoryError::NotFound => MediaError::NotFound,
            other => MediaError::Repository(other),
        })?;

        match tokio::fs::remove_file(self.uploads_dir.join(&media.filename)).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(filename = %media.filename, "Upload file already gone");
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user_id = %user_id, media_id = %id, "Media deleted");
        Ok(media)
    }

    /// Create a file that doesn't exist yet, bumping the timestamp on collision.
    async fn write_new_file(
        &self,
        component: MediaComponent,
        extension: &str,
        bytes: &[u8],
    ) -> Result<(String, PathBuf), MediaError> {
        let millis = Utc::now().timestamp_millis();

        for offset in 0..MAX_NAME_ATTEMPTS {
            let filename = format!("{}_{}{extension}", component.as_str(), millis + offset);
            let path = self.uploads_dir.join(&filename);

            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };

            file.write_all(bytes).await?;
            file.flush().await?;
            return Ok((filename, path));
        }

        Err(std::io::Error::new(ErrorKind::AlreadyExists, "no free upload filename").into())
    }
}

/// `.ext` from the client's filename, lowercased; empty when absent or odd.
fn extension_of(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("photo.JPG"), ".jpg");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), "");
        assert_eq!(extension_of("evil.p/hp"), "");
        assert_eq!(extension_of("weird.<script>"), "");
    }

    #[test]
    fn test_component_parsing() {
        assert_eq!("Hero".parse::<MediaComponent>().unwrap(), MediaComponent::Hero);
        assert_eq!("logo".parse::<MediaComponent>().unwrap(), MediaComponent::Logo);
        assert!("footer".parse::<MediaComponent>().is_err());
    }
}
