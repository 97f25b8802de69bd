//! Uploaded media metadata.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use webify_core::{MediaId, UserId};

/// Which editor component an upload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaComponent {
    Navbar,
    Hero,
    Collection,
    Logo,
}

impl MediaComponent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Navbar => "navbar",
            Self::Hero => "hero",
            Self::Collection => "collection",
            Self::Logo => "logo",
        }
    }
}

impl FromStr for MediaComponent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "navbar" => Ok(Self::Navbar),
            "hero" => Ok(Self::Hero),
            "collection" => Ok(Self::Collection),
            "logo" => Ok(Self::Logo),
            other => Err(other.to_owned()),
        }
    }
}

/// A stored upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: MediaId,
    pub user_id: UserId,
    pub website_id: String,
    /// Name on disk, `{component}_{unix_millis}{.ext}`.
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    /// Public path, `/uploads/{filename}`.
    pub url: String,
    pub component: MediaComponent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
