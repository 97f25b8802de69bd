//! Persisted website configuration.

use chrono::{DateTime, Utc};
use serde::Serialize;

use webify_core::site::WebsiteConfig;
use webify_core::{UserId, WebsiteId};

/// Store id used when a request does not name one.
pub const DEFAULT_STORE_ID: &str = "default";

/// A saved [`WebsiteConfig`] for one user and store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteDocument {
    pub id: WebsiteId,
    pub user_id: UserId,
    pub store_id: String,
    #[serde(flatten)]
    pub config: WebsiteConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
