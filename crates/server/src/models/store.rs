//! Store (website project) domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use webify_core::{StoreId, UserId};

/// A user's named website project.
///
/// Serialized with snake_case keys, which is what store listings return.
#[derive(Debug, Clone, Serialize)]
pub struct Store {
    pub id: StoreId,
    pub user_id: UserId,
    pub store_name: String,
    /// Opaque public id (32 hex chars).
    pub store_id: String,
    pub created_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
}
