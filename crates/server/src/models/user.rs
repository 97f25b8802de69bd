//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use webify_core::{Email, UserId};

/// How the account was first established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthSource {
    /// Email and password signup.
    Password,
    /// Created or linked through the identity provider.
    Identity,
}

impl AuthSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Identity => "identity",
        }
    }

    /// Parse the stored column value.
    #[must_use]
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "password" => Some(Self::Password),
            "identity" => Some(Self::Identity),
            _ => None,
        }
    }
}

/// A builder account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    /// Identity-provider user id, once linked.
    pub external_id: Option<String>,
    pub auth_source: AuthSource,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
