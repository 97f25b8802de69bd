//! Identity-provider extractor.
//!
//! Requests under `/api/user` and `/api/auth/callback` act on behalf of an
//! identity-provider account. The id comes from the auth gateway's headers
//! when the server is configured to trust them, otherwise from a linked
//! session.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

/// Gateway header carrying the identity-provider user id.
pub const USER_ID_HEADER: &str = "x-identity-user-id";
/// Gateway header carrying the account email.
pub const EMAIL_HEADER: &str = "x-identity-email";
/// Gateway header carrying the display name.
pub const NAME_HEADER: &str = "x-identity-name";

/// The caller's identity-provider account.
#[derive(Debug, Clone)]
pub struct ExternalIdentity {
    pub external_id: String,
    /// Email claimed by the gateway, if any.
    pub email: Option<String>,
    /// Name claimed by the gateway, if any.
    pub name: Option<String>,
}

impl ExternalIdentity {
    fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };

        Some(Self {
            external_id: header(USER_ID_HEADER)?,
            email: header(EMAIL_HEADER),
            name: header(NAME_HEADER),
        })
    }
}

impl<S> FromRequestParts<S> for ExternalIdentity
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        if state.config().identity.trust_gateway_headers
            && let Some(identity) = Self::from_headers(&parts.headers)
        {
            return Ok(identity);
        }

        let linked = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await?
                .and_then(|user| {
                    let email = user.email.as_str().to_owned();
                    user.external_id.map(|external_id| Self {
                        external_id,
                        email: Some(email),
                        name: Some(user.name),
                    })
                }),
            None => None,
        };

        linked.ok_or_else(|| AppError::Unauthorized("Unauthorized".to_owned()))
    }
}
