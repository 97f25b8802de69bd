//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. The cookie only
//! carries an opaque session id.

use sqlx::PgPool;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, Session, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::ServerConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "token";

/// Default inactivity expiry (7 days).
const SESSION_EXPIRY: Duration = Duration::days(7);

/// Expiry for sessions opened through `/api/auth/login` (1 day).
const SHORT_SESSION_EXPIRY: Duration = Duration::days(1);

/// Create the session layer with `PostgreSQL` store.
///
/// The `tower_sessions` table must exist; `webify migrate` creates it.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &ServerConfig,
) -> SessionManagerLayer<PostgresStore> {
    let store = PostgresStore::new(pool.clone());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(SESSION_EXPIRY))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Drop this session's lifetime to one day of inactivity.
pub fn shorten_session(session: &Session) {
    session.set_expiry(Some(Expiry::OnInactivity(SHORT_SESSION_EXPIRY)));
}
