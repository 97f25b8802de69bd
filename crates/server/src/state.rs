//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::claude::{ClaudeClient, ClaudeError};
use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    claude: ClaudeClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Claude client can't be built from the config.
    pub fn new(config: ServerConfig, pool: PgPool) -> Result<Self, ClaudeError> {
        let claude = ClaudeClient::new(&config.claude)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                claude,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Claude client.
    #[must_use]
    pub fn claude(&self) -> &ClaudeClient {
        &self.inner.claude
    }
}
