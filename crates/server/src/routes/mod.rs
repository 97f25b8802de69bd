//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (database)
//!
//! # Auth (session cookie)
//! POST /api/auth/signup         - Create account, open 7-day session
//! POST /api/auth/signin         - Password sign in, 7-day session
//! POST /api/auth/login          - Password sign in, 1-day session
//! POST /api/auth/signout        - Destroy session
//! GET  /api/auth/me             - Current session user
//! POST /api/auth/callback       - Link identity-provider account, open session
//!
//! # User (identity provider)
//! GET  /api/user/me             - Linked local user
//! POST /api/user/sync           - Refresh/link/create local user
//! POST /api/user/store          - Create a store
//! GET  /api/user/stores         - List stores
//!
//! # Website (requires session)
//! GET  /api/website             - Load config (?storeId=)
//! POST /api/website             - Save config
//!
//! # Upload (requires session)
//! POST   /api/upload            - Multipart upload
//! GET    /api/upload            - List uploads (?websiteId=)
//! DELETE /api/upload/{id}       - Delete upload
//!
//! # Assistant (requires session)
//! POST   /api/assistant              - Natural-language section edit
//! POST   /api/assistant/hero-content - Generate hero copy
//! GET    /api/assistant/history      - Chat history
//! DELETE /api/assistant/history      - Clear chat history
//! ```

pub mod assistant;
pub mod auth;
pub mod upload;
pub mod user;
pub mod website;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .route("/login", post(auth::login))
        .route("/signout", post(auth::signout))
        .route("/me", get(auth::me))
        .route("/callback", post(auth::callback))
}

/// Create the identity-provider user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(user::me))
        .route("/sync", post(user::sync))
        .route("/store", post(user::create_store))
        .route("/stores", get(user::stores))
}

/// Create the upload routes router.
pub fn upload_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", post(upload::upload).get(upload::list))
        .route("/{id}", delete(upload::delete))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// Create the assistant routes router.
pub fn assistant_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(assistant::chat))
        .route("/hero-content", post(assistant::hero_content))
        .route(
            "/history",
            get(assistant::history).delete(assistant::clear_history),
        )
}

/// Create all API routes.
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/user", user_routes())
        .route("/api/website", get(website::show).post(website::save))
        .nest("/api/upload", upload_routes(max_upload_bytes))
        .nest("/api/assistant", assistant_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{ClaudeConfig, IdentityConfig, ServerConfig};

    fn test_state() -> AppState {
        let config = ServerConfig {
            database_url: SecretString::from("postgres://localhost/webify_test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_owned(),
            uploads_dir: PathBuf::from("target/test-uploads"),
            max_upload_bytes: 1024,
            identity: IdentityConfig::default(),
            claude: ClaudeConfig {
                api_key: SecretString::from("sk-ant-test-9fQ2xLr7Vb"),
                model: "claude-sonnet-4-20250514".to_owned(),
                api_url: "http://127.0.0.1:9/v1/messages".parse().unwrap(),
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        };
        // Never connects: these requests are rejected before touching the pool.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/webify_test")
            .unwrap();
        AppState::new(config, pool).unwrap()
    }

    async fn call(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let app = routes(1024).with_state(test_state());
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_website_requires_session() {
        let request = Request::get("/api/website").body(Body::empty()).unwrap();
        let (status, body) = call(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Not authenticated");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_user_routes_require_identity() {
        let request = Request::get("/api/user/me")
            .header("x-identity-user-id", "ext-1")
            .body(Body::empty())
            .unwrap();
        // Headers are ignored unless the gateway is trusted.
        let (status, body) = call(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_assistant_requires_session() {
        let request = Request::post("/api/assistant")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"message":"make it red","config":{}}"#))
            .unwrap();
        let (status, _) = call(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
