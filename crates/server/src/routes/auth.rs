//! Password and identity-provider authentication.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_sessions::Session;

use webify_core::UserId;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{
    ExternalIdentity, RequireAuth, clear_current_user, set_current_user, shorten_session,
};
use crate::models::{CurrentUser, User};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Signup body. Missing fields deserialize blank and are rejected by the service.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Signin/login body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Identity callback body; both fall back to the gateway headers.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CallbackRequest {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// User as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl UserBody {
    /// `{id, name, email}`.
    #[must_use]
    pub fn summary(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.to_string(),
            created_at: None,
            external_id: None,
        }
    }

    /// Adds `createdAt`.
    #[must_use]
    pub fn profile(user: &User) -> Self {
        Self {
            created_at: Some(user.created_at),
            ..Self::summary(user)
        }
    }

    /// Adds `createdAt` and `externalId`.
    #[must_use]
    pub fn linked(user: &User) -> Self {
        Self {
            external_id: user.external_id.clone(),
            ..Self::profile(user)
        }
    }
}

async fn start_session(session: &Session, user: &User) -> Result<()> {
    set_current_user(session, &CurrentUser::from(user)).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}

/// `POST /api/auth/signup`
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse> {
    let user = AuthService::new(state.pool())
        .register_with_password(&body.name, &body.email, &body.password)
        .await?;

    start_session(&session, &user).await?;
    tracing::info!(user_id = %user.id, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "user": UserBody::summary(&user),
        })),
    ))
}

/// `POST /api/auth/signin`
pub async fn signin(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<SigninRequest>,
) -> Result<impl IntoResponse> {
    let user = AuthService::new(state.pool())
        .login_with_password(&body.email, &body.password)
        .await?;

    start_session(&session, &user).await?;
    tracing::info!(user_id = %user.id, "User signed in");

    Ok(Json(json!({
        "message": "Sign in successful",
        "user": UserBody::summary(&user),
    })))
}

/// `POST /api/auth/login`: like signin, with a one-day session.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<SigninRequest>,
) -> Result<impl IntoResponse> {
    let user = AuthService::new(state.pool())
        .login_with_password(&body.email, &body.password)
        .await?;

    start_session(&session, &user).await?;
    shorten_session(&session);
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
    })))
}

/// `POST /api/auth/signout`
pub async fn signout(session: Session) -> Result<impl IntoResponse> {
    clear_current_user(&session).await?;
    clear_sentry_user();

    Ok(Json(json!({ "message": "Successfully signed out" })))
}

/// `GET /api/auth/me`
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    session: Session,
) -> Result<impl IntoResponse> {
    match AuthService::new(state.pool()).get_user(current.id).await {
        Ok(user) => Ok(Json(UserBody::profile(&user))),
        Err(AuthError::UserNotFound) => {
            // Account deleted under a live session.
            clear_current_user(&session).await?;
            Err(AuthError::UserNotFound.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// `POST /api/auth/callback`: link the identity-provider account to a local
/// user and open a session for it.
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    identity: ExternalIdentity,
    body: Option<Json<CallbackRequest>>,
) -> Result<impl IntoResponse> {
    let body = body.map(|Json(body)| body).unwrap_or_default();
    let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let (Some(email), Some(name)) = (
        non_blank(body.email).or(identity.email),
        non_blank(body.name).or(identity.name),
    ) else {
        return Err(AppError::BadRequest("Email and name are required".to_owned()));
    };

    let (user, outcome) = AuthService::new(state.pool())
        .sync_identity(&identity.external_id, &email, &name)
        .await?;

    start_session(&session, &user).await?;
    tracing::info!(user_id = %user.id, outcome = ?outcome, "Identity callback completed");

    Ok(Json(json!({
        "message": "Authentication successful",
        "user": UserBody::linked(&user),
    })))
}
