//! Identity-provider account endpoints and store management.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::db::users::IdentitySync;
use crate::error::{AppError, Result};
use crate::middleware::ExternalIdentity;
use crate::services::auth::{AuthError, AuthService};
use crate::services::stores::StoreService;
use crate::state::AppState;

use super::auth::UserBody;

const SYNC_REQUIRED: &str = "User not found in database, sync required";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SyncRequest {
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateStoreRequest {
    pub store_name: String,
}

/// `GET /api/user/me`
pub async fn me(
    State(state): State<AppState>,
    identity: ExternalIdentity,
) -> Result<impl IntoResponse> {
    let user = AuthService::new(state.pool())
        .get_user_by_external_id(&identity.external_id)
        .await
        .map_err(|e| match e {
            AuthError::UserNotFound => AppError::NotFound(SYNC_REQUIRED.to_owned()),
            other => other.into(),
        })?;

    Ok(Json(UserBody::linked(&user)))
}

/// `POST /api/user/sync`: refresh, link or create the local account.
pub async fn sync(
    State(state): State<AppState>,
    identity: ExternalIdentity,
    Json(body): Json<SyncRequest>,
) -> Result<impl IntoResponse> {
    let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
    let (Some(email), Some(name)) = (present(body.email), present(body.name)) else {
        return Err(AppError::BadRequest("Missing required fields".to_owned()));
    };

    let (user, outcome) = AuthService::new(state.pool())
        .sync_identity(&identity.external_id, &email, &name)
        .await?;

    let message = match outcome {
        IdentitySync::Updated => "User updated successfully",
        IdentitySync::Linked => "User linked successfully",
        IdentitySync::Created => "User created successfully",
    };
    tracing::info!(user_id = %user.id, outcome = ?outcome, "Identity synced");

    Ok(Json(json!({
        "message": message,
        "user": UserBody::linked(&user),
    })))
}

/// `POST /api/user/store`
pub async fn create_store(
    State(state): State<AppState>,
    identity: ExternalIdentity,
    Json(body): Json<CreateStoreRequest>,
) -> Result<impl IntoResponse> {
    if body.store_name.trim().is_empty() {
        return Err(AppError::BadRequest("Store name is required".to_owned()));
    }

    let user = AuthService::new(state.pool())
        .get_user_by_external_id(&identity.external_id)
        .await?;
    let store = StoreService::new(state.pool())
        .create(user.id, &body.store_name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Store created successfully",
            "store": store,
        })),
    ))
}

/// `GET /api/user/stores`, most recently opened first.
pub async fn stores(
    State(state): State<AppState>,
    identity: ExternalIdentity,
) -> Result<impl IntoResponse> {
    let user = match AuthService::new(state.pool())
        .get_user_by_external_id(&identity.external_id)
        .await
    {
        Ok(user) => user,
        Err(AuthError::UserNotFound) => {
            return Ok(Json(json!({ "message": SYNC_REQUIRED, "stores": [] })));
        }
        Err(e) => return Err(e.into()),
    };

    let stores = StoreService::new(state.pool()).list(user.id).await?;
    Ok(Json(json!({ "stores": stores })))
}
