//! Assistant chat endpoints.

use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use webify_core::site::WebsiteConfig;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequireAuth;
use crate::models::{ChatTurn, session_keys};
use crate::services::assistant::{AssistantService, record_exchange};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssistantRequest {
    pub message: String,
    pub config: WebsiteConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroContentRequest {
    pub store_name: String,
    pub store_description: String,
}

async fn load_history(session: &Session) -> Result<Vec<ChatTurn>> {
    Ok(session
        .get::<Vec<ChatTurn>>(session_keys::ASSISTANT_HISTORY)
        .await?
        .unwrap_or_default())
}

/// `POST /api/assistant`: apply a natural-language edit to the active section.
///
/// Model and parsing failures still answer 200 with an apology and the
/// section unchanged.
pub async fn chat(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Json(body): Json<AssistantRequest>,
) -> Result<impl IntoResponse> {
    let instruction = body.message.trim();
    if instruction.is_empty() {
        return Err(AppError::BadRequest("Message is required".to_owned()));
    }

    let section = body
        .config
        .active_section()
        .map_or("none", |section| section.config_key());
    add_breadcrumb("assistant", "Edit requested", Some(&[("section", section)]));
    tracing::info!(user_id = %user.id, section, "Assistant edit requested");

    let reply = AssistantService::new(state.claude())
        .process(instruction, &body.config)
        .await;

    let mut history = load_history(&session).await?;
    record_exchange(&mut history, instruction, &reply.message);
    session
        .insert(session_keys::ASSISTANT_HISTORY, &history)
        .await?;

    Ok(Json(reply))
}

/// `POST /api/assistant/hero-content`
pub async fn hero_content(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(body): Json<HeroContentRequest>,
) -> impl IntoResponse {
    let content = AssistantService::new(state.claude())
        .generate_hero_content(&body.store_name, &body.store_description)
        .await;

    Json(content)
}

/// `GET /api/assistant/history`
pub async fn history(RequireAuth(_user): RequireAuth, session: Session) -> Result<impl IntoResponse> {
    let messages = load_history(&session).await?;
    Ok(Json(json!({ "messages": messages })))
}

/// `DELETE /api/assistant/history`
pub async fn clear_history(
    RequireAuth(_user): RequireAuth,
    session: Session,
) -> Result<impl IntoResponse> {
    session
        .remove::<Vec<ChatTurn>>(session_keys::ASSISTANT_HISTORY)
        .await?;
    Ok(Json(json!({ "success": true })))
}
