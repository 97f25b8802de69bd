//! Website configuration load/save.

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use webify_core::site::WebsiteConfig;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::website::WebsiteService;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreQuery {
    pub store_id: Option<String>,
}

/// Save body: an optional store id plus any subset of sections.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWebsiteRequest {
    #[serde(default)]
    pub store_id: Option<String>,
    #[serde(flatten)]
    pub config: WebsiteConfig,
}

/// `GET /api/website?storeId=`
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<StoreQuery>,
) -> Result<impl IntoResponse> {
    let document = WebsiteService::new(state.pool())
        .load(user.id, query.store_id.as_deref())
        .await?;

    Ok(Json(json!({ "success": true, "data": document })))
}

/// `POST /api/website`
pub async fn save(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<SaveWebsiteRequest>,
) -> Result<impl IntoResponse> {
    let document = WebsiteService::new(state.pool())
        .save(user.id, body.store_id.as_deref(), body.config)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": document,
        "message": "Website configuration saved",
    })))
}
