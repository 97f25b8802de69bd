//! Media upload endpoints.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use webify_core::MediaId;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::MediaComponent;
use crate::services::media::{MediaError, MediaService, Upload};
use crate::state::AppState;

/// Fallback when the client sends no content type.
const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaQuery {
    pub website_id: Option<String>,
}

/// Multipart fields before validation.
#[derive(Default)]
struct UploadForm {
    file: Option<(Vec<u8>, String, String)>,
    component: Option<String>,
    item_id: Option<String>,
    website_id: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm> {
    let bad_form = |e: axum::extract::multipart::MultipartError| {
        AppError::BadRequest(format!("Invalid upload: {}", e.body_text()))
    };
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "file" => {
                let original_name = field.file_name().unwrap_or("upload").to_owned();
                let mime_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_MIME_TYPE)
                    .to_owned();
                let bytes = field.bytes().await.map_err(bad_form)?;
                form.file = Some((bytes.to_vec(), original_name, mime_type));
            }
            "component" => form.component = Some(field.text().await.map_err(bad_form)?),
            "itemId" => form.item_id = Some(field.text().await.map_err(bad_form)?),
            "websiteId" => form.website_id = Some(field.text().await.map_err(bad_form)?),
            _ => {}
        }
    }

    Ok(form)
}

/// `POST /api/upload` (multipart: `file`, `component`, `itemId?`, `websiteId?`)
pub async fn upload(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = read_form(multipart).await?;

    let (bytes, original_name, mime_type) = form.file.ok_or(MediaError::NoFile)?;
    let component: MediaComponent = form
        .component
        .unwrap_or_default()
        .parse()
        .map_err(MediaError::InvalidComponent)?;

    let media = MediaService::new(state.pool(), &state.config().uploads_dir)
        .upload(
            user.id,
            Upload {
                bytes,
                original_name,
                mime_type,
                component,
                item_id: form.item_id,
                website_id: form.website_id,
            },
        )
        .await?;

    Ok(Json(json!({ "success": true, "data": media })))
}

/// `GET /api/upload?websiteId=`
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MediaQuery>,
) -> Result<impl IntoResponse> {
    let media = MediaService::new(state.pool(), &state.config().uploads_dir)
        .list(user.id, query.website_id.as_deref())
        .await?;

    Ok(Json(json!({ "success": true, "data": media })))
}

/// `DELETE /api/upload/{id}`
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<MediaId>,
) -> Result<impl IntoResponse> {
    MediaService::new(state.pool(), &state.config().uploads_dir)
        .delete(user.id, id)
        .await?;

    Ok(Json(json!({ "success": true, "message": "Media deleted" })))
}
