use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use models::media_files;
use serde::Serialize;
use service::errors::ServiceError;
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub id: Uuid,
    pub url: String,
    pub file_name: String,
    pub original_name: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub mime_type: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

fn rejected(e: ServiceError) -> JsonApiError {
    common::metrics::UPLOADS.with_label_values(&["rejected"]).inc();
    e.into()
}

fn bad_multipart(e: MultipartError) -> JsonApiError {
    rejected(ServiceError::invalid("file", e.body_text()))
}

#[utoipa::path(
    post, path = "/api/upload", tag = "media",
    request_body(content = crate::openapi::UploadRequestDoc, content_type = "multipart/form-data"),
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Stored", body = crate::openapi::UploadResponseDoc),
        (status = 400, description = "Missing, empty, oversized or disallowed file", body = crate::openapi::ErrorDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), JsonApiError> {
    let policy = &state.media.policy;
    while let Some(mut field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.name() != Some("file") {
            continue;
        }
        let original_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        policy.check_type(content_type.as_deref()).map_err(rejected)?;

        // stop reading as soon as the ceiling is passed
        let mut bytes = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(bad_multipart)? {
            bytes.extend_from_slice(&chunk);
            if bytes.len() > policy.max_bytes {
                break;
            }
        }
        policy.check_size(bytes.len()).map_err(rejected)?;

        let row = state.media.store(&state.db, &original_name, content_type.as_deref(), &bytes).await?;
        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                id: row.id,
                url: row.url,
                file_name: row.file_name,
                original_name: row.original_name,
                size: row.size,
                mime_type: row.mime_type,
            }),
        ));
    }
    Err(rejected(ServiceError::invalid("file", "no file uploaded")))
}

#[utoipa::path(
    get, path = "/api/media", tag = "media",
    responses((status = 200, description = "Uploaded files, newest first", body = [crate::openapi::MediaFileDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<media_files::Model>>, JsonApiError> {
    Ok(Json(state.media.list(&state.db).await?))
}

#[utoipa::path(
    delete, path = "/api/media/{id}", tag = "media",
    params(("id" = Uuid, Path, description = "Media file id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::SuccessDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<DeleteResponse>, JsonApiError> {
    state.media.delete(&state.db, &id).await?;
    Ok(Json(DeleteResponse { success: true }))
}
