use axum::{extract::State, Json};
use service::backup::{self, ContentExport};

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/admin/export", tag = "admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Every content record, visible or not"),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn export(State(state): State<ServerState>) -> Result<Json<ContentExport>, JsonApiError> {
    Ok(Json(backup::export(&state.db).await?))
}
