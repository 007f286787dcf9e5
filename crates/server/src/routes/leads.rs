use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use models::leads::{self, LeadInput};
use serde::{Deserialize, Serialize};
use service::leads as lead_service;

use crate::errors::JsonApiError;
use crate::extract::ValidJson;
use crate::state::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct LeadQuery {
    /// `contact`, `newsletter` or `lead_magnet`
    pub form_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CaptureResponse {
    pub success: bool,
    pub message: &'static str,
}

#[utoipa::path(
    post, path = "/api/leads", tag = "leads",
    request_body = crate::openapi::LeadRequestDoc,
    responses(
        (status = 201, description = "Lead captured", body = crate::openapi::SuccessDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn capture(
    State(state): State<ServerState>,
    ValidJson(input): ValidJson<LeadInput>,
) -> Result<(StatusCode, Json<CaptureResponse>), JsonApiError> {
    lead_service::capture(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(CaptureResponse { success: true, message: "Lead captured successfully" })))
}

#[utoipa::path(
    get, path = "/api/leads", tag = "leads",
    params(LeadQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Leads, oldest first", body = [crate::openapi::LeadDoc]),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<LeadQuery>,
) -> Result<Json<Vec<leads::Model>>, JsonApiError> {
    Ok(Json(lead_service::list(&state.db, q.form_type.as_deref()).await?))
}

#[utoipa::path(
    get, path = "/api/leads/{form_type}", tag = "leads",
    params(("form_type" = String, Path, description = "contact, newsletter or lead_magnet")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Leads of one form type", body = [crate::openapi::LeadDoc]),
        (status = 400, description = "Unknown form type", body = crate::openapi::ErrorDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list_by_type(
    State(state): State<ServerState>,
    Path(form_type): Path<String>,
) -> Result<Json<Vec<leads::Model>>, JsonApiError> {
    Ok(Json(lead_service::list(&state.db, Some(&form_type)).await?))
}
