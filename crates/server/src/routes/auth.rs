use axum::{extract::{Request, State}, middleware::Next, response::Response, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use service::auth::domain::{Claims, LoginInput};
use service::auth::errors::AuthError;
use tracing::warn;

use crate::errors::JsonApiError;
use crate::extract::ValidJson;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
    pub message: &'static str,
}

#[utoipa::path(
    post, path = "/api/admin/login", tag = "auth",
    request_body = crate::openapi::LoginRequestDoc,
    responses(
        (status = 200, description = "Logged In", body = crate::openapi::LoginResponseDoc),
        (status = 400, description = "Malformed body", body = crate::openapi::ErrorDoc),
        (status = 401, description = "Invalid credentials", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    ValidJson(input): ValidJson<LoginRequest>,
) -> Result<Json<LoginResponse>, JsonApiError> {
    let result = state
        .auth
        .login(LoginInput { username: input.username, password: input.password })
        .await;
    let outcome = if result.is_ok() { "success" } else { "failure" };
    common::metrics::ADMIN_LOGINS.with_label_values(&[outcome]).inc();

    let session = result.map_err(|e| match e {
        AuthError::Unauthorized => JsonApiError::unauthorized("Invalid credentials"),
        other => other.into(),
    })?;
    Ok(Json(LoginResponse {
        token: session.token,
        token_type: "Bearer",
        expires_at: session.expires_at,
        message: "Login successful",
    }))
}

#[utoipa::path(
    get, path = "/api/admin/me", tag = "auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Claims of the presented token", body = crate::openapi::ClaimsDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn me(Extension(claims): Extension<Claims>) -> Json<Claims> {
    Json(claims)
}

fn bearer_token(req: &Request) -> Result<&str, AuthError> {
    let header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::TokenError("authorization header is not valid text".into()))?;
    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::TokenError("expected `Authorization: Bearer <token>`".into()))?;
    Ok(token)
}

/// Admin guard: requires a valid, unexpired bearer token and exposes its
/// [`Claims`] to handlers as a request extension.
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let claims = match bearer_token(&req).and_then(|t| state.auth.verify_token(t)) {
        Ok(claims) => claims,
        Err(e) => {
            warn!(path = %req.uri().path(), method = %req.method(), code = e.code(), error = %e, "admin request rejected");
            return Err(JsonApiError::unauthorized(&e.to_string()));
        }
    };
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
