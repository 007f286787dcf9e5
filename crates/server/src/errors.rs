use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::{FieldError, ModelError};
use serde_json::Value;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// JSON error body `{"error": <title>, "details": <optional>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: String,
    pub details: Option<Value>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &str, detail: Option<String>) -> Self {
        Self { status, title: title.to_string(), details: detail.map(Value::String) }
    }

    pub fn fields(errors: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            title: "Validation Error".into(),
            details: serde_json::to_value(errors).ok(),
        }
    }

    /// 500 with a generic body; the cause is only logged.
    pub fn internal(cause: &dyn std::fmt::Display) -> Self {
        error!(error = %cause, "internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
    }

    pub fn unauthorized(detail: &str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(detail.to_string()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => serde_json::json!({"error": self.title, "details": details}),
            None => serde_json::json!({"error": self.title}),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Invalid(fields) | ServiceError::Model(ModelError::Invalid(fields)) => Self::fields(fields),
            ServiceError::Model(ModelError::Validation(m)) => {
                Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(m))
            }
            ServiceError::NotFound(m) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(m)),
            ServiceError::Conflict(m) => Self::new(StatusCode::CONFLICT, "Conflict", Some(m)),
            other @ (ServiceError::Db(_) | ServiceError::Storage(_) | ServiceError::Model(ModelError::Db(_))) => {
                Self::internal(&other)
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        if e.is_unauthenticated() {
            warn!(code = e.code(), error = %e, "authentication failed");
            return Self::unauthorized(&e.to_string());
        }
        match e {
            AuthError::Validation(m) => Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(m)),
            other => {
                error!(code = other.code(), "auth failure");
                Self::internal(&other)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
}
