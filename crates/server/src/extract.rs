use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;

use crate::errors::JsonApiError;

/// `Json<T>` whose rejections (malformed body, wrong field types, missing
/// content type) become a 400 in the API's error shape.
pub struct ValidJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid JSON", Some(rejection.body_text()))),
        }
    }
}
