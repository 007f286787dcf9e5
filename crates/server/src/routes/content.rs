//! Generic handlers mounted once per content [`Resource`].

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use service::content::{self, Resource, Scope};

use crate::errors::JsonApiError;
use crate::extract::ValidJson;
use crate::routes::auth::require_admin;
use crate::state::ServerState;

pub async fn list_public<R: Resource>(State(state): State<ServerState>) -> Result<Json<Vec<R::Model>>, JsonApiError> {
    Ok(Json(content::list::<R>(&state.db, Scope::Public).await?))
}

pub async fn list_admin<R: Resource>(State(state): State<ServerState>) -> Result<Json<Vec<R::Model>>, JsonApiError> {
    Ok(Json(content::list::<R>(&state.db, Scope::Admin).await?))
}

pub async fn get_public<R: Resource>(
    State(state): State<ServerState>,
    Path(key): Path<String>,
) -> Result<Json<R::Model>, JsonApiError> {
    Ok(Json(content::get::<R>(&state.db, &key, Scope::Public).await?))
}

pub async fn get_admin<R: Resource>(
    State(state): State<ServerState>,
    Path(key): Path<String>,
) -> Result<Json<R::Model>, JsonApiError> {
    Ok(Json(content::get::<R>(&state.db, &key, Scope::Admin).await?))
}

pub async fn create<R: Resource>(
    State(state): State<ServerState>,
    ValidJson(input): ValidJson<R::Input>,
) -> Result<(StatusCode, Json<R::Model>), JsonApiError> {
    let created = content::create::<R>(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update<R: Resource>(
    State(state): State<ServerState>,
    Path(key): Path<String>,
    ValidJson(input): ValidJson<R::Input>,
) -> Result<Json<R::Model>, JsonApiError> {
    Ok(Json(content::update::<R>(&state.db, &key, input).await?))
}

/// Public reads at `/api/<base>`, admin writes on the same paths and
/// unfiltered reads under `/api/admin/<base>`.
pub fn routes<R: Resource>(base: &str, state: &ServerState) -> Router<ServerState> {
    let guard = || middleware::from_fn_with_state(state.clone(), require_admin);
    Router::new()
        .route(
            &format!("/api/{base}"),
            get(list_public::<R>).merge(post(create::<R>).route_layer(guard())),
        )
        .route(
            &format!("/api/{base}/:key"),
            get(get_public::<R>).merge(put(update::<R>).route_layer(guard())),
        )
        .route(&format!("/api/admin/{base}"), get(list_admin::<R>).route_layer(guard()))
        .route(&format!("/api/admin/{base}/:key"), get(get_admin::<R>).route_layer(guard()))
}
