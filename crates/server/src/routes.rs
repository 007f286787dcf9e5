pub mod auth;
pub mod content;
pub mod export;
pub mod leads;
pub mod media;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use common::types::{DatabaseHealth, Health};
use service::content::{BlogPosts, CaseStudies, Services, Stats, Testimonials};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, Level};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

/// Where uploaded files live on disk and under which URL prefix they are served.
#[derive(Debug, Clone)]
pub struct StaticUploads {
    pub dir: String,
    pub public_prefix: String,
    pub max_bytes: usize,
}

impl StaticUploads {
    pub fn from_settings(cfg: &configs::UploadConfig) -> Self {
        Self { dir: cfg.dir.clone(), public_prefix: cfg.public_prefix.clone(), max_bytes: cfg.max_bytes }
    }
}

#[utoipa::path(get, path = "/api/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

#[utoipa::path(
    get, path = "/api/health/database", tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = crate::openapi::DatabaseHealthDoc),
        (status = 500, description = "Database unreachable", body = crate::openapi::DatabaseHealthDoc)
    )
)]
pub async fn database_health(State(state): State<ServerState>) -> (StatusCode, Json<DatabaseHealth>) {
    let probe = async {
        state.db.ping().await?;
        service::content::count::<Services>(&state.db).await.map_err(|e| sea_orm::DbErr::Custom(e.to_string()))
    };
    match probe.await {
        Ok(count) => (StatusCode::OK, Json(DatabaseHealth::connected(count))),
        Err(e) => {
            error!(service = "server", event = "db_health_failed", error = %e, "database health check failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(DatabaseHealth::disconnected()))
        }
    }
}

pub async fn metrics() -> Result<impl IntoResponse, JsonApiError> {
    let body = common::metrics::render().map_err(|e| JsonApiError::internal(&e))?;
    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}

/// Build the full application router: public reads, admin-guarded writes,
/// ops endpoints, API docs and the uploaded files.
pub fn build_router(state: ServerState, uploads: &StaticUploads, cors: CorsLayer) -> Router {
    let guard = || middleware::from_fn_with_state(state.clone(), auth::require_admin);

    // Ops + auth
    let ops = Router::new()
        .route("/api/health", get(health))
        .route("/api/health/database", get(database_health))
        .route("/metrics", get(metrics))
        .route("/api/admin/login", post(auth::login))
        .route("/api/admin/me", get(auth::me).route_layer(guard()))
        .route("/api/admin/export", get(export::export).route_layer(guard()));

    // Content entities
    let content = Router::new()
        .merge(content::routes::<Services>("services", &state))
        .merge(content::routes::<CaseStudies>("case-studies", &state))
        .merge(content::routes::<BlogPosts>("blog", &state))
        .merge(content::routes::<Testimonials>("testimonials", &state))
        .merge(content::routes::<Stats>("stats", &state));

    // Leads + media
    let intake = Router::new()
        .route("/api/leads", post(leads::capture).merge(get(leads::list).route_layer(guard())))
        .route("/api/leads/:form_type", get(leads::list_by_type).route_layer(guard()))
        .route(
            "/api/upload",
            post(media::upload)
                .route_layer(guard())
                .layer(DefaultBodyLimit::max(uploads.max_bytes.saturating_add(64 * 1024))),
        )
        .route("/api/media", get(media::list))
        .route("/api/media/:id", delete(media::delete).route_layer(guard()));

    ops.merge(content)
        .merge(intake)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest_service(&uploads.public_prefix, ServeDir::new(&uploads.dir))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
