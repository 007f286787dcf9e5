use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use service::auth::service::AuthConfig;
use service::media::MediaStore;
use service::runtime;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, StaticUploads};
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the application for an already prepared state.
pub fn build_app(state: ServerState, uploads: &StaticUploads) -> Router {
    routes::build_router(state, uploads, build_cors())
}

fn bind_addr(cfg: &configs::ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}:{}: {e}", cfg.host, cfg.port)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl_c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: prepare directories and database, then serve until ctrl_c.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env("public", &cfg.uploads.dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let db = runtime::connect_and_migrate(&cfg.database).await?;

    let auth_cfg = AuthConfig::from_settings(&cfg.auth);
    let media = MediaStore::from_settings(&cfg.uploads);
    let state = ServerState::new(db, auth_cfg, media);

    match (cfg.auth.admin_username.as_deref(), cfg.auth.admin_password.as_deref()) {
        (Some(username), Some(password)) => {
            let admin = state.auth.bootstrap_admin(username, password).await?;
            info!(username = %admin.username, "admin account ready");
        }
        _ => warn!("no admin credentials configured; admin login is unavailable until one is provisioned"),
    }

    common::metrics::init();

    let uploads = StaticUploads::from_settings(&cfg.uploads);
    let app = build_app(state, &uploads);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}
