#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use serde_json::Value;
use server::routes::StaticUploads;
use server::ServerState;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::media::MediaStore;
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &str = "integration-test-secret-0123456789";
pub const ADMIN: &str = "admin";
pub const PASSWORD: &str = "Sup3rSecret!";
pub const MAX_UPLOAD: usize = 64 * 1024;

pub struct TestApp {
    pub router: Router,
    pub state: ServerState,
    pub upload_dir: std::path::PathBuf,
}

pub fn auth_config(ttl: chrono::Duration) -> AuthConfig {
    AuthConfig { jwt_secret: SECRET.into(), token_ttl: ttl, password_algorithm: "argon2id".into() }
}

/// Fresh in-memory database, migrated, with one admin and a private upload dir.
pub async fn spawn() -> anyhow::Result<TestApp> {
    let db = models::db::connect_memory().await?;
    service::runtime::migrate(&db).await?;

    let upload_dir = std::env::temp_dir().join(format!("uploads_{}", Uuid::new_v4()));
    let mut uploads = configs::UploadConfig::default();
    uploads.dir = upload_dir.to_string_lossy().into_owned();
    uploads.max_bytes = MAX_UPLOAD;

    let state = ServerState::new(db, auth_config(chrono::Duration::hours(1)), MediaStore::from_settings(&uploads));
    state.auth.bootstrap_admin(ADMIN, PASSWORD).await?;

    let router = server::build_app(state.clone(), &StaticUploads::from_settings(&uploads));
    Ok(TestApp { router, state, upload_dir })
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
        let resp: Response<Body> = self.router.clone().oneshot(req).await?;
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        Ok((status, body))
    }

    pub async fn token(&self) -> anyhow::Result<String> {
        let (status, body) = self
            .send(json_request("POST", "/api/admin/login", None, &serde_json::json!({"username": ADMIN, "password": PASSWORD})))
            .await?;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        Ok(body["token"].as_str().unwrap_or_default().to_string())
    }

    /// A token signed with the right secret whose expiry is already in the past.
    pub async fn expired_token(&self) -> anyhow::Result<String> {
        let repo = Arc::new(SeaOrmAuthRepository::new(self.state.db.clone()));
        let svc = AuthService::new(repo, auth_config(chrono::Duration::seconds(-120)));
        let session = self.state.auth.login(service::auth::domain::LoginInput {
            username: ADMIN.into(),
            password: PASSWORD.into(),
        })
        .await?;
        let (token, _) = svc.issue_token(&session.user)?;
        Ok(token)
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    raw_request(method, uri, token, serde_json::to_vec(body).unwrap())
}

pub fn raw_request(method: &str, uri: &str, token: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    builder.body(Body::from(body)).unwrap()
}

pub const BOUNDARY: &str = "----brand-site-test-boundary";

/// Single-part `multipart/form-data` body with a `file` field.
pub fn multipart_upload(token: Option<&str>, file_name: &str, mime: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n").as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"));
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    builder.body(Body::from(body)).unwrap()
}
