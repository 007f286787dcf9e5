mod support;

use axum::http::StatusCode;
use serde_json::json;
use support::{get, json_request, raw_request, spawn, ADMIN, PASSWORD};

#[tokio::test]
async fn admin_can_log_in_and_read_claims() -> anyhow::Result<()> {
    let app = spawn().await?;

    let (status, body) = app
        .send(json_request("POST", "/api/admin/login", None, &json!({"username": ADMIN, "password": PASSWORD})))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["message"], "Login successful");
    assert!(body["expiresAt"].is_string());
    let token = body["token"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty());

    let (status, claims) = app.send(get("/api/admin/me", Some(&token))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(claims["sub"], ADMIN);
    assert!(claims["exp"].as_i64() > claims["iat"].as_i64());
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() -> anyhow::Result<()> {
    let app = spawn().await?;

    let (s1, b1) = app
        .send(json_request("POST", "/api/admin/login", None, &json!({"username": ADMIN, "password": "nope-nope"})))
        .await?;
    let (s2, b2) = app
        .send(json_request("POST", "/api/admin/login", None, &json!({"username": "ghost", "password": PASSWORD})))
        .await?;
    assert_eq!(s1, StatusCode::UNAUTHORIZED);
    assert_eq!(s2, StatusCode::UNAUTHORIZED);
    assert_eq!(b1, b2);
    assert_eq!(b1["error"], "Unauthorized");
    Ok(())
}

#[tokio::test]
async fn malformed_login_body_is_a_bad_request() -> anyhow::Result<()> {
    let app = spawn().await?;
    let (status, body) = app.send(raw_request("POST", "/api/admin/login", None, b"{\"username\":".to_vec())).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON");
    Ok(())
}

#[tokio::test]
async fn admin_routes_reject_missing_bad_and_expired_tokens() -> anyhow::Result<()> {
    let app = spawn().await?;
    let expired = app.expired_token().await?;

    for token in [None, Some("not-a-jwt"), Some(expired.as_str())] {
        let (status, body) = app.send(get("/api/admin/services", token)).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "token {token:?}");
        assert_eq!(body["error"], "Unauthorized");

        let (status, _) = app
            .send(json_request("POST", "/api/services", token, &json!({"title": "Audit", "description": "d"})))
            .await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "token {token:?}");
    }

    // nothing slipped through
    let (_, listed) = app.send(get("/api/services", None)).await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
    Ok(())
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() -> anyhow::Result<()> {
    use service::auth::service::{AuthConfig, AuthService};
    use std::sync::Arc;

    let app = spawn().await?;
    let repo = Arc::new(service::auth::repo::seaorm::SeaOrmAuthRepository::new(app.state.db.clone()));
    let other = AuthService::new(
        repo,
        AuthConfig { jwt_secret: "some-other-secret".into(), token_ttl: chrono::Duration::hours(1), password_algorithm: "argon2id".into() },
    );
    let session = other
        .login(service::auth::domain::LoginInput { username: ADMIN.into(), password: PASSWORD.into() })
        .await?;

    let (status, _) = app.send(get("/api/admin/me", Some(&session.token))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}
