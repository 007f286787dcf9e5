mod support;

use axum::http::StatusCode;
use serde_json::json;
use support::{get, json_request, multipart_upload, spawn, MAX_UPLOAD};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0x0d];

#[tokio::test]
async fn leads_are_captured_publicly_and_listed_for_admins() -> anyhow::Result<()> {
    let app = spawn().await?;
    let token = app.token().await?;

    let contact = json!({"name": "Grace", "email": "grace@example.com", "formType": "contact", "message": "Hi", "phone": "555"});
    let (status, body) = app.send(json_request("POST", "/api/leads", None, &contact)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"success": true, "message": "Lead captured successfully"}));

    let news = json!({"email": "news@example.com", "formType": "newsletter"});
    let (status, _) = app.send(json_request("POST", "/api/leads", None, &news)).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.send(get("/api/leads", None)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, all) = app.send(get("/api/leads", Some(&token))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().map(Vec::len), Some(2));
    assert_eq!(all[0]["metadata"]["phone"], "555");

    let (_, filtered) = app.send(get("/api/leads/newsletter", Some(&token))).await?;
    assert_eq!(filtered.as_array().map(Vec::len), Some(1));
    let (_, by_query) = app.send(get("/api/leads?formType=contact", Some(&token))).await?;
    assert_eq!(by_query[0]["email"], "grace@example.com");

    let (status, _) = app.send(get("/api/leads/carrier-pigeon", Some(&token))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn bad_leads_are_rejected() -> anyhow::Result<()> {
    let app = spawn().await?;

    let (status, body) = app
        .send(json_request("POST", "/api/leads", None, &json!({"email": "not-an-email", "formType": "contact"})))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "email");

    let (status, body) = app.send(json_request("POST", "/api/leads", None, &json!({"email": "a@b.co"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "formType");
    Ok(())
}

#[tokio::test]
async fn upload_list_serve_and_delete() -> anyhow::Result<()> {
    let app = spawn().await?;
    let token = app.token().await?;

    let (status, _) = app.send(multipart_upload(None, "logo.png", "image/png", PNG)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, uploaded) = app.send(multipart_upload(Some(&token), "logo.png", "image/png", PNG)).await?;
    assert_eq!(status, StatusCode::CREATED, "{uploaded}");
    assert_eq!(uploaded["originalName"], "logo.png");
    assert_eq!(uploaded["type"], "image/png");
    assert_eq!(uploaded["size"], PNG.len());
    let file_name = uploaded["fileName"].as_str().unwrap_or_default().to_string();
    assert!(file_name.ends_with(".png"));
    assert!(app.upload_dir.join(&file_name).exists());

    let url = uploaded["url"].as_str().unwrap_or_default().to_string();
    assert_eq!(url, format!("/uploads/{file_name}"));
    let (status, _) = app.send(get(&url, None)).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, listed) = app.send(get("/api/media", None)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let id = uploaded["id"].as_str().unwrap_or_default().to_string();
    let delete = axum::http::Request::builder()
        .method("DELETE")
        .uri(format!("/api/media/{id}"))
        .header(axum::http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(axum::body::Body::empty())?;
    let (status, body) = app.send(delete).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(!app.upload_dir.join(&file_name).exists());

    let again = axum::http::Request::builder()
        .method("DELETE")
        .uri(format!("/api/media/{id}"))
        .header(axum::http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(axum::body::Body::empty())?;
    let (status, _) = app.send(again).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn disallowed_and_oversized_uploads_are_rejected() -> anyhow::Result<()> {
    let app = spawn().await?;
    let token = app.token().await?;

    let (status, body) = app
        .send(multipart_upload(Some(&token), "run.sh", "application/x-sh", b"echo hi"))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "file");

    let big = vec![0u8; MAX_UPLOAD + 1024];
    let (status, body) = app.send(multipart_upload(Some(&token), "huge.png", "image/png", &big)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "file");

    let (status, body) = app.send(multipart_upload(Some(&token), "empty.png", "image/png", b"")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "file");

    let (_, listed) = app.send(get("/api/media", None)).await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
    Ok(())
}
