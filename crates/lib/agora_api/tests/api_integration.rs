//! Integration tests: build the router over an in-memory store and drive it
//! with `oneshot` requests.

use std::sync::Arc;

use agora_api::{AppState, config::ApiConfig};
use agora_core::memory::MemoryStore;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_config() -> ApiConfig {
    ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        database_url: "postgres://unused".into(),
        jwt_secret: "test-secret".into(),
        token_ttl_secs: 3600,
    }
}

fn app() -> Router {
    let store = Arc::new(MemoryStore::new());
    agora_api::router(AppState::new(store, test_config()))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(body) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse JSON")
    };
    (status, json)
}

async fn register_and_login(app: &Router, username: &str, password: &str) -> (i64, String) {
    let creds = json!({ "username": username, "password": password });
    let (status, body) = send(app, "POST", "/api/v1/auth/register", None, Some(creds.clone())).await;
    assert_eq!(status, StatusCode::OK, "register: {body}");
    let user_id = body["user_id"].as_i64().expect("user_id");

    let (status, body) = send(app, "POST", "/api/v1/auth/login", None, Some(creds)).await;
    assert_eq!(status, StatusCode::OK, "login: {body}");
    let token = body["token"].as_str().expect("token").to_string();
    (user_id, token)
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn register_login_validate_flow() {
    let app = app();
    let (user_id, token) = register_and_login(&app, "alice", "secret123").await;
    assert_eq!(user_id, 1);
    assert!(!token.is_empty());

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/validate",
        None,
        Some(json!({ "token": token })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valid": true, "user_id": 1, "role": "user" }));

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/validate",
        None,
        Some(json!({ "token": "garbage" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valid": false, "user_id": 0, "role": "" }));
}

#[tokio::test]
async fn bad_credentials_share_one_response() {
    let app = app();
    register_and_login(&app, "alice", "secret123").await;

    let wrong = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "alice", "password": "wrongpass" })),
    )
    .await;
    let unknown = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "mallory", "password": "wrongpass" })),
    )
    .await;

    assert_eq!(wrong.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong, unknown);
    assert_eq!(wrong.1["message"], "invalid username or password");
}

#[tokio::test]
async fn duplicate_username_is_conflict() {
    let app = app();
    register_and_login(&app, "alice", "secret123").await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({ "username": "alice", "password": "another" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn empty_and_oversize_passwords_are_bad_requests() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({ "username": "bob", "password": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({ "username": "bob", "password": "p".repeat(80) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "password too long");
}

#[tokio::test]
async fn get_user_hides_digest() {
    let app = app();
    let (user_id, _) = register_and_login(&app, "alice", "secret123").await;

    let (status, body) = send(&app, "GET", &format!("/api/v1/auth/user/{user_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "user");
    assert!(body.get("password_hash").is_none());

    let (status, _) = send(&app, "GET", "/api/v1/auth/user/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn protected_routes_require_bearer() {
    let app = app();
    let post = Some(json!({ "title": "t", "content": "c" }));

    let (status, body) = send(&app, "POST", "/api/v1/posts", None, post.clone()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let (status, _) = send(&app, "POST", "/api/v1/posts", Some("garbage"), post).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Reads stay public.
    let (status, body) = send(&app, "GET", "/api/v1/posts", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "posts": [] }));
}

#[tokio::test]
async fn post_lifecycle_enforces_authorship() {
    let app = app();
    let (alice_id, alice) = register_and_login(&app, "alice", "secret123").await;
    let (_, bob) = register_and_login(&app, "bob", "hunter22").await;

    let (status, post) = send(
        &app,
        "POST",
        "/api/v1/posts",
        Some(&alice),
        Some(json!({ "title": "Hello", "content": "First!" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(post["author_id"], alice_id);
    assert_eq!(post["author_name"], "alice");
    let uri = format!("/api/v1/posts/{}", post["id"]);

    let edit = Some(json!({ "title": "Hijacked", "content": "!" }));
    let (status, _) = send(&app, "PUT", &uri, Some(&bob), edit).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let edit = Some(json!({ "title": "Hello again", "content": "Edited" }));
    let (status, body) = send(&app, "PUT", &uri, Some(&alice), edit).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Hello again");

    let (status, _) = send(&app, "DELETE", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "DELETE", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn comments_on_posts() {
    let app = app();
    let (_, alice) = register_and_login(&app, "alice", "secret123").await;
    let (_, bob) = register_and_login(&app, "bob", "hunter22").await;

    let (_, post) = send(
        &app,
        "POST",
        "/api/v1/posts",
        Some(&alice),
        Some(json!({ "title": "Topic", "content": "Discuss" })),
    )
    .await;
    let uri = format!("/api/v1/posts/{}/comments", post["id"]);

    let (status, comment) = send(
        &app,
        "POST",
        &uri,
        Some(&bob),
        Some(json!({ "content": "Nice" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["author_name"], "bob");

    let (status, body) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comments"].as_array().map(Vec::len), Some(1));

    let (status, _) = send(&app, "GET", "/api/v1/posts/999/comments", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chat_history_round_trip() {
    let app = app();
    let (_, alice) = register_and_login(&app, "alice", "secret123").await;

    for text in ["one", "two", "three"] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/chat/messages",
            Some(&alice),
            Some(json!({ "content": text })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/api/v1/chat/messages?limit=2", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let contents: Vec<_> = body["messages"]
        .as_array()
        .expect("messages")
        .iter()
        .map(|m| m["content"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(contents, ["two", "three"]);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/chat/messages",
        Some(&alice),
        Some(json!({ "content": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
