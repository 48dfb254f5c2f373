//! Authentication API integration tests
//! Drives the full router with in-memory state

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;
use common::{create_test_state, seeded_directory};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login_token(app: &axum::Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"username": username, "password": password}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_login_success() {
    let state = create_test_state(seeded_directory());
    let app = specimen_registry::routes::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"username": "alice", "password": "secret123"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["username"], "alice");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let state = create_test_state(seeded_directory());
    let app = specimen_registry::routes::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"username": "alice", "password": "nope"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["token"].is_null());
}

#[tokio::test]
async fn test_protected_route_without_token_gets_401_with_login_url() {
    let state = create_test_state(seeded_directory());
    let app = specimen_registry::routes::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/auth/revocations")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["login_url"], "/api/auth/login");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_admin_route_with_non_admin_token_gets_403() {
    let state = create_test_state(seeded_directory());
    let app = specimen_registry::routes::create_router(state);

    let token = login_token(&app, "alice", "secret123").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/auth/revocations")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    // 403 bodies carry no login URL; the caller is authenticated
    assert!(body.get("login_url").is_none());
}

#[tokio::test]
async fn test_admin_route_with_admin_token_succeeds() {
    let state = create_test_state(seeded_directory());
    let app = specimen_registry::routes::create_router(state);

    let token = login_token(&app, "admin", "AdminPass123").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/auth/revocations")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["revoked_tokens"].is_number());
}

#[tokio::test]
async fn test_lowercase_bearer_scheme_is_rejected() {
    let state = create_test_state(seeded_directory());
    let app = specimen_registry::routes::create_router(state);

    let token = login_token(&app, "admin", "AdminPass123").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/auth/revocations")
                .header(header::AUTHORIZATION, format!("bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let state = create_test_state(seeded_directory());
    let app = specimen_registry::routes::create_router(state);

    for uri in ["/", "/health", "/docs", "/api/auth/info"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "expected 200 for {uri}");
    }
}

#[tokio::test]
async fn test_verify_endpoint_round_trip() {
    let state = create_test_state(seeded_directory());
    let app = specimen_registry::routes::create_router(state);

    let token = login_token(&app, "alice", "secret123").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/verify")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["username"], "alice");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/verify")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"token": "garbage"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_then_verify_fails() {
    let state = create_test_state(seeded_directory());
    let app = specimen_registry::routes::create_router(state);

    let token = login_token(&app, "alice", "secret123").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/verify")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_endpoint_returns_token() {
    let state = create_test_state(seeded_directory());
    let app = specimen_registry::routes::create_router(state);

    let token = login_token(&app, "alice", "secret123").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/refresh")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // A freshly issued token is handed back unchanged
    let body = body_json(response).await;
    assert_eq!(body["token"].as_str().unwrap(), token);
}

#[tokio::test]
async fn test_change_password_over_http() {
    let state = create_test_state(seeded_directory());
    let app = specimen_registry::routes::create_router(state);

    let token = login_token(&app, "alice", "secret123").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/users/me/password")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "current_password": "secret123",
                        "new_password": "NewSecret456"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let _new_token = login_token(&app, "alice", "NewSecret456").await;
}
