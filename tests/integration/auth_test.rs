//! Integration tests for registration, login, and token validation.

mod helpers;

use chrono::Utc;
use http::StatusCode;
use jsonwebtoken::{EncodingKey, Header, encode};

use helpers::{APP_SECRET, TestApp};

#[tokio::test]
async fn test_register_and_login() {
    let app = TestApp::new().await;
    let user_id = app.register("a@x.com", "pw1").await;
    assert_eq!(user_id, 1);

    let token = app.login("a@x.com", "pw1", app.app.id.get()).await;

    let response = app
        .request(
            "GET",
            &format!("/api/auth/validate?app_id={}", app.app.id),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["user_id"], 1);
    assert_eq!(response.data()["email"], "a@x.com");
    assert_eq!(response.data()["app_id"], app.app.id.get());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    app.register("a@x.com", "pw1").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "a@x.com",
                "username": "again",
                "password": "pw2",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "USER_EXISTS");
}

#[tokio::test]
async fn test_register_reports_first_missing_field() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({ "username": "alice" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_ARGUMENT");
    assert_eq!(response.body["message"], "email is required");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    app.register("a@x.com", "pw1").await;

    let mut bodies = Vec::new();
    for (email, password) in [("a@x.com", "wrong"), ("nobody@x.com", "pw1")] {
        let response = app
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                    "app_id": app.app.id,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.error_code(), "INVALID_CREDENTIALS");
        bodies.push(response.body);
    }

    assert_eq!(bodies[0], bodies[1]);
}

#[tokio::test]
async fn test_login_unknown_app() {
    let app = TestApp::new().await;
    app.register("a@x.com", "pw1").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "a@x.com",
                "password": "pw1",
                "app_id": 999,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_APP_ID");
}

#[tokio::test]
async fn test_login_requires_app_id() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "a@x.com", "password": "pw1" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "app_id is required");
}

#[tokio::test]
async fn test_token_rejected_for_other_app() {
    let app = TestApp::new().await;
    let other = app.store.insert_application("other", "other-secret").await;
    app.register("a@x.com", "pw1").await;
    let token = app.login("a@x.com", "pw1", app.app.id.get()).await;

    let response = app
        .request(
            "GET",
            &format!("/api/auth/validate?app_id={}", other.id),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_SIGNATURE");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::new().await;
    let token = encode(
        &Header::default(),
        &serde_json::json!({
            "uid": 1,
            "email": "a@x.com",
            "app_id": app.app.id,
            "exp": Utc::now().timestamp() - 30,
        }),
        &EncodingKey::from_secret(APP_SECRET.as_bytes()),
    )
    .unwrap();

    let response = app
        .request(
            "GET",
            &format!("/api/auth/validate?app_id={}", app.app.id),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "EXPIRED");
}

#[tokio::test]
async fn test_login_mistyped_app_id_is_invalid_argument() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "a@x.com",
                "password": "pw1",
                "app_id": "seven",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_ARGUMENT");
    assert!(response.body["message"].is_string());
}

#[tokio::test]
async fn test_validate_non_numeric_app_id_is_invalid_argument() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/auth/validate?app_id=abc", None, Some("token"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_validate_without_token() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "GET",
            &format!("/api/auth/validate?app_id={}", app.app.id),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "MALFORMED");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["database"], "in-memory");
}
