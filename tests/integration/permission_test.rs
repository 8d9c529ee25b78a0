//! Integration tests for permission lookup and updates.

mod helpers;

use http::StatusCode;

use helpers::TestApp;
use sso_core::UserId;

/// Registers an admin of the test app and returns their token.
async fn admin_token(app: &TestApp) -> String {
    let admin_id = app.register("admin@x.com", "admin-pw").await;
    app.store
        .put_grant(UserId(admin_id), app.app.id, "admin")
        .await;
    app.login("admin@x.com", "admin-pw", app.app.id.get()).await
}

#[tokio::test]
async fn test_first_login_grants_default_permission() {
    let app = TestApp::new().await;
    let user_id = app.register("a@x.com", "pw1").await;
    app.login("a@x.com", "pw1", app.app.id.get()).await;
    app.login("a@x.com", "pw1", app.app.id.get()).await;

    let response = app
        .request(
            "GET",
            &format!("/api/permissions/{user_id}/{}", app.app.id),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["permission"], "user");
    assert_eq!(app.store.grants().await.len(), 1);
}

#[tokio::test]
async fn test_missing_grant_reports_invalid_app_id() {
    let app = TestApp::new().await;
    let user_id = app.register("a@x.com", "pw1").await;

    let response = app
        .request(
            "GET",
            &format!("/api/permissions/{user_id}/{}", app.app.id),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_APP_ID");
    assert!(app.store.grants().await.is_empty());
}

#[tokio::test]
async fn test_zero_user_id_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "GET",
            &format!("/api/permissions/0/{}", app.app.id),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "user_id is required");
}

#[tokio::test]
async fn test_admin_updates_permission() {
    let app = TestApp::new().await;
    let token = admin_token(&app).await;
    let user_id = app.register("a@x.com", "pw1").await;
    app.login("a@x.com", "pw1", app.app.id.get()).await;

    let path = format!("/api/permissions/{user_id}/{}", app.app.id);
    let response = app
        .request(
            "PUT",
            &path,
            Some(serde_json::json!({ "permission": "admin" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.data()["permission"], "admin");

    let response = app
        .request("GET", &format!("{path}/admin"), None, None)
        .await;
    assert_eq!(response.data()["is_admin"], true);
}

#[tokio::test]
async fn test_update_missing_row_is_not_found() {
    let app = TestApp::new().await;
    let token = admin_token(&app).await;
    let user_id = app.register("a@x.com", "pw1").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/permissions/{user_id}/{}", app.app.id),
            Some(serde_json::json!({ "permission": "editor" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "PERMISSION_ROW_MISSING");
    // Only the admin's own grant exists.
    assert_eq!(app.store.grants().await.len(), 1);
}

#[tokio::test]
async fn test_non_admin_cannot_update() {
    let app = TestApp::new().await;
    let user_id = app.register("a@x.com", "pw1").await;
    let token = app.login("a@x.com", "pw1", app.app.id.get()).await;

    let path = format!("/api/permissions/{user_id}/{}", app.app.id);
    let response = app
        .request(
            "PUT",
            &path,
            Some(serde_json::json!({ "permission": "admin" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.data()["permission"], "user");
}

#[tokio::test]
async fn test_update_checks_body_before_authorizing() {
    let app = TestApp::new().await;
    let user_id = app.register("a@x.com", "pw1").await;
    let token = app.login("a@x.com", "pw1", app.app.id.get()).await;

    let path = format!("/api/permissions/{user_id}/{}", app.app.id);
    let response = app
        .request(
            "PUT",
            &path,
            Some(serde_json::json!({ "permission": "" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_ARGUMENT");
    assert_eq!(response.body["message"], "permission is required");
}

#[tokio::test]
async fn test_non_numeric_path_id_is_invalid_argument() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "GET",
            &format!("/api/permissions/abc/{}", app.app.id),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_ARGUMENT");
    assert!(response.body["message"].is_string());
}

#[tokio::test]
async fn test_update_requires_token_for_same_app() {
    let app = TestApp::new().await;
    let other = app.store.insert_application("other", "other-secret").await;
    let token = admin_token(&app).await;
    let user_id = app.register("a@x.com", "pw1").await;
    app.store.put_grant(UserId(user_id), other.id, "user").await;

    let path = format!("/api/permissions/{user_id}/{}", other.id);
    let body = serde_json::json!({ "permission": "admin" });

    let response = app
        .request("PUT", &path, Some(body.clone()), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("PUT", &path, Some(body), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_is_admin_false_without_grant() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "GET",
            &format!("/api/permissions/5/{}/admin", app.app.id),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["is_admin"], false);
}
