//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use sso_api::AppState;
use sso_auth::{PasswordHasher, TokenCodec};
use sso_core::config::{AppConfig, AuthConfig};
use sso_database::MemoryStore;
use sso_entity::Application;
use sso_service::AuthService;

pub const APP_SECRET: &str = "integration-app-secret";

const TEST_CONFIG: &str = r#"
env = "local"

[database]
url = "postgres://unused"

[auth]
token_ttl_minutes = 5
"#;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct inspection
    pub store: MemoryStore,
    /// An application provisioned for every test
    pub app: Application,
}

/// Decoded response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// `data` of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// `error` code of an error body.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    /// Create a new test application on the in-memory store
    pub async fn new() -> Self {
        let config = AppConfig::from_toml(TEST_CONFIG).expect("Failed to parse test config");

        let store = MemoryStore::new();
        let app = store.insert_application("integration", APP_SECRET).await;

        let hasher = PasswordHasher::new(&AuthConfig {
            argon2_memory_kib: 8,
            argon2_iterations: 1,
            argon2_parallelism: 1,
            ..AuthConfig::default()
        })
        .expect("Failed to build hasher");

        let shared = Arc::new(store.clone());
        let auth = AuthService::new(
            shared.clone(),
            shared.clone(),
            shared,
            Arc::new(hasher),
            Arc::new(TokenCodec::new()),
            config.auth.token_ttl().expect("Invalid token ttl"),
        );

        let router = sso_api::build_app(AppState::new(config, auth, None));

        Self { router, store, app }
    }

    /// Register a user and return their id
    pub async fn register(&self, email: &str, password: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "email": email,
                    "username": "tester",
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );

        response.data()["user_id"]
            .as_i64()
            .expect("No user_id in register response")
    }

    /// Login and return the token
    pub async fn login(&self, email: &str, password: &str, app_id: i64) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                    "app_id": app_id,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.data()["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req.body(Body::from(body_str)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
