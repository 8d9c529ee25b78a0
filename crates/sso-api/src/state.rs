//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sso_core::config::AppConfig;
use sso_database::DatabasePool;
use sso_service::AuthService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Authorization use cases
    pub auth: Arc<AuthService>,
    /// PostgreSQL pool, absent when running on the in-memory store
    pub db_pool: Option<DatabasePool>,
}

impl AppState {
    /// Creates application state.
    pub fn new(config: AppConfig, auth: AuthService, db_pool: Option<DatabasePool>) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            db_pool,
        }
    }
}
