//! Application repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use sso_core::AppId;
use sso_core::error::{AppError, ErrorKind};
use sso_core::result::AppResult;
use sso_entity::Application;

use crate::store::ApplicationStore;

/// Repository for client applications.
///
/// The service only reads applications; `create` and `list` back the
/// administrative CLI.
#[derive(Debug, Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    /// Create a new application repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new application.
    pub async fn create(&self, name: &str, secret: &str) -> AppResult<Application> {
        sqlx::query_as::<_, Application>(
            "INSERT INTO apps (name, secret) VALUES ($1, $2) RETURNING id, name, secret",
        )
        .bind(name)
        .bind(secret)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let unique = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if unique {
                AppError::invalid_argument(format!("application '{name}' already exists"))
            } else {
                AppError::with_source(ErrorKind::Infrastructure, "Failed to create application", e)
            }
        })
    }

    /// List all applications ordered by id.
    pub async fn list(&self) -> AppResult<Vec<Application>> {
        sqlx::query_as::<_, Application>("SELECT id, name, secret FROM apps ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Infrastructure, "Failed to list applications", e)
            })
    }
}

#[async_trait]
impl ApplicationStore for ApplicationRepository {
    async fn find_by_id(&self, id: AppId) -> AppResult<Option<Application>> {
        sqlx::query_as::<_, Application>("SELECT id, name, secret FROM apps WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Infrastructure, "Failed to find application", e)
            })
    }
}
