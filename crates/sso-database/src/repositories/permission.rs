//! Permission grant repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use sso_core::error::{AppError, ErrorKind};
use sso_core::result::AppResult;
use sso_core::{AppId, UserId};
use sso_entity::{GrantCreation, PermissionGrant};

use crate::store::PermissionStore;

/// Repository for `(user, application)` permission grants.
#[derive(Debug, Clone)]
pub struct PermissionRepository {
    pool: PgPool,
}

impl PermissionRepository {
    /// Create a new permission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All grants on an application.
    pub async fn find_by_app(&self, app_id: AppId) -> AppResult<Vec<PermissionGrant>> {
        sqlx::query_as::<_, PermissionGrant>(
            "SELECT user_id, app_id, permission FROM permissions WHERE app_id = $1 ORDER BY user_id",
        )
        .bind(app_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Infrastructure, "Failed to list grants", e)
        })
    }
}

#[async_trait]
impl PermissionStore for PermissionRepository {
    async fn find(&self, user_id: UserId, app_id: AppId) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT permission FROM permissions WHERE user_id = $1 AND app_id = $2",
        )
        .bind(user_id)
        .bind(app_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Infrastructure, "Failed to find grant", e))
    }

    async fn create(
        &self,
        user_id: UserId,
        app_id: AppId,
        permission: &str,
    ) -> AppResult<GrantCreation> {
        let result = sqlx::query(
            "INSERT INTO permissions (user_id, app_id, permission) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, app_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(app_id)
        .bind(permission)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Infrastructure, "Failed to create grant", e)
        })?;

        Ok(if result.rows_affected() == 1 {
            GrantCreation::Created
        } else {
            GrantCreation::AlreadyExists
        })
    }

    async fn update(&self, user_id: UserId, app_id: AppId, permission: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE permissions SET permission = $3 WHERE user_id = $1 AND app_id = $2",
        )
        .bind(user_id)
        .bind(app_id)
        .bind(permission)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Infrastructure, "Failed to update grant", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
