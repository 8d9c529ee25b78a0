//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use sso_core::UserId;
use sso_core::error::{AppError, ErrorKind};
use sso_core::result::AppResult;
use sso_entity::User;
use sso_entity::user::NewUser;

use crate::store::UserStore;

/// Repository for user persistence.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn save(&self, user: NewUser) -> AppResult<UserId> {
        sqlx::query_scalar::<_, UserId>(
            "INSERT INTO users (email, username, pass_hash) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let unique = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if unique {
                AppError::user_exists()
            } else {
                AppError::with_source(ErrorKind::Infrastructure, "Failed to save user", e)
            }
        })
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, username, pass_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Infrastructure, "Failed to find user by email", e)
        })
    }
}
