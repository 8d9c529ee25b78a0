//! PostgreSQL pool construction.
//!
//! The acquire timeout bounds how long any store call waits for a
//! connection, so a saturated or unreachable database surfaces as an
//! `Infrastructure` error instead of a hung request.

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use sso_core::config::DatabaseConfig;
use sso_core::error::{AppError, ErrorKind};

/// Shared handle to the PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
}

fn connect_error(e: sqlx::Error) -> AppError {
    AppError::with_source(
        ErrorKind::Infrastructure,
        format!("Failed to connect to database: {e}"),
        e,
    )
}

impl DatabasePool {
    /// Opens the pool and waits for the first connection.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %mask_password(&config.url),
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = pool_options(config)
            .connect(&config.url)
            .await
            .map_err(connect_error)?;

        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Builds the pool without connecting; connections open on first use.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = pool_options(config)
            .connect_lazy(&config.url)
            .map_err(connect_error)?;
        Ok(Self { pool })
    }

    /// The underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trips `SELECT 1`.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        let one = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Infrastructure, "Database health check failed", e)
            })?;
        Ok(one == 1)
    }

    /// Whether [`DatabasePool::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Closes every connection; waits for checked-out ones to return.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Replaces the password in a connection URL with `****`.
pub fn mask_password(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:****@{host}"),
        None => url.to_string(),
    }
}
