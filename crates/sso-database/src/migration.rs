//! Database migration runner.
//!
//! Migrations are reversible pairs under `migrations/` at the workspace
//! root and are embedded into the binary at compile time.

use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migrator};
use tracing::{info, warn};

use sso_core::error::{AppError, ErrorKind};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// What a revert request did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertOutcome {
    /// The named migration version was rolled back.
    Reverted(i64),
    /// Nothing was applied, so there was nothing to roll back.
    NoChange,
}

/// One embedded migration and whether the database has applied it.
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    pub version: i64,
    pub description: String,
    pub applied: bool,
}

/// Run all pending database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations");

    MIGRATOR.run(pool).await.map_err(migrate_error)?;

    info!("Database migrations completed");
    Ok(())
}

/// Roll back the most recently applied migration.
pub async fn revert_latest(pool: &PgPool) -> Result<RevertOutcome, AppError> {
    let applied = applied_versions(pool).await?;
    let Some(&latest) = applied.first() else {
        warn!("No migrations to revert");
        return Ok(RevertOutcome::NoChange);
    };
    let target = applied.get(1).copied().unwrap_or(0);

    info!(version = latest, target, "Reverting migration");
    MIGRATOR.undo(pool, target).await.map_err(migrate_error)?;

    Ok(RevertOutcome::Reverted(latest))
}

/// List every embedded migration with its applied state.
pub async fn migration_status(pool: &PgPool) -> Result<Vec<MigrationStatus>, AppError> {
    let applied = applied_versions(pool).await?;

    Ok(MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .map(|m| MigrationStatus {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect())
}

/// Successfully applied versions, newest first.
async fn applied_versions(pool: &PgPool) -> Result<Vec<i64>, AppError> {
    let table_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = '_sqlx_migrations')",
    )
    .fetch_one(pool)
    .await
    .map_err(|e| {
        AppError::with_source(ErrorKind::Infrastructure, "Failed to inspect migrations", e)
    })?;

    if !table_exists {
        return Ok(Vec::new());
    }

    sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success ORDER BY version DESC")
        .fetch_all(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Infrastructure,
                "Failed to list applied migrations",
                e,
            )
        })
}

fn migrate_error(e: MigrateError) -> AppError {
    AppError::with_source(
        ErrorKind::Infrastructure,
        format!("Migration failed: {e}"),
        e,
    )
}
