//! CLI command definitions and dispatch.

pub mod app;
pub mod migrate;
pub mod permission;
pub mod serve;

use clap::{Parser, Subcommand};

use sso_core::config::{AppConfig, CONFIG_PATH_ENV};
use sso_core::error::AppError;
use sso_database::DatabasePool;

use crate::output::OutputFormat;

/// SSO service administration
#[derive(Debug, Parser)]
#[command(name = "sso", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = CONFIG_PATH_ENV, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the SSO server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Client application management
    App(app::AppArgs),
    /// Permission grant management
    Permission(permission::PermissionArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::App(args) => app::execute(args, &self.config, self.format).await,
            Commands::Permission(args) => {
                permission::execute(args, &self.config, self.format).await
            }
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: connect to the configured database
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

/// Helper: run `task` on a fresh pool, closing the pool however `task` ends
pub async fn with_database<T, F, Fut>(config: &AppConfig, task: F) -> Result<T, AppError>
where
    F: FnOnce(DatabasePool) -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let db = connect(config).await?;
    run_then_close(db, task).await
}

async fn run_then_close<T, F, Fut>(db: DatabasePool, task: F) -> Result<T, AppError>
where
    F: FnOnce(DatabasePool) -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let outcome = task(db.clone()).await;
    db.close().await;
    outcome
}
