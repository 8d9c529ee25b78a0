//! SSO Server: single sign-on and per-application permission service.
//!
//! Main entry point that loads configuration, prepares the database, and
//! starts the HTTP server.

use sso_core::config::{AppConfig, CONFIG_PATH_ENV};
use sso_core::error::AppError;
use sso_database::{DatabasePool, migration};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    sso_api::telemetry::init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `--config <path>`, `SSO_CONFIG_PATH`, or the default path.
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path = config_path_from_args(std::env::args())
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    AppConfig::load(&config_path)
}

fn config_path_from_args(args: impl Iterator<Item = String>) -> Option<String> {
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        if let Some(value) = arg.strip_prefix("--config=") {
            return Some(value.to_string());
        }
        if arg == "--config" {
            return args.next();
        }
    }
    None
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        env = ?config.env,
        "Starting SSO server"
    );

    let db_pool = DatabasePool::connect(&config.database).await?;
    migration::run_migrations(db_pool.pool()).await?;

    sso_api::run_server(config, db_pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_config_flag_forms() {
        assert_eq!(
            config_path_from_args(args(&["sso-server", "--config", "a.toml"])).as_deref(),
            Some("a.toml")
        );
        assert_eq!(
            config_path_from_args(args(&["sso-server", "--config=b.toml"])).as_deref(),
            Some("b.toml")
        );
        assert_eq!(config_path_from_args(args(&["sso-server"])), None);
    }
}
