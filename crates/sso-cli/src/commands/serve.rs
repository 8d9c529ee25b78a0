//! Start the SSO server.

use clap::Args;
use tracing::info;

use sso_core::error::AppError;
use sso_database::migration;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip database migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: &str) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    sso_api::telemetry::init_logging(&config);
    info!(env = ?config.env, address = %config.server.bind_address(), "Starting SSO server");

    let pool = super::connect(&config).await?;

    if !args.no_migrate {
        migration::run_migrations(pool.pool()).await?;
    }

    sso_api::run_server(config, pool).await
}
