//! Client application management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use sso_auth::secret::generate_app_secret;
use sso_core::AppId;
use sso_core::error::AppError;
use sso_database::DatabasePool;
use sso_database::repositories::ApplicationRepository;

use crate::output::{self, OutputFormat};

/// Arguments for app commands
#[derive(Debug, Args)]
pub struct AppArgs {
    /// App subcommand
    #[command(subcommand)]
    pub command: AppCommand,
}

/// App subcommands
#[derive(Debug, Subcommand)]
pub enum AppCommand {
    /// Register a new client application
    Create {
        /// Unique application name
        #[arg(short, long)]
        name: String,
        /// Signing secret (generated when omitted)
        #[arg(short, long)]
        secret: Option<String>,
    },
    /// List registered applications
    List,
}

/// Application row for table and JSON output. Secrets are never listed.
#[derive(Debug, Serialize, Tabled)]
struct AppRow {
    #[tabled(rename = "ID")]
    id: AppId,
    #[tabled(rename = "Name")]
    name: String,
}

/// Execute app commands
pub async fn execute(
    args: &AppArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    super::with_database(&config, |db| run(&args.command, db, format)).await
}

async fn run(command: &AppCommand, db: DatabasePool, format: OutputFormat) -> Result<(), AppError> {
    let repo = ApplicationRepository::new(db.pool().clone());

    match command {
        AppCommand::Create { name, secret } => {
            if name.trim().is_empty() {
                return Err(AppError::invalid_argument("name is required"));
            }
            let secret = match secret {
                Some(s) if !s.is_empty() => s.clone(),
                Some(_) => return Err(AppError::invalid_argument("secret must not be empty")),
                None => generate_app_secret(),
            };

            let app = repo.create(name.trim(), &secret).await?;

            output::print_success(&format!("Application '{}' created.", app.name));
            output::print_kv("ID", &app.id.to_string());
            output::print_kv("Secret", &app.secret);
        }
        AppCommand::List => {
            let rows: Vec<AppRow> = repo
                .list()
                .await?
                .into_iter()
                .map(|a| AppRow {
                    id: a.id,
                    name: a.name,
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
