//! Permission grant management commands.
//!
//! These bypass the admin check applied to the HTTP API; they are how the
//! first administrator of an application is created.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use sso_core::error::AppError;
use sso_core::{AppId, UserId};
use sso_database::DatabasePool;
use sso_database::repositories::PermissionRepository;
use sso_database::store::PermissionStore;
use sso_entity::GrantCreation;

use crate::output::{self, OutputFormat};

/// Arguments for permission commands
#[derive(Debug, Args)]
pub struct PermissionArgs {
    /// Permission subcommand
    #[command(subcommand)]
    pub command: PermissionCommand,
}

/// Permission subcommands
#[derive(Debug, Subcommand)]
pub enum PermissionCommand {
    /// Set a user's label on an application, creating the grant if needed
    Grant {
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        app_id: i64,
        /// Permission label, e.g. `admin`
        #[arg(short, long)]
        permission: String,
    },
    /// List all grants on an application
    List {
        #[arg(long)]
        app_id: i64,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct GrantRow {
    #[tabled(rename = "User")]
    user_id: UserId,
    #[tabled(rename = "App")]
    app_id: AppId,
    #[tabled(rename = "Permission")]
    permission: String,
}

/// Execute permission commands
pub async fn execute(
    args: &PermissionArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    super::with_database(&config, |db| run(&args.command, db, format)).await
}

async fn run(command: &PermissionCommand, db: DatabasePool, format: OutputFormat) -> Result<(), AppError> {
    let repo = PermissionRepository::new(db.pool().clone());

    match command {
        PermissionCommand::Grant {
            user_id,
            app_id,
            permission,
        } => {
            let (user_id, app_id) = (UserId(*user_id), AppId(*app_id));
            if user_id.is_unset() || app_id.is_unset() {
                return Err(AppError::invalid_argument("user_id and app_id must be positive"));
            }
            if permission.is_empty() {
                return Err(AppError::invalid_argument("permission is required"));
            }

            match repo.create(user_id, app_id, permission).await? {
                GrantCreation::Created => {}
                GrantCreation::AlreadyExists => {
                    repo.update(user_id, app_id, permission).await?;
                }
            }

            output::print_success(&format!(
                "User {user_id} now has '{permission}' on app {app_id}."
            ));
        }
        PermissionCommand::List { app_id } => {
            let rows: Vec<GrantRow> = repo
                .find_by_app(AppId(*app_id))
                .await?
                .into_iter()
                .map(|g| GrantRow {
                    user_id: g.user_id,
                    app_id: g.app_id,
                    permission: g.permission,
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
