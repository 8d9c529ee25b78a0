//! Database migration management commands.

use clap::{Args, Subcommand};

use sso_core::error::AppError;
use sso_database::DatabasePool;
use sso_database::migration::{self, RevertOutcome};

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Apply all pending migrations
    Up,
    /// Revert the most recently applied migration
    Down {
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Show migration status
    Status,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    super::with_database(&config, |db| run(&args.command, db)).await
}

async fn run(command: &MigrateCommand, db: DatabasePool) -> Result<(), AppError> {
    let pool = db.pool();

    match command {
        MigrateCommand::Up => {
            let pending = migration::migration_status(pool)
                .await?
                .iter()
                .filter(|m| !m.applied)
                .count();
            if pending == 0 {
                output::print_warning("No migrations to apply.");
                return Ok(());
            }

            migration::run_migrations(pool).await?;
            output::print_success(&format!("Applied {pending} migration(s)."));
        }
        MigrateCommand::Down { force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt("This will revert the latest migration and may drop data. Continue?")
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::infrastructure(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            match migration::revert_latest(pool).await? {
                RevertOutcome::Reverted(version) => {
                    output::print_success(&format!("Reverted migration {version}."));
                }
                RevertOutcome::NoChange => output::print_warning("No migrations to revert."),
            }
        }
        MigrateCommand::Status => {
            for entry in migration::migration_status(pool).await? {
                let state = if entry.applied { "applied" } else { "pending" };
                println!("  {} {} ({state})", entry.version, entry.description);
            }
        }
    }

    Ok(())
}
