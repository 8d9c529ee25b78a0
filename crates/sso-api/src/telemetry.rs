//! Tracing subscriber setup shared by the server and CLI binaries.

use tracing_subscriber::{EnvFilter, fmt};

use sso_core::config::{AppConfig, LogFormat};

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_logging(config: &AppConfig) {
    let level = config.logging.effective_level(config.env);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match config.logging.effective_format(config.env) {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_current_span(false)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
