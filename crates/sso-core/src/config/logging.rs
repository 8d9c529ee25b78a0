//! Logging configuration.

use serde::{Deserialize, Serialize};

use super::app::Environment;

/// Logging and tracing configuration.
///
/// Unset fields fall back to per-environment defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level: `"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"`.
    #[serde(default)]
    pub level: Option<String>,
    /// Log format: `"json"` or `"pretty"`.
    #[serde(default)]
    pub format: Option<LogFormat>,
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

impl LoggingConfig {
    /// The filter directive to use for the given environment.
    pub fn effective_level(&self, env: Environment) -> String {
        match &self.level {
            Some(level) => level.clone(),
            None => match env {
                Environment::Local | Environment::Dev => "debug".to_string(),
                Environment::Prod => "info".to_string(),
            },
        }
    }

    /// The output format to use for the given environment.
    pub fn effective_format(&self, env: Environment) -> LogFormat {
        self.format.unwrap_or(match env {
            Environment::Local => LogFormat::Pretty,
            Environment::Dev | Environment::Prod => LogFormat::Json,
        })
    }
}
