//! Authentication configuration.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest accepted token lifetime: one year.
pub const MAX_TOKEN_TTL_MINUTES: i64 = 365 * 24 * 60;

/// Token lifetime and password hashing cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of issued tokens in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: i64,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_iterations")]
    pub argon2_iterations: u32,
    /// Argon2 lanes.
    #[serde(default = "default_parallelism")]
    pub argon2_parallelism: u32,
}

impl AuthConfig {
    /// Token lifetime as a signed duration.
    ///
    /// Fails for values outside `1..=MAX_TOKEN_TTL_MINUTES`.
    pub fn token_ttl(&self) -> Result<TimeDelta, AppError> {
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&self.token_ttl_minutes) {
            return Err(AppError::configuration(format!(
                "auth.token_ttl_minutes must be between 1 and {MAX_TOKEN_TTL_MINUTES}"
            )));
        }
        TimeDelta::try_minutes(self.token_ttl_minutes)
            .ok_or_else(|| AppError::configuration("auth.token_ttl_minutes is out of range"))
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_minutes: default_token_ttl(),
            argon2_memory_kib: default_memory(),
            argon2_iterations: default_iterations(),
            argon2_parallelism: default_parallelism(),
        }
    }
}

fn default_token_ttl() -> i64 {
    60
}

// OWASP minimum for Argon2id: m=19 MiB, t=2, p=1.
fn default_memory() -> u32 {
    19 * 1024
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}
