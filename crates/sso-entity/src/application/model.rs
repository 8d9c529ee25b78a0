//! Application entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sso_core::AppId;

/// A client application that users log in to.
///
/// Provisioned administratively; the authorization layer only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    /// Unique application identifier.
    pub id: AppId,
    /// Human-readable unique name.
    pub name: String,
    /// Symmetric key used to sign this application's tokens.
    #[serde(skip_serializing)]
    pub secret: String,
}

impl Application {
    /// Whether the application carries a secret that can sign tokens.
    pub fn has_signing_key(&self) -> bool {
        !self.secret.is_empty()
    }
}
