//! # sso-core
//!
//! Core crate for the SSO service. Contains configuration schemas, typed
//! numeric identifiers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other SSO crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
pub use types::id::{AppId, UserId};
