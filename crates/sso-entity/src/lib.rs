//! # sso-entity
//!
//! Domain entity models for the SSO service. Every struct in this crate
//! represents a database table row. All entities derive `Debug`, `Clone`,
//! `Serialize`, `Deserialize`, and `sqlx::FromRow`; secrets and password
//! digests are never serialized.

pub mod application;
pub mod permission;
pub mod user;

pub use application::Application;
pub use permission::{GrantCreation, PermissionGrant};
pub use user::User;
