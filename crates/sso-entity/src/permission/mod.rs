//! Per-user, per-application permission grants.

pub mod model;

pub use model::{ADMIN_PERMISSION, DEFAULT_PERMISSION, GrantCreation, PermissionGrant};
