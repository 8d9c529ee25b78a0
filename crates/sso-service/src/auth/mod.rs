//! Authentication and permission-grant operations.

pub mod admin;
pub mod service;

pub use admin::AdminGrant;
pub use service::AuthService;
