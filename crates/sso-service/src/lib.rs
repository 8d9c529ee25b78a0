//! # sso-service
//!
//! Authorization use cases for the SSO service. [`AuthService`] validates
//! each request structurally, then orchestrates the user, application,
//! and permission stores together with the password hasher and token
//! codec.
//!
//! The service holds no locks and no cached state; every dependency is
//! injected at construction time via `Arc` references.

pub mod auth;
pub mod validation;

pub use auth::{AdminGrant, AuthService};
pub use validation::{
    CheckPermissionsRequest, LoginRequest, RegisterRequest, UpdatePermissionsRequest,
    ValidateTokenRequest, ValidatedRequest,
};
