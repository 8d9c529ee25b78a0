//! # sso-auth
//!
//! Credential verification and token handling for the SSO service.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and verification
//! - `jwt`: application-scoped token issuance and validation
//! - `secret`: random signing secrets for new applications

pub mod jwt;
pub mod password;
pub mod secret;

pub use jwt::{Claims, TokenCodec, TokenIdentity, UserIdClaim};
pub use password::PasswordHasher;
