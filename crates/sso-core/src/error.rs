//! Unified application error types for the SSO service.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Domain-rule violations and
//! infrastructure failures share the type but never the [`ErrorKind`].

use std::fmt;
use thiserror::Error;

/// Error kind categorization used across the entire service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A structural precondition on the request failed.
    InvalidArgument,
    /// Unknown email or wrong password.
    InvalidCredentials,
    /// The referenced application does not exist (or, for permission
    /// checks, the user has no grant on it).
    InvalidAppId,
    /// A user with the same email is already registered.
    UserExists,
    /// No user with the given email. Internal only.
    UserNotFound,
    /// No grant exists for the `(user, app)` pair. Internal only.
    NoPermissionFound,
    /// An update targeted a grant row that does not exist.
    PermissionRowMissing,
    /// A token was requested with a non-positive lifetime.
    InvalidDuration,
    /// The application has no usable signing secret.
    MissingSigningKey,
    /// The token signature does not match the application secret.
    InvalidSignature,
    /// The token expiry is at or before the current time.
    Expired,
    /// The token is not decodable or its claims are missing or mistyped.
    Malformed,
    /// The acting caller lacks the privilege required for the operation.
    Forbidden,
    /// A configuration error occurred.
    Configuration,
    /// Storage, hashing, or signing failed for reasons unrelated to domain rules.
    Infrastructure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::InvalidAppId => write!(f, "INVALID_APP_ID"),
            Self::UserExists => write!(f, "USER_EXISTS"),
            Self::UserNotFound => write!(f, "USER_NOT_FOUND"),
            Self::NoPermissionFound => write!(f, "NO_PERMISSION_FOUND"),
            Self::PermissionRowMissing => write!(f, "PERMISSION_ROW_MISSING"),
            Self::InvalidDuration => write!(f, "INVALID_DURATION"),
            Self::MissingSigningKey => write!(f, "MISSING_SIGNING_KEY"),
            Self::InvalidSignature => write!(f, "INVALID_SIGNATURE"),
            Self::Expired => write!(f, "EXPIRED"),
            Self::Malformed => write!(f, "MALFORMED"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Infrastructure => write!(f, "INFRASTRUCTURE"),
        }
    }
}

/// The unified application error used throughout the SSO service.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// The kind this error carried before it was surfaced under `kind`.
    pub origin: Option<ErrorKind>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            origin: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            origin: None,
            source: Some(Box::new(source)),
        }
    }

    /// Re-labels this error as `outer`, the externally visible error.
    ///
    /// The original error becomes the source, and its kind stays reachable
    /// through [`AppError::origin_kind`].
    pub fn surface_as(self, outer: AppError) -> Self {
        let origin = self.origin_kind();
        Self {
            kind: outer.kind,
            message: outer.message,
            origin: Some(origin),
            source: Some(Box::new(self)),
        }
    }

    /// The most specific kind known for this error.
    pub fn origin_kind(&self) -> ErrorKind {
        self.origin.unwrap_or(self.kind)
    }

    /// Prefix the message with the name of the failing operation.
    pub fn context(mut self, op: &str) -> Self {
        self.message = format!("{op}: {}", self.message);
        self
    }

    /// Whether the error is a domain-rule violation rather than an infrastructure failure.
    pub fn is_domain(&self) -> bool {
        !matches!(
            self.kind,
            ErrorKind::Infrastructure | ErrorKind::Configuration
        )
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "invalid email or password")
    }

    /// Create an invalid-app-id error.
    pub fn invalid_app_id() -> Self {
        Self::new(ErrorKind::InvalidAppId, "invalid app ID")
    }

    /// Create a user-exists error.
    pub fn user_exists() -> Self {
        Self::new(ErrorKind::UserExists, "user already exists")
    }

    /// Create a user-not-found error.
    pub fn user_not_found() -> Self {
        Self::new(ErrorKind::UserNotFound, "user not found")
    }

    /// Create a no-permission-found error.
    pub fn no_permission_found() -> Self {
        Self::new(ErrorKind::NoPermissionFound, "no permission found")
    }

    /// Create a permission-row-missing error.
    pub fn permission_row_missing() -> Self {
        Self::new(
            ErrorKind::PermissionRowMissing,
            "no permission row to update",
        )
    }

    /// Create an invalid-duration error.
    pub fn invalid_duration() -> Self {
        Self::new(ErrorKind::InvalidDuration, "token lifetime must be positive and in range")
    }

    /// Create a missing-signing-key error.
    pub fn missing_signing_key() -> Self {
        Self::new(ErrorKind::MissingSigningKey, "app secret is required")
    }

    /// Create an invalid-signature error.
    pub fn invalid_signature(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSignature, message)
    }

    /// Create a token-expired error.
    pub fn expired() -> Self {
        Self::new(ErrorKind::Expired, "token has expired")
    }

    /// Create a malformed-token error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Malformed, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an infrastructure error.
    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Infrastructure, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            origin: self.origin,
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Infrastructure,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Infrastructure, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::with_source(
            ErrorKind::Infrastructure,
            format!("Database error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_as_keeps_origin() {
        let err = AppError::no_permission_found().surface_as(AppError::invalid_app_id());
        assert_eq!(err.kind, ErrorKind::InvalidAppId);
        assert_eq!(err.origin_kind(), ErrorKind::NoPermissionFound);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "INVALID_APP_ID: invalid app ID");
    }

    #[test]
    fn test_surface_as_twice_keeps_first_origin() {
        let err = AppError::user_not_found()
            .surface_as(AppError::invalid_credentials())
            .surface_as(AppError::forbidden("denied"));
        assert_eq!(err.origin_kind(), ErrorKind::UserNotFound);
    }

    #[test]
    fn test_context_prefixes_message() {
        let err = AppError::infrastructure("connection reset").context("auth.login");
        assert_eq!(err.message, "auth.login: connection reset");
        assert!(!err.is_domain());
        assert!(AppError::user_exists().is_domain());
    }
}
