//! Structural checks applied to every inbound request before domain logic.
//!
//! Each request lists its fields in declaration order; when several fields
//! are invalid, only the first one in that order is reported. Absent fields
//! deserialize to empty values so that they are reported here rather than
//! as decoding failures.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use sso_core::error::AppError;
use sso_core::{AppId, UserId};

/// A request whose fields are validated in a fixed order.
pub trait ValidatedRequest: Validate {
    /// Field names in the order they are checked.
    const FIELDS: &'static [&'static str];

    /// Run all field rules and report the first violation as `InvalidArgument`.
    fn check(&self) -> Result<(), AppError> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };

        let field_errors = errors.field_errors();
        for field in Self::FIELDS {
            if let Some(first) = field_errors.get(*field).and_then(|errs| errs.first()) {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"));
                return Err(AppError::invalid_argument(message));
            }
        }

        Err(AppError::invalid_argument(errors.to_string()))
    }
}

fn required_id(unset: bool, message: &'static str) -> Result<(), ValidationError> {
    if unset {
        Err(ValidationError::new("required").with_message(Cow::Borrowed(message)))
    } else {
        Ok(())
    }
}

fn required_app_id(id: &AppId) -> Result<(), ValidationError> {
    required_id(id.is_unset(), "app_id is required")
}

fn required_user_id(id: &UserId) -> Result<(), ValidationError> {
    required_id(id.is_unset(), "user_id is required")
}

/// Login request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[validate(custom(function = "required_app_id"))]
    pub app_id: AppId,
}

impl ValidatedRequest for LoginRequest {
    const FIELDS: &'static [&'static str] = &["email", "password", "app_id"];
}

/// Registration request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl ValidatedRequest for RegisterRequest {
    const FIELDS: &'static [&'static str] = &["email", "username", "password"];
}

/// Permission lookup for one `(user, application)` pair.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CheckPermissionsRequest {
    #[validate(custom(function = "required_user_id"))]
    pub user_id: UserId,
    #[validate(custom(function = "required_app_id"))]
    pub app_id: AppId,
}

impl ValidatedRequest for CheckPermissionsRequest {
    const FIELDS: &'static [&'static str] = &["user_id", "app_id"];
}

/// New label for an existing grant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UpdatePermissionsRequest {
    #[validate(custom(function = "required_user_id"))]
    pub user_id: UserId,
    #[validate(custom(function = "required_app_id"))]
    pub app_id: AppId,
    #[validate(length(min = 1, message = "permission is required"))]
    pub permission: String,
}

impl ValidatedRequest for UpdatePermissionsRequest {
    const FIELDS: &'static [&'static str] = &["user_id", "app_id", "permission"];
}

/// Bearer token to check against an application.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ValidateTokenRequest {
    #[validate(length(min = 1, message = "token is required"))]
    pub token: String,
    #[validate(custom(function = "required_app_id"))]
    pub app_id: AppId,
}

impl ValidatedRequest for ValidateTokenRequest {
    const FIELDS: &'static [&'static str] = &["token", "app_id"];
}
