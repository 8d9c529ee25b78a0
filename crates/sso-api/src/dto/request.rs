//! Request DTOs that are not service requests themselves.
//!
//! Login and registration bodies deserialize straight into the service's
//! request types.

use serde::{Deserialize, Serialize};

use sso_core::AppId;

/// Body of `PUT /api/permissions/{user_id}/{app_id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatePermissionBody {
    /// New permission label.
    pub permission: String,
}

/// Query of `GET /api/auth/validate`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppQuery {
    /// Application the token must be valid for.
    pub app_id: AppId,
}
