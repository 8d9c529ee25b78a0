//! Permission grant model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sso_core::{AppId, UserId};

/// The only label that allows changing other users' grants.
pub const ADMIN_PERMISSION: &str = "admin";

/// Label given to a grant created on first login.
pub const DEFAULT_PERMISSION: &str = "user";

/// A `(user, application) -> label` record. At most one exists per pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PermissionGrant {
    /// Grantee.
    pub user_id: UserId,
    /// Application the grant applies to.
    pub app_id: AppId,
    /// Free-form permission label.
    pub permission: String,
}

impl PermissionGrant {
    /// Whether this grant carries the admin label.
    pub fn is_admin(&self) -> bool {
        is_admin_label(&self.permission)
    }
}

/// Whether a label is the privileged admin label. Labels are case-sensitive.
pub fn is_admin_label(label: &str) -> bool {
    label == ADMIN_PERMISSION
}

/// Outcome of an insert-if-absent grant creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantCreation {
    /// A new row was written.
    Created,
    /// A row for the pair already existed; nothing was written.
    AlreadyExists,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_label_is_exact() {
        let grant = PermissionGrant {
            user_id: UserId(1),
            app_id: AppId(7),
            permission: "admin".to_string(),
        };
        assert!(grant.is_admin());
        assert!(!is_admin_label("Admin"));
        assert!(!is_admin_label(DEFAULT_PERMISSION));
    }
}
