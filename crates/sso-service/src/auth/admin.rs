//! Proof that an acting user holds the admin grant on an application.

use sso_core::{AppId, UserId};

/// Capability required to change permission grants on one application.
///
/// Only [`AuthService::authorize_admin`](super::AuthService::authorize_admin)
/// can construct it, and only after reading an `"admin"` grant for the
/// acting user. It is bound to a single application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminGrant {
    acting_user_id: UserId,
    app_id: AppId,
}

impl AdminGrant {
    pub(crate) fn new(acting_user_id: UserId, app_id: AppId) -> Self {
        Self {
            acting_user_id,
            app_id,
        }
    }

    /// The administrator this capability was issued to.
    pub fn acting_user_id(&self) -> UserId {
        self.acting_user_id
    }

    /// The application this capability is valid for.
    pub fn app_id(&self) -> AppId {
        self.app_id
    }
}
