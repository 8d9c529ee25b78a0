//! Store contracts consumed by the authorization service.
//!
//! Implementations must enforce email uniqueness for users and
//! `(user_id, app_id)` uniqueness for grants; the service relies on the
//! store, not on locks of its own, to resolve concurrent writers.

use async_trait::async_trait;

use sso_core::result::AppResult;
use sso_core::{AppId, UserId};
use sso_entity::user::NewUser;
use sso_entity::{Application, GrantCreation, User};

/// Persists and looks up users.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Persist a new user and return its identifier.
    ///
    /// Fails with `ErrorKind::UserExists` if the email is taken.
    async fn save(&self, user: NewUser) -> AppResult<UserId>;

    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
}

/// Looks up client applications.
#[async_trait]
pub trait ApplicationStore: Send + Sync + 'static {
    /// Find an application by primary key.
    async fn find_by_id(&self, id: AppId) -> AppResult<Option<Application>>;
}

/// Reads and writes permission grants.
#[async_trait]
pub trait PermissionStore: Send + Sync + 'static {
    /// The label granted to `user_id` on `app_id`, if any.
    async fn find(&self, user_id: UserId, app_id: AppId) -> AppResult<Option<String>>;

    /// Insert a grant unless one already exists for the pair.
    async fn create(
        &self,
        user_id: UserId,
        app_id: AppId,
        permission: &str,
    ) -> AppResult<GrantCreation>;

    /// Overwrite the label of an existing grant.
    ///
    /// Returns `false` when no row exists for the pair; never inserts.
    async fn update(&self, user_id: UserId, app_id: AppId, permission: &str) -> AppResult<bool>;
}
