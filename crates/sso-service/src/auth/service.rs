//! Login, registration, token validation, and permission grants.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};

use sso_auth::{PasswordHasher, TokenCodec, TokenIdentity};
use sso_core::error::{AppError, ErrorKind};
use sso_core::{AppId, UserId};
use sso_database::store::{ApplicationStore, PermissionStore, UserStore};
use sso_entity::permission::model::is_admin_label;
use sso_entity::permission::DEFAULT_PERMISSION;
use sso_entity::user::NewUser;
use sso_entity::{Application, GrantCreation};

use super::admin::AdminGrant;
use crate::validation::{
    CheckPermissionsRequest, LoginRequest, RegisterRequest, UpdatePermissionsRequest,
    ValidateTokenRequest, ValidatedRequest,
};

/// Orchestrates the stores, the password hasher, and the token codec.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    apps: Arc<dyn ApplicationStore>,
    permissions: Arc<dyn PermissionStore>,
    hasher: Arc<PasswordHasher>,
    codec: Arc<TokenCodec>,
    /// Lifetime of issued tokens.
    token_ttl: Duration,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        apps: Arc<dyn ApplicationStore>,
        permissions: Arc<dyn PermissionStore>,
        hasher: Arc<PasswordHasher>,
        codec: Arc<TokenCodec>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            users,
            apps,
            permissions,
            hasher,
            codec,
            token_ttl,
        }
    }

    /// Authenticates a user for an application and returns a signed token.
    ///
    /// The first successful login for a `(user, app)` pair creates a grant
    /// with the default label. Unknown email and wrong password both fail
    /// with `InvalidCredentials`.
    pub async fn login(&self, req: LoginRequest) -> Result<String, AppError> {
        const OP: &str = "auth.login";
        req.check()?;

        info!(op = OP, email = %req.email, app_id = %req.app_id, "Attempting to log in user");

        let Some(user) = self
            .users
            .find_by_email(&req.email)
            .await
            .map_err(with_op(OP))?
        else {
            self.hasher.verify_decoy(&req.password);
            warn!(op = OP, email = %req.email, "User not found");
            return Err(AppError::user_not_found().surface_as(AppError::invalid_credentials()));
        };

        if !self
            .hasher
            .verify_password(&req.password, &user.password_hash)
            .map_err(with_op(OP))?
        {
            warn!(op = OP, email = %req.email, "Invalid credentials");
            return Err(AppError::invalid_credentials());
        }

        let app = self.find_app(OP, req.app_id).await?;

        let existing = self
            .permissions
            .find(user.id, app.id)
            .await
            .map_err(with_op(OP))?;
        if existing.is_none() {
            match self
                .permissions
                .create(user.id, app.id, DEFAULT_PERMISSION)
                .await
                .map_err(with_op(OP))?
            {
                GrantCreation::Created => {
                    info!(op = OP, user_id = %user.id, app_id = %app.id, "Default permission granted");
                }
                GrantCreation::AlreadyExists => {
                    debug!(op = OP, user_id = %user.id, app_id = %app.id, "Permission created concurrently");
                }
            }
        }

        let token = self
            .codec
            .issue(&user, &app, self.token_ttl)
            .map_err(with_op(OP))?;

        info!(op = OP, user_id = %user.id, app_id = %app.id, "User logged in");
        Ok(token)
    }

    /// Registers a new user and returns its id. No grant is created.
    pub async fn register(&self, req: RegisterRequest) -> Result<UserId, AppError> {
        const OP: &str = "auth.register";
        req.check()?;

        info!(op = OP, email = %req.email, "Registering user");

        let password_hash = self
            .hasher
            .hash_password(&req.password)
            .map_err(with_op(OP))?;

        let user_id = self
            .users
            .save(NewUser {
                email: req.email.clone(),
                username: req.username,
                password_hash,
            })
            .await
            .map_err(|e| {
                if e.kind == ErrorKind::UserExists {
                    warn!(op = OP, email = %req.email, "User already exists");
                }
                with_op(OP)(e)
            })?;

        info!(op = OP, user_id = %user_id, "User registered");
        Ok(user_id)
    }

    /// Returns the permission label for a `(user, app)` pair.
    ///
    /// Read-only. A missing grant is reported as `InvalidAppId`; the
    /// underlying `NoPermissionFound` stays reachable via
    /// [`AppError::origin_kind`].
    pub async fn check_permissions(&self, req: CheckPermissionsRequest) -> Result<String, AppError> {
        const OP: &str = "auth.check_permissions";
        req.check()?;

        debug!(op = OP, user_id = %req.user_id, app_id = %req.app_id, "Checking permissions");

        self.permissions
            .find(req.user_id, req.app_id)
            .await
            .map_err(with_op(OP))?
            .ok_or_else(|| {
                warn!(op = OP, user_id = %req.user_id, app_id = %req.app_id, "Permission not found");
                AppError::no_permission_found().surface_as(AppError::invalid_app_id())
            })
    }

    /// Whether the user holds the admin label on the application.
    ///
    /// A missing grant is `false`, not an error.
    pub async fn is_admin(&self, req: CheckPermissionsRequest) -> Result<bool, AppError> {
        const OP: &str = "auth.is_admin";
        req.check()?;

        let label = self
            .permissions
            .find(req.user_id, req.app_id)
            .await
            .map_err(with_op(OP))?;

        let is_admin = label.as_deref().is_some_and(is_admin_label);
        debug!(op = OP, user_id = %req.user_id, app_id = %req.app_id, is_admin, "Admin check");
        Ok(is_admin)
    }

    /// Issues an [`AdminGrant`] if `acting_user_id` is an admin of `app_id`.
    pub async fn authorize_admin(
        &self,
        acting_user_id: UserId,
        app_id: AppId,
    ) -> Result<AdminGrant, AppError> {
        const OP: &str = "auth.authorize_admin";

        let is_admin = self
            .is_admin(CheckPermissionsRequest {
                user_id: acting_user_id,
                app_id,
            })
            .await?;

        if !is_admin {
            warn!(op = OP, acting_user_id = %acting_user_id, app_id = %app_id, "Admin permission required");
            return Err(AppError::forbidden(
                "admin permission required for this application",
            ));
        }

        Ok(AdminGrant::new(acting_user_id, app_id))
    }

    /// Overwrites the label of an existing grant.
    ///
    /// Requires an [`AdminGrant`] for the same application. Never creates a
    /// grant: a missing row fails with `PermissionRowMissing`.
    pub async fn update_permissions(
        &self,
        grant: &AdminGrant,
        req: UpdatePermissionsRequest,
    ) -> Result<(), AppError> {
        const OP: &str = "auth.update_permissions";
        req.check()?;

        if grant.app_id() != req.app_id {
            return Err(AppError::forbidden(
                "admin permission was granted for a different application",
            ));
        }

        info!(
            op = OP,
            acting_user_id = %grant.acting_user_id(),
            user_id = %req.user_id,
            app_id = %req.app_id,
            permission = %req.permission,
            "Updating permissions"
        );

        let updated = self
            .permissions
            .update(req.user_id, req.app_id, &req.permission)
            .await
            .map_err(with_op(OP))?;

        if !updated {
            warn!(op = OP, user_id = %req.user_id, app_id = %req.app_id, "No permission row to update");
            return Err(AppError::permission_row_missing());
        }

        info!(op = OP, user_id = %req.user_id, app_id = %req.app_id, "Permissions updated");
        Ok(())
    }

    /// Validates a bearer token against the application it claims to be for.
    pub async fn validate_token(&self, req: ValidateTokenRequest) -> Result<TokenIdentity, AppError> {
        const OP: &str = "auth.validate_token";
        req.check()?;

        let app = self.find_app(OP, req.app_id).await?;
        let identity = self.codec.validate(&req.token, &app).map_err(|e| {
            debug!(op = OP, app_id = %req.app_id, kind = %e.kind, "Token rejected");
            with_op(OP)(e)
        })?;

        debug!(op = OP, user_id = %identity.user_id, app_id = %identity.app_id, "Token accepted");
        Ok(identity)
    }

    async fn find_app(&self, op: &'static str, app_id: AppId) -> Result<Application, AppError> {
        self.apps
            .find_by_id(app_id)
            .await
            .map_err(with_op(op))?
            .ok_or_else(|| {
                warn!(op, app_id = %app_id, "App not found");
                AppError::invalid_app_id()
            })
    }
}

/// Prefixes infrastructure failures with the operation name; domain errors pass through.
fn with_op(op: &'static str) -> impl Fn(AppError) -> AppError {
    move |e| {
        if e.is_domain() {
            e
        } else {
            e.context(op)
        }
    }
}
