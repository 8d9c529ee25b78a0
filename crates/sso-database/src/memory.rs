//! In-memory store used by tests and local experiments.
//!
//! One [`MemoryStore`] implements all three store contracts over a single
//! mutex-guarded state, so uniqueness checks and inserts are atomic with
//! respect to each other.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use sso_core::error::AppError;
use sso_core::result::AppResult;
use sso_core::{AppId, UserId};
use sso_entity::user::NewUser;
use sso_entity::{Application, GrantCreation, PermissionGrant, User};

use crate::store::{ApplicationStore, PermissionStore, UserStore};

#[derive(Debug, Default)]
struct InnerState {
    users: Vec<User>,
    apps: HashMap<AppId, Application>,
    grants: HashMap<(UserId, AppId), String>,
    next_user_id: i64,
    next_app_id: i64,
}

/// Store backed by process memory. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision an application with the next free id.
    pub async fn insert_application(&self, name: &str, secret: &str) -> Application {
        let mut state = self.state.lock().await;
        state.next_app_id += 1;
        let app = Application {
            id: AppId(state.next_app_id),
            name: name.to_string(),
            secret: secret.to_string(),
        };
        state.apps.insert(app.id, app.clone());
        app
    }

    /// Write a grant directly, replacing any existing label.
    pub async fn put_grant(&self, user_id: UserId, app_id: AppId, permission: &str) {
        self.state
            .lock()
            .await
            .grants
            .insert((user_id, app_id), permission.to_string());
    }

    /// Snapshot of every grant, ordered by user then app.
    pub async fn grants(&self) -> Vec<PermissionGrant> {
        let state = self.state.lock().await;
        let mut grants: Vec<PermissionGrant> = state
            .grants
            .iter()
            .map(|((user_id, app_id), permission)| PermissionGrant {
                user_id: *user_id,
                app_id: *app_id,
                permission: permission.clone(),
            })
            .collect();
        grants.sort_by_key(|g| (g.user_id, g.app_id));
        grants
    }

    /// Number of registered users.
    pub async fn user_count(&self) -> usize {
        self.state.lock().await.users.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn save(&self, user: NewUser) -> AppResult<UserId> {
        let mut state = self.state.lock().await;
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::user_exists());
        }

        state.next_user_id += 1;
        let id = UserId(state.next_user_id);
        state.users.push(User {
            id,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn find_by_id(&self, id: AppId) -> AppResult<Option<Application>> {
        Ok(self.state.lock().await.apps.get(&id).cloned())
    }
}

#[async_trait]
impl PermissionStore for MemoryStore {
    async fn find(&self, user_id: UserId, app_id: AppId) -> AppResult<Option<String>> {
        Ok(self
            .state
            .lock()
            .await
            .grants
            .get(&(user_id, app_id))
            .cloned())
    }

    async fn create(
        &self,
        user_id: UserId,
        app_id: AppId,
        permission: &str,
    ) -> AppResult<GrantCreation> {
        let mut state = self.state.lock().await;
        if state.grants.contains_key(&(user_id, app_id)) {
            return Ok(GrantCreation::AlreadyExists);
        }
        state
            .grants
            .insert((user_id, app_id), permission.to_string());
        Ok(GrantCreation::Created)
    }

    async fn update(&self, user_id: UserId, app_id: AppId, permission: &str) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        match state.grants.get_mut(&(user_id, app_id)) {
            Some(existing) => {
                *existing = permission.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sso_core::error::ErrorKind;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            username: "u".to_string(),
            password_hash: "h".to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        let id = store.save(new_user("a@x.com")).await.unwrap();
        assert_eq!(id, UserId(1));

        let err = store.save(new_user("a@x.com")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::UserExists);
        // Case-sensitive comparison.
        assert!(store.save(new_user("A@x.com")).await.is_ok());
        assert_eq!(store.user_count().await, 2);
    }

    #[tokio::test]
    async fn test_create_grant_is_insert_if_absent() {
        let store = MemoryStore::new();
        let (u, a) = (UserId(1), AppId(1));

        assert_eq!(store.create(u, a, "user").await.unwrap(), GrantCreation::Created);
        assert_eq!(
            store.create(u, a, "admin").await.unwrap(),
            GrantCreation::AlreadyExists
        );
        assert_eq!(store.find(u, a).await.unwrap().as_deref(), Some("user"));
    }

    #[tokio::test]
    async fn test_update_never_inserts() {
        let store = MemoryStore::new();
        let (u, a) = (UserId(1), AppId(1));

        assert!(!store.update(u, a, "admin").await.unwrap());
        assert!(store.find(u, a).await.unwrap().is_none());

        store.put_grant(u, a, "user").await;
        assert!(store.update(u, a, "editor").await.unwrap());
        assert_eq!(store.find(u, a).await.unwrap().as_deref(), Some("editor"));
    }

    #[tokio::test]
    async fn test_applications_get_sequential_ids() {
        let store = MemoryStore::new();
        let first = store.insert_application("one", "s1").await;
        let second = store.insert_application("two", "s2").await;

        assert_eq!(first.id, AppId(1));
        assert_eq!(second.id, AppId(2));
        assert_eq!(
            store.find_by_id(AppId(2)).await.unwrap().unwrap().name,
            "two"
        );
        assert!(store.find_by_id(AppId(3)).await.unwrap().is_none());
    }
}
