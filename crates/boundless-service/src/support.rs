//! In-memory user store for service tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use boundless_core::config::auth::AuthConfig;
use boundless_core::result::AppResult;
use boundless_core::traits::UserStore;
use boundless_core::types::pagination::PageParams;
use boundless_entity::user::{CreateUser, DynUserStore, User, UserPatch};

/// Auth configuration used by service tests.
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        secret_key: "service-test-secret".to_string(),
        access_ttl_minutes: 15,
        refresh_ttl_days: 7,
    }
}

/// A fresh, empty in-memory store.
pub fn memory_store() -> DynUserStore {
    std::sync::Arc::new(MemoryUserStore::default())
}

/// Map-backed implementation of the store contract, mirroring the
/// repository's semantics (serial ids, COALESCE-style patching,
/// exact-match email lookup).
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<i64, User>,
    next_id: i64,
}

#[async_trait]
impl UserStore<User, CreateUser, UserPatch> for MemoryUserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.inner.lock().unwrap().users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let now = Utc::now();
        let user = User {
            id: inner.next_id,
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            name: data.name.clone(),
            role: data.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, patch: &UserPatch) -> AppResult<Option<User>> {
        let mut inner = self.inner.lock().unwrap();
        let Some(user) = inner.users.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(email) = &patch.email {
            user.email = email.clone();
        }
        if let Some(name) = &patch.name {
            user.name = name.clone();
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(is_active) = patch.is_active {
            user.is_active = is_active;
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.inner.lock().unwrap().users.remove(&id).is_some())
    }

    async fn list(&self, page: &PageParams) -> AppResult<Vec<User>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .users
            .values()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }
}
