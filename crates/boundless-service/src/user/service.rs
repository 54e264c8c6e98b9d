//! User CRUD orchestration over the user store.

use std::sync::Arc;

use tracing::info;

use boundless_auth::password::PasswordHasher;
use boundless_core::error::AppError;
use boundless_core::result::AppResult;
use boundless_core::types::pagination::PageParams;
use boundless_entity::user::{CreateUser, DynUserStore, User, UserPatch, UserRole};

/// Handles the user resource API: list, fetch, create, update, delete.
#[derive(Clone)]
pub struct UserService {
    /// User store collaborator.
    users: DynUserStore,
    /// Password hasher, for direct account creation.
    hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: DynUserStore, hasher: Arc<PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Lists users with offset/limit pagination.
    pub async fn list(&self, page: &PageParams) -> AppResult<Vec<User>> {
        self.users.list(page).await
    }

    /// Fetches a single user by id.
    pub async fn get(&self, id: i64) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found").with_code("USER_NOT_FOUND"))
    }

    /// Creates a user directly (as opposed to self-registration).
    pub async fn create(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: UserRole,
    ) -> AppResult<User> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::validation("Email already registered").with_code("EMAIL_EXISTS"));
        }

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))??;

        let user = self
            .users
            .create(&CreateUser {
                email: email.to_string(),
                password_hash,
                name: name.to_string(),
                role,
            })
            .await?;

        info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Applies a partial update; the store bumps the updated timestamp.
    pub async fn update(&self, id: i64, patch: &UserPatch) -> AppResult<User> {
        let user = self
            .users
            .update(id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("User not found").with_code("USER_NOT_FOUND"))?;

        info!(user_id = user.id, "User updated");
        Ok(user)
    }

    /// Deletes a user by id.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let deleted = self.users.delete(id).await?;
        if !deleted {
            return Err(AppError::not_found("User not found").with_code("USER_NOT_FOUND"));
        }

        info!(user_id = id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::memory_store;

    fn service() -> UserService {
        UserService::new(memory_store(), Arc::new(PasswordHasher::new()))
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let users = service();

        let created = users
            .create("bob@example.com", "hunter2", "Bob", UserRole::Manager)
            .await
            .unwrap();
        assert_eq!(created.role, UserRole::Manager);

        let fetched = users.get(created.id).await.unwrap();
        assert_eq!(fetched.email, "bob@example.com");
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let users = service();
        users
            .create("bob@example.com", "hunter2", "Bob", UserRole::User)
            .await
            .unwrap();

        let err = users
            .create("bob@example.com", "other", "Robert", UserRole::User)
            .await
            .unwrap_err();
        assert_eq!(err.code, Some("EMAIL_EXISTS"));
    }

    #[tokio::test]
    async fn test_update_bumps_timestamp_and_applies_fields() {
        let users = service();
        let created = users
            .create("bob@example.com", "hunter2", "Bob", UserRole::User)
            .await
            .unwrap();

        let updated = users
            .update(
                created.id,
                &UserPatch {
                    name: Some("Robert".to_string()),
                    role: Some(UserRole::Admin),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Robert");
        assert_eq!(updated.role, UserRole::Admin);
        assert_eq!(updated.email, "bob@example.com");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let users = service();
        let err = users.update(999, &UserPatch::default()).await.unwrap_err();
        assert_eq!(err.code, Some("USER_NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let users = service();
        let created = users
            .create("bob@example.com", "hunter2", "Bob", UserRole::User)
            .await
            .unwrap();

        users.delete(created.id).await.unwrap();
        assert!(users.delete(created.id).await.is_err());
        assert!(users.get(created.id).await.is_err());
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let users = service();
        for i in 0..5 {
            users
                .create(
                    &format!("user{i}@example.com"),
                    "hunter2",
                    &format!("User {i}"),
                    UserRole::User,
                )
                .await
                .unwrap();
        }

        let page = users.list(&PageParams::new(2, 2)).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].email, "user2@example.com");
    }
}
