//! User store trait for principal persistence.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::pagination::PageParams;

/// Persistence contract for user principals.
///
/// Defined with generic type parameters so this crate stays free of
/// entity dependencies; `boundless-entity` provides the concrete
/// instantiation and `boundless-database` the production implementation.
/// Every call is treated as atomic by callers; failures propagate
/// immediately and are never retried.
#[async_trait]
pub trait UserStore<User, Create, Patch>: Send + Sync + 'static
where
    User: Send + Sync + 'static,
    Create: Send + Sync + 'static,
    Patch: Send + Sync + 'static,
{
    /// Find a user by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find a user by email. Lookup is exact-match: no case folding or
    /// other normalization is applied to the given address.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user and return it.
    async fn create(&self, data: &Create) -> AppResult<User>;

    /// Apply a partial update to a user, bumping its updated timestamp.
    /// Returns `None` if no user with the given id exists.
    async fn update(&self, id: i64, patch: &Patch) -> AppResult<Option<User>>;

    /// Delete a user by primary key. Returns `true` if deleted.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// List users with offset/limit pagination.
    async fn list(&self, page: &PageParams) -> AppResult<Vec<User>>;
}
