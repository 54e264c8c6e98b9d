//! User entity and related types.

pub mod model;
pub mod role;

pub use model::{CreateUser, User, UserPatch};
pub use role::UserRole;

use std::sync::Arc;

use boundless_core::traits::UserStore;

/// Shared handle to the user store collaborator.
pub type DynUserStore = Arc<dyn UserStore<User, CreateUser, UserPatch>>;
