//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use boundless_core::config::AppConfig;
use boundless_service::{AuthService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Auth session protocol.
    pub auth_service: Arc<AuthService>,
    /// User resource operations.
    pub user_service: Arc<UserService>,
}
