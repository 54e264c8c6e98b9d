//! User CRUD operations.

pub mod service;

pub use service::UserService;
