//! # boundless-core
//!
//! Core crate for the Boundless backend. Contains configuration schemas,
//! pagination types, the user-store trait seam, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Boundless crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
