//! # boundless-api
//!
//! HTTP API layer for Boundless built on Axum.
//!
//! Provides the REST endpoints, the two-stage access guard extractors,
//! request logging middleware, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
