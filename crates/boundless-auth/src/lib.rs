//! # boundless-auth
//!
//! Token issuance/verification and password hashing for the Boundless
//! backend.
//!
//! ## Modules
//!
//! - `jwt` — signed, expiring access/refresh token codec (HS256)
//! - `password` — Argon2id password hashing and verification

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenError, TokenPair, TokenType};
pub use password::PasswordHasher;
