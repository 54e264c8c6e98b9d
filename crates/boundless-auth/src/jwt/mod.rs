//! Signed session token codec.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{Claims, TokenType};
pub use decoder::{JwtDecoder, TokenError};
pub use encoder::{JwtEncoder, TokenPair};
