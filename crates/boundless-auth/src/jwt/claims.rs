//! JWT claims structure used in access and refresh tokens.

use serde::{Deserialize, Serialize};

/// Claims payload embedded in every session token.
///
/// A token is a self-contained signed bundle: subject, kind, and expiry.
/// Nothing is persisted server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID, string-encoded.
    pub sub: String,
    /// Token type: access or refresh.
    pub token_type: TokenType,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived access token sent with API requests.
    Access,
    /// Long-lived refresh token used solely to mint new access tokens.
    Refresh,
}

impl TokenType {
    /// Return the token type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
