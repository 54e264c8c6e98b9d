//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use boundless_core::config::auth::AuthConfig;
use boundless_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

/// An access/refresh token pair issued on login or refresh.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret_key.as_bytes()),
            access_ttl_minutes: config.access_ttl_minutes as i64,
            refresh_ttl_days: config.refresh_ttl_days as i64,
        }
    }

    /// Issues a single signed token of the given kind for the subject.
    ///
    /// Expiry is strictly in the future: now plus the configured TTL for
    /// the kind.
    pub fn issue(
        &self,
        kind: TokenType,
        subject: &str,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = match kind {
            TokenType::Access => now + chrono::Duration::minutes(self.access_ttl_minutes),
            TokenType::Refresh => now + chrono::Duration::days(self.refresh_ttl_days),
        };

        let claims = Claims {
            sub: subject.to_string(),
            token_type: kind,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode {kind} token: {e}")))?;

        Ok((token, exp))
    }

    /// Generates a new access + refresh token pair for the given user.
    pub fn generate_token_pair(&self, user_id: i64) -> Result<TokenPair, AppError> {
        let subject = user_id.to_string();
        let (access_token, access_expires_at) = self.issue(TokenType::Access, &subject)?;
        let (refresh_token, refresh_expires_at) = self.issue(TokenType::Refresh, &subject)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            secret_key: "unit-test-secret".to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
        }
    }

    #[test]
    fn test_pair_tokens_are_distinct_and_nonempty() {
        let encoder = JwtEncoder::new(&test_config());
        let pair = encoder.generate_token_pair(42).unwrap();

        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_ne!(pair.access_token, pair.refresh_token);
        assert!(pair.access_expires_at < pair.refresh_expires_at);
    }

    #[test]
    fn test_expiry_is_in_the_future() {
        let encoder = JwtEncoder::new(&test_config());
        let (_, exp) = encoder.issue(TokenType::Access, "42").unwrap();
        assert!(exp > Utc::now());
    }
}
