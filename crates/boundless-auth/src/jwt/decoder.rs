//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use thiserror::Error;

use boundless_core::config::auth::AuthConfig;

use super::claims::{Claims, TokenType};

/// Why a token was rejected.
///
/// The distinction exists for server-side diagnostics only. Callers must
/// collapse all variants into a single opaque invalid-token error before
/// anything reaches a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The signature does not verify against the configured secret.
    #[error("signature verification failed")]
    InvalidSignature,
    /// The token's expiry has passed.
    #[error("token has expired")]
    Expired,
    /// The token verified but carries the wrong kind.
    #[error("expected {expected} token, got {actual}")]
    WrongKind {
        /// The kind the caller required.
        expected: TokenType,
        /// The kind encoded in the token.
        actual: TokenType,
    },
    /// The string could not be decoded as a token at all.
    #[error("malformed token")]
    Malformed,
}

/// Validates signed session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    ///
    /// The algorithm is pinned to HS256 here; the `alg` field asserted by
    /// a token header is never trusted.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.secret_key.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_kind(token, TokenType::Access)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_kind(token, TokenType::Refresh)
    }

    fn decode_kind(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        let claims = self.decode(token)?;

        if claims.token_type != expected {
            return Err(TokenError::WrongKind {
                expected,
                actual: claims.token_type,
            });
        }

        Ok(claims)
    }

    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn test_config() -> AuthConfig {
        AuthConfig {
            secret_key: "unit-test-secret".to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
        }
    }

    fn codec() -> (JwtEncoder, JwtDecoder) {
        let config = test_config();
        (JwtEncoder::new(&config), JwtDecoder::new(&config))
    }

    #[test]
    fn test_roundtrip_preserves_subject() {
        let (encoder, decoder) = codec();
        let (token, _) = encoder.issue(TokenType::Access, "42").unwrap();

        let claims = decoder.decode_access_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn test_kind_confusion_is_rejected_both_ways() {
        let (encoder, decoder) = codec();

        let (refresh, _) = encoder.issue(TokenType::Refresh, "42").unwrap();
        assert_eq!(
            decoder.decode_access_token(&refresh),
            Err(TokenError::WrongKind {
                expected: TokenType::Access,
                actual: TokenType::Refresh,
            })
        );

        let (access, _) = encoder.issue(TokenType::Access, "42").unwrap();
        assert_eq!(
            decoder.decode_refresh_token(&access),
            Err(TokenError::WrongKind {
                expected: TokenType::Refresh,
                actual: TokenType::Access,
            })
        );
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = test_config();
        let decoder = JwtDecoder::new(&config);

        // Hand-craft a token whose expiry is well past the leeway window.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "42".to_string(),
            token_type: TokenType::Access,
            iat: now - 300,
            exp: now - 120,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret_key.as_bytes()),
        )
        .unwrap();

        assert_eq!(decoder.decode_access_token(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let (_, decoder) = codec();

        let other = AuthConfig {
            secret_key: "a-different-secret".to_string(),
            ..test_config()
        };
        let (token, _) = JwtEncoder::new(&other).issue(TokenType::Access, "42").unwrap();

        assert_eq!(
            decoder.decode_access_token(&token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let (_, decoder) = codec();
        assert_eq!(
            decoder.decode_access_token("not.a.token"),
            Err(TokenError::Malformed)
        );
        assert_eq!(decoder.decode_refresh_token(""), Err(TokenError::Malformed));
    }
}
