//! Auth session protocol — register, login, refresh, bearer resolution.

use std::sync::Arc;

use tracing::{debug, info, warn};

use boundless_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use boundless_auth::password::PasswordHasher;
use boundless_core::error::AppError;
use boundless_core::result::AppResult;
use boundless_entity::user::{CreateUser, DynUserStore, User, UserRole};

/// Orchestrates the session protocol over the token codec, password
/// hasher, and user store.
///
/// The service holds no mutable state of its own; every method is a pure
/// pipeline of codec calls and store calls, safe to share across request
/// tasks.
#[derive(Clone)]
pub struct AuthService {
    /// User store collaborator.
    users: DynUserStore,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
    /// Token decoder.
    decoder: Arc<JwtDecoder>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish()
    }
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: DynUserStore,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            encoder,
            decoder,
        }
    }

    /// Registers a new user.
    ///
    /// Email uniqueness is checked first (exact match); the new account
    /// gets the `user` role and starts active.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> AppResult<User> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::validation("Email already registered").with_code("EMAIL_EXISTS"));
        }

        let password_hash = self.hash_blocking(password.to_string()).await?;

        let user = self
            .users
            .create(&CreateUser {
                email: email.to_string(),
                password_hash,
                name: name.to_string(),
                role: UserRole::User,
            })
            .await?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Authenticates credentials and issues a token pair.
    ///
    /// A missing account and a wrong password produce the same error, so
    /// callers cannot probe which addresses are registered. The active
    /// check runs only after the credentials verify.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(TokenPair, User)> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Err(Self::invalid_credentials());
        };

        let valid = self
            .verify_blocking(password.to_string(), user.password_hash.clone())
            .await?;
        if !valid {
            warn!(user_id = user.id, "Login failed: wrong password");
            return Err(Self::invalid_credentials());
        }

        if !user.is_active {
            return Err(
                AppError::authorization("User account is inactive").with_code("INACTIVE_USER")
            );
        }

        let tokens = self.encoder.generate_token_pair(user.id)?;
        info!(user_id = user.id, "Login successful");
        Ok((tokens, user))
    }

    /// Exchanges a refresh token for a fresh token pair.
    ///
    /// The old refresh token stays valid until its natural expiry: with no
    /// server-side token store there is nothing to invalidate it against.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.decoder.decode_refresh_token(refresh_token).map_err(|e| {
            debug!(reason = %e, "Refresh token rejected");
            AppError::authentication("Invalid refresh token").with_code("INVALID_REFRESH_TOKEN")
        })?;

        let user_id: i64 = claims.sub.parse().map_err(|_| {
            debug!(subject = %claims.sub, "Refresh token subject is not a user id");
            AppError::authentication("Invalid refresh token").with_code("INVALID_REFRESH_TOKEN")
        })?;

        let user = match self.users.find_by_id(user_id).await? {
            Some(user) if user.is_active => user,
            _ => {
                return Err(
                    AppError::authentication("User not found or inactive").with_code("INVALID_USER")
                );
            }
        };

        let tokens = self.encoder.generate_token_pair(user.id)?;
        info!(user_id = user.id, "Token refreshed");
        Ok(tokens)
    }

    /// Resolves a bearer access token to its user principal.
    ///
    /// This is the first stage of the access guard: signature, expiry, and
    /// kind failures all collapse into one opaque invalid-token error; a
    /// verified token whose subject no longer exists is a not-found.
    pub async fn authenticate(&self, bearer_token: &str) -> AppResult<User> {
        let claims = self.decoder.decode_access_token(bearer_token).map_err(|e| {
            debug!(reason = %e, "Access token rejected");
            Self::invalid_token()
        })?;

        let user_id: i64 = claims.sub.parse().map_err(|_| {
            debug!(subject = %claims.sub, "Access token subject is not a user id");
            Self::invalid_token()
        })?;

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found").with_code("USER_NOT_FOUND"))
    }

    async fn hash_blocking(&self, password: String) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))?
    }

    async fn verify_blocking(&self, password: String, hash: String) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))?
    }

    fn invalid_credentials() -> AppError {
        AppError::authentication("Incorrect email or password").with_code("INVALID_CREDENTIALS")
    }

    fn invalid_token() -> AppError {
        AppError::authentication("Could not validate credentials").with_code("INVALID_TOKEN")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::{memory_store, test_auth_config};
    use boundless_auth::jwt::TokenType;

    fn service() -> AuthService {
        let config = test_auth_config();
        AuthService::new(
            memory_store(),
            Arc::new(PasswordHasher::new()),
            Arc::new(JwtEncoder::new(&config)),
            Arc::new(JwtDecoder::new(&config)),
        )
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let auth = service();

        let user = auth
            .register("alice@example.com", "pw123", "Alice")
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::User);
        assert!(user.is_active);

        let (tokens, logged_in) = auth.login("alice@example.com", "pw123").await.unwrap();
        assert_eq!(logged_in.id, user.id);
        assert!(!tokens.access_token.is_empty());
        assert!(!tokens.refresh_token.is_empty());
        assert_ne!(tokens.access_token, tokens.refresh_token);

        // The access token's subject resolves back to the created user.
        let config = test_auth_config();
        let claims = JwtDecoder::new(&config)
            .decode_access_token(&tokens.access_token)
            .unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let auth = service();
        auth.register("alice@example.com", "pw123", "Alice")
            .await
            .unwrap();

        let err = auth
            .register("alice@example.com", "other", "Alice II")
            .await
            .unwrap_err();
        assert_eq!(err.code, Some("EMAIL_EXISTS"));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let auth = service();
        auth.register("alice@example.com", "pw123", "Alice")
            .await
            .unwrap();

        let wrong_password = auth
            .login("alice@example.com", "nope")
            .await
            .unwrap_err();
        let unknown_email = auth.login("bob@example.com", "pw123").await.unwrap_err();

        assert_eq!(wrong_password.code, Some("INVALID_CREDENTIALS"));
        assert_eq!(wrong_password.code, unknown_email.code);
        assert_eq!(wrong_password.kind, unknown_email.kind);
    }

    #[tokio::test]
    async fn test_login_inactive_user() {
        let auth = service();
        let user = auth
            .register("alice@example.com", "pw123", "Alice")
            .await
            .unwrap();

        auth.users
            .update(
                user.id,
                &boundless_entity::user::UserPatch {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let err = auth.login("alice@example.com", "pw123").await.unwrap_err();
        assert_eq!(err.code, Some("INACTIVE_USER"));
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let auth = service();
        auth.register("alice@example.com", "pw123", "Alice")
            .await
            .unwrap();
        let (tokens, _) = auth.login("alice@example.com", "pw123").await.unwrap();

        let err = auth.refresh(&tokens.access_token).await.unwrap_err();
        assert_eq!(err.code, Some("INVALID_REFRESH_TOKEN"));
    }

    #[tokio::test]
    async fn test_refresh_issues_new_pair() {
        let auth = service();
        let user = auth
            .register("alice@example.com", "pw123", "Alice")
            .await
            .unwrap();
        let (tokens, _) = auth.login("alice@example.com", "pw123").await.unwrap();

        let fresh = auth.refresh(&tokens.refresh_token).await.unwrap();
        let claims = JwtDecoder::new(&test_auth_config())
            .decode_access_token(&fresh.access_token)
            .unwrap();
        assert_eq!(claims.sub, user.id.to_string());

        // Deliberate simplification: the old refresh token still verifies
        // after rotation, until it expires on its own.
        assert!(auth.refresh(&tokens.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_refresh_for_deactivated_user() {
        let auth = service();
        let user = auth
            .register("alice@example.com", "pw123", "Alice")
            .await
            .unwrap();
        let (tokens, _) = auth.login("alice@example.com", "pw123").await.unwrap();

        auth.users
            .update(
                user.id,
                &boundless_entity::user::UserPatch {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let err = auth.refresh(&tokens.refresh_token).await.unwrap_err();
        assert_eq!(err.code, Some("INVALID_USER"));
    }

    #[tokio::test]
    async fn test_authenticate_garbage_token() {
        let auth = service();
        let err = auth.authenticate("not-a-token").await.unwrap_err();
        assert_eq!(err.code, Some("INVALID_TOKEN"));
    }

    #[tokio::test]
    async fn test_authenticate_deleted_user() {
        let auth = service();
        let user = auth
            .register("alice@example.com", "pw123", "Alice")
            .await
            .unwrap();
        let (tokens, _) = auth.login("alice@example.com", "pw123").await.unwrap();

        auth.users.delete(user.id).await.unwrap();

        let err = auth.authenticate(&tokens.access_token).await.unwrap_err();
        assert_eq!(err.code, Some("USER_NOT_FOUND"));
    }
}
