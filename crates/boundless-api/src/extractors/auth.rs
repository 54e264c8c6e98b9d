//! Access guard extractors — bearer token to authenticated principal.
//!
//! Two stages: [`CurrentUser`] resolves a verified access token to its
//! principal; [`ActiveUser`] additionally gates on the active flag.
//! Handlers that need an active session depend on the second stage;
//! handlers that only need identity may depend on the first alone.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use boundless_core::error::AppError;
use boundless_entity::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// The principal resolved from the request's bearer access token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// A resolved principal whose account is active.
#[derive(Debug, Clone)]
pub struct ActiveUser(pub User);

impl std::ops::Deref for CurrentUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::Deref for ActiveUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::authentication("Missing Authorization header").with_code("INVALID_TOKEN")
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::authentication("Invalid Authorization header format")
                .with_code("INVALID_TOKEN")
        })?;

        let user = state.auth_service.authenticate(token).await?;

        Ok(CurrentUser(user))
    }
}

impl FromRequestParts<AppState> for ActiveUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if !user.is_active {
            return Err(AppError::authorization("Inactive user")
                .with_code("INACTIVE_USER")
                .into());
        }

        Ok(ActiveUser(user))
    }
}
