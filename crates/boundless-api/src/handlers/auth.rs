//! Auth handlers — register, login, refresh, me, logout.

use axum::Json;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use validator::Validate;

use boundless_core::config::auth::AuthConfig;
use boundless_core::error::AppError;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, TokenResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::ActiveUser;
use crate::state::AppState;

/// Name of the cookie carrying the refresh token.
const REFRESH_COOKIE: &str = "refresh_token";

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .auth_service
        .register(&req.email, &req.password, &req.name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            user.into(),
            "User registered successfully",
        )),
    ))
}

/// POST /api/v1/auth/login
///
/// On success the refresh token is also set as an http-only cookie so
/// browser clients never expose it to scripts.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(HeaderMap, Json<ApiResponse<TokenResponse>>)> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (tokens, _user) = state.auth_service.login(&req.email, &req.password).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        refresh_cookie(&state.config.auth, &tokens.refresh_token)?,
    );

    Ok((
        headers,
        Json(ApiResponse::ok(
            TokenResponse {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
            },
            "Login successful",
        )),
    ))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<ApiResponse<TokenResponse>>> {
    let tokens = state.auth_service.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(
        TokenResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        },
        "Token refreshed successfully",
    )))
}

/// GET /api/v1/auth/me
pub async fn me(ActiveUser(user): ActiveUser) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::ok(
        user.into(),
        "User retrieved successfully",
    ))
}

/// POST /api/v1/auth/logout
///
/// Stateless: only clears the refresh cookie. Previously issued tokens
/// remain valid until they expire. Idempotent, never fails.
pub async fn logout() -> (HeaderMap, Json<ApiResponse<()>>) {
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, clear_refresh_cookie());

    (headers, Json(ApiResponse::message("Logout successful")))
}

/// Build the http-only `Set-Cookie` value for the refresh token, with
/// max-age matching the refresh TTL.
fn refresh_cookie(auth: &AuthConfig, token: &str) -> Result<HeaderValue, AppError> {
    let max_age = auth.refresh_ttl_days * 24 * 60 * 60;
    HeaderValue::from_str(&format!(
        "{REFRESH_COOKIE}={token}; Path=/; HttpOnly; Secure; SameSite=Lax; Max-Age={max_age}"
    ))
    .map_err(|e| AppError::internal(format!("Failed to build refresh cookie: {e}")))
}

/// `Set-Cookie` value that expires the refresh cookie immediately.
fn clear_refresh_cookie() -> HeaderValue {
    HeaderValue::from_static(
        "refresh_token=; Path=/; HttpOnly; Secure; SameSite=Lax; Max-Age=0",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_cookie_attributes() {
        let auth = AuthConfig {
            secret_key: "secret".to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
        };

        let value = refresh_cookie(&auth, "token-value").unwrap();
        let value = value.to_str().unwrap();

        assert!(value.starts_with("refresh_token=token-value;"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Secure"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains(&format!("Max-Age={}", 7 * 24 * 60 * 60)));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (headers, first) = logout().await;
        assert!(first.success);
        assert!(
            headers
                .get(SET_COOKIE)
                .unwrap()
                .to_str()
                .unwrap()
                .contains("Max-Age=0")
        );

        let (_, second) = logout().await;
        assert!(second.success);
    }
}
