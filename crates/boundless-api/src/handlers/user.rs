//! User resource handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use validator::Validate;

use boundless_core::error::AppError;
use boundless_core::types::pagination::PageParams;
use boundless_entity::user::UserPatch;

use crate::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = state.user_service.list(&page).await?;

    Ok(Json(ApiResponse::ok(
        users.into_iter().map(UserResponse::from).collect(),
        "Users retrieved successfully",
    )))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get(user_id).await?;

    Ok(Json(ApiResponse::ok(
        user.into(),
        "User retrieved successfully",
    )))
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .user_service
        .create(&req.email, &req.password, &req.name, req.role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(user.into(), "User created successfully")),
    ))
}

/// PATCH /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let patch = UserPatch {
        email: req.email,
        name: req.name,
        role: req.role,
        is_active: req.is_active,
    };
    let user = state.user_service.update(user_id, &patch).await?;

    Ok(Json(ApiResponse::ok(
        user.into(),
        "User updated successfully",
    )))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.user_service.delete(user_id).await?;

    Ok(Json(ApiResponse::message("User deleted successfully")))
}
