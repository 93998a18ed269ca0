use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::users::dtos::{
    CreateUserDto, UpdateUserDto, UserListQuery, UserResponseDto,
};
use crate::features::users::services::UserService;
use crate::shared::types::{ApiResponse, Meta};

/// List users with pagination, search, and role scope
#[utoipa::path(
    get,
    path = "/api/users",
    params(UserListQuery),
    responses(
        (status = 200, description = "Paginated list of users", body = ApiResponse<Vec<UserResponseDto>>)
    ),
    tag = "users"
)]
pub async fn list_users(
    State(service): State<Arc<UserService>>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let page = service.list(&query).await?;
    let meta = Meta::of(&page);
    let dtos: Vec<UserResponseDto> = page.items.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, Some(meta))))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserResponseDto>),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let user = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(user.into()), None, None)))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 200, description = "User created", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<CreateUserDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.create(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(user.into()),
        Some("User berhasil ditambahkan".to_string()),
        None,
    )))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered")
    ),
    tag = "users"
)]
pub async fn update_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateUserDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(user.into()),
        Some(format!("User dengan ID {} berhasil diperbarui", id)),
        None,
    )))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some(format!("User dengan ID {} berhasil dihapus", id)),
        None,
    )))
}
