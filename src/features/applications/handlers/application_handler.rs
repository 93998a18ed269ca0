use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::applications::dtos::{
    ApplicationListQuery, ApplicationResponseDto, CreateApplicationDto, ResolveApplicationDto,
    UpdateApplicationDto,
};
use crate::features::applications::services::ApplicationService;
use crate::shared::types::{ApiResponse, Meta};

/// List application requests with pagination, search, and scopes
#[utoipa::path(
    get,
    path = "/api/applications",
    params(ApplicationListQuery),
    responses(
        (status = 200, description = "Paginated list of application requests", body = ApiResponse<Vec<ApplicationResponseDto>>)
    ),
    tag = "applications"
)]
pub async fn list_applications(
    State(service): State<Arc<ApplicationService>>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<Json<ApiResponse<Vec<ApplicationResponseDto>>>> {
    let page = service.list(&query).await?;
    let meta = Meta::of(&page);
    let dtos: Vec<ApplicationResponseDto> = page.items.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, Some(meta))))
}

/// Get an application request by id
#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(
        ("id" = i64, Path, description = "Application request id")
    ),
    responses(
        (status = 200, description = "Application request details", body = ApiResponse<ApplicationResponseDto>),
        (status = 404, description = "Application request not found")
    ),
    tag = "applications"
)]
pub async fn get_application(
    State(service): State<Arc<ApplicationService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ApplicationResponseDto>>> {
    let request = service.get(id).await?;
    Ok(Json(ApiResponse::success(
        Some(request.into()),
        None,
        None,
    )))
}

/// Submit a new application request
#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = CreateApplicationDto,
    responses(
        (status = 200, description = "Application request submitted", body = ApiResponse<ApplicationResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 422, description = "Cooperative does not exist")
    ),
    tag = "applications"
)]
pub async fn create_application(
    State(service): State<Arc<ApplicationService>>,
    AppJson(dto): AppJson<CreateApplicationDto>,
) -> Result<Json<ApiResponse<ApplicationResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let request = service.create(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(request.into()),
        Some("Pengajuan berhasil dibuat".to_string()),
        None,
    )))
}

/// Update a pending application request (status excluded)
#[utoipa::path(
    put,
    path = "/api/applications/{id}",
    params(
        ("id" = i64, Path, description = "Application request id")
    ),
    request_body = UpdateApplicationDto,
    responses(
        (status = 200, description = "Application request updated", body = ApiResponse<ApplicationResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Application request not found"),
        (status = 422, description = "Cooperative does not exist")
    ),
    tag = "applications"
)]
pub async fn update_application(
    State(service): State<Arc<ApplicationService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateApplicationDto>,
) -> Result<Json<ApiResponse<ApplicationResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let request = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(request.into()),
        Some(format!("Pengajuan dengan ID {} berhasil diperbarui", id)),
        None,
    )))
}

/// Approve or reject a submitted application request
#[utoipa::path(
    patch,
    path = "/api/applications/{id}/status",
    params(
        ("id" = i64, Path, description = "Application request id")
    ),
    request_body = ResolveApplicationDto,
    responses(
        (status = 200, description = "Application request resolved", body = ApiResponse<ApplicationResponseDto>),
        (status = 404, description = "Application request not found"),
        (status = 409, description = "Application request already resolved")
    ),
    tag = "applications"
)]
pub async fn resolve_application(
    State(service): State<Arc<ApplicationService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<ResolveApplicationDto>,
) -> Result<Json<ApiResponse<ApplicationResponseDto>>> {
    let request = service.update_status(id, dto.status).await?;
    Ok(Json(ApiResponse::success(
        Some(request.into()),
        Some(format!(
            "Status pengajuan dengan ID {} berhasil diperbarui",
            id
        )),
        None,
    )))
}

/// Delete an application request
#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    params(
        ("id" = i64, Path, description = "Application request id")
    ),
    responses(
        (status = 200, description = "Application request deleted"),
        (status = 404, description = "Application request not found")
    ),
    tag = "applications"
)]
pub async fn delete_application(
    State(service): State<Arc<ApplicationService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some(format!("Pengajuan dengan ID {} berhasil dihapus", id)),
        None,
    )))
}
