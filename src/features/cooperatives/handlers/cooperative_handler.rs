use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::cooperatives::dtos::{
    CooperativeListQuery, CooperativeResponseDto, CreateCooperativeDto, UpdateCooperativeDto,
};
use crate::features::cooperatives::services::CooperativeService;
use crate::shared::types::{ApiResponse, Meta};

/// List cooperatives with pagination, search, and region scopes
#[utoipa::path(
    get,
    path = "/api/cooperatives",
    params(CooperativeListQuery),
    responses(
        (status = 200, description = "Paginated list of cooperatives", body = ApiResponse<Vec<CooperativeResponseDto>>)
    ),
    tag = "cooperatives"
)]
pub async fn list_cooperatives(
    State(service): State<Arc<CooperativeService>>,
    Query(query): Query<CooperativeListQuery>,
) -> Result<Json<ApiResponse<Vec<CooperativeResponseDto>>>> {
    let page = service.list(&query).await?;
    let meta = Meta::of(&page);
    let dtos: Vec<CooperativeResponseDto> = page.items.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, Some(meta))))
}

/// Get a cooperative by id
#[utoipa::path(
    get,
    path = "/api/cooperatives/{id}",
    params(
        ("id" = i64, Path, description = "Cooperative id")
    ),
    responses(
        (status = 200, description = "Cooperative details", body = ApiResponse<CooperativeResponseDto>),
        (status = 404, description = "Cooperative not found")
    ),
    tag = "cooperatives"
)]
pub async fn get_cooperative(
    State(service): State<Arc<CooperativeService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CooperativeResponseDto>>> {
    let coop = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(coop.into()), None, None)))
}

/// Create a cooperative anchored to a valid region chain
#[utoipa::path(
    post,
    path = "/api/cooperatives",
    request_body = CreateCooperativeDto,
    responses(
        (status = 200, description = "Cooperative created", body = ApiResponse<CooperativeResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 422, description = "Region chain is missing or inconsistent")
    ),
    tag = "cooperatives"
)]
pub async fn create_cooperative(
    State(service): State<Arc<CooperativeService>>,
    AppJson(dto): AppJson<CreateCooperativeDto>,
) -> Result<Json<ApiResponse<CooperativeResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let coop = service.create(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(coop.into()),
        Some("Koperasi berhasil ditambahkan".to_string()),
        None,
    )))
}

/// Update a cooperative
#[utoipa::path(
    put,
    path = "/api/cooperatives/{id}",
    params(
        ("id" = i64, Path, description = "Cooperative id")
    ),
    request_body = UpdateCooperativeDto,
    responses(
        (status = 200, description = "Cooperative updated", body = ApiResponse<CooperativeResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Cooperative not found"),
        (status = 422, description = "Region chain is missing or inconsistent")
    ),
    tag = "cooperatives"
)]
pub async fn update_cooperative(
    State(service): State<Arc<CooperativeService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateCooperativeDto>,
) -> Result<Json<ApiResponse<CooperativeResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let coop = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(coop.into()),
        Some(format!("Koperasi dengan ID {} berhasil diperbarui", id)),
        None,
    )))
}

/// Delete a cooperative
#[utoipa::path(
    delete,
    path = "/api/cooperatives/{id}",
    params(
        ("id" = i64, Path, description = "Cooperative id")
    ),
    responses(
        (status = 200, description = "Cooperative deleted"),
        (status = 404, description = "Cooperative not found"),
        (status = 409, description = "Cooperative still has ledger records")
    ),
    tag = "cooperatives"
)]
pub async fn delete_cooperative(
    State(service): State<Arc<CooperativeService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some(format!("Koperasi dengan ID {} berhasil dihapus", id)),
        None,
    )))
}

/// List cooperatives of a subdistrict (cascading selection)
#[utoipa::path(
    get,
    path = "/api/regions/subdistricts/{id}/cooperatives",
    params(
        ("id" = i64, Path, description = "Subdistrict id"),
        CooperativeListQuery
    ),
    responses(
        (status = 200, description = "Paginated list of cooperatives in the subdistrict", body = ApiResponse<Vec<CooperativeResponseDto>>)
    ),
    tag = "cooperatives"
)]
pub async fn list_cooperatives_by_subdistrict(
    State(service): State<Arc<CooperativeService>>,
    Path(id): Path<i64>,
    Query(query): Query<CooperativeListQuery>,
) -> Result<Json<ApiResponse<Vec<CooperativeResponseDto>>>> {
    let scoped = CooperativeListQuery {
        subdistrict_id: Some(id),
        ..query
    };
    let page = service.list(&scoped).await?;
    let meta = Meta::of(&page);
    let dtos: Vec<CooperativeResponseDto> = page.items.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, Some(meta))))
}
