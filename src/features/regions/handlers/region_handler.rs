use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::regions::dtos::{
    CityListQuery, CityResponseDto, CreateCityDto, CreateProvinceDto, CreateSubdistrictDto,
    ProvinceListQuery, ProvinceResponseDto, SubdistrictListQuery, SubdistrictResponseDto,
    UpdateCityDto, UpdateProvinceDto, UpdateSubdistrictDto,
};
use crate::features::regions::services::RegionService;
use crate::shared::types::{ApiResponse, Meta};

// ==================== Province Handlers ====================

/// List provinces with pagination and search
#[utoipa::path(
    get,
    path = "/api/regions/provinces",
    params(ProvinceListQuery),
    responses(
        (status = 200, description = "Paginated list of provinces", body = ApiResponse<Vec<ProvinceResponseDto>>)
    ),
    tag = "regions"
)]
pub async fn list_provinces(
    State(service): State<Arc<RegionService>>,
    Query(query): Query<ProvinceListQuery>,
) -> Result<Json<ApiResponse<Vec<ProvinceResponseDto>>>> {
    let page = service.list_provinces(&query).await?;
    let meta = Meta::of(&page);
    let dtos: Vec<ProvinceResponseDto> = page.items.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, Some(meta))))
}

/// Get a province by id
#[utoipa::path(
    get,
    path = "/api/regions/provinces/{id}",
    params(
        ("id" = i64, Path, description = "Province id")
    ),
    responses(
        (status = 200, description = "Province details", body = ApiResponse<ProvinceResponseDto>),
        (status = 404, description = "Province not found")
    ),
    tag = "regions"
)]
pub async fn get_province(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ProvinceResponseDto>>> {
    let province = service.get_province(id).await?;
    Ok(Json(ApiResponse::success(
        Some(province.into()),
        None,
        None,
    )))
}

/// Create a province
#[utoipa::path(
    post,
    path = "/api/regions/provinces",
    request_body = CreateProvinceDto,
    responses(
        (status = 200, description = "Province created", body = ApiResponse<ProvinceResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "regions"
)]
pub async fn create_province(
    State(service): State<Arc<RegionService>>,
    AppJson(dto): AppJson<CreateProvinceDto>,
) -> Result<Json<ApiResponse<ProvinceResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let province = service.create_province(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(province.into()),
        Some("Provinsi berhasil ditambahkan".to_string()),
        None,
    )))
}

/// Update a province
#[utoipa::path(
    put,
    path = "/api/regions/provinces/{id}",
    params(
        ("id" = i64, Path, description = "Province id")
    ),
    request_body = UpdateProvinceDto,
    responses(
        (status = 200, description = "Province updated", body = ApiResponse<ProvinceResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Province not found")
    ),
    tag = "regions"
)]
pub async fn update_province(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateProvinceDto>,
) -> Result<Json<ApiResponse<ProvinceResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let province = service.update_province(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(province.into()),
        Some(format!("Provinsi dengan ID {} berhasil diperbarui", id)),
        None,
    )))
}

/// Delete a province
#[utoipa::path(
    delete,
    path = "/api/regions/provinces/{id}",
    params(
        ("id" = i64, Path, description = "Province id")
    ),
    responses(
        (status = 200, description = "Province deleted"),
        (status = 404, description = "Province not found"),
        (status = 409, description = "Province still has dependents")
    ),
    tag = "regions"
)]
pub async fn delete_province(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_province(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some(format!("Provinsi dengan ID {} berhasil dihapus", id)),
        None,
    )))
}

/// List cities of a province (cascading selection)
#[utoipa::path(
    get,
    path = "/api/regions/provinces/{id}/cities",
    params(
        ("id" = i64, Path, description = "Province id"),
        ProvinceListQuery
    ),
    responses(
        (status = 200, description = "Paginated list of cities in the province", body = ApiResponse<Vec<CityResponseDto>>),
        (status = 404, description = "Province not found")
    ),
    tag = "regions"
)]
pub async fn list_cities_by_province(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<i64>,
    Query(query): Query<ProvinceListQuery>,
) -> Result<Json<ApiResponse<Vec<CityResponseDto>>>> {
    // Verify the parent first so a missing province is a 404, not an empty page
    service.get_province(id).await?;

    let scoped = CityListQuery {
        page: query.page,
        limit: query.limit,
        search: query.search,
        province_id: Some(id),
    };
    let page = service.list_cities(&scoped).await?;
    let meta = Meta::of(&page);
    let dtos: Vec<CityResponseDto> = page.items.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, Some(meta))))
}

// ==================== City Handlers ====================

/// List cities with pagination, search, and optional province scope
#[utoipa::path(
    get,
    path = "/api/regions/cities",
    params(CityListQuery),
    responses(
        (status = 200, description = "Paginated list of cities", body = ApiResponse<Vec<CityResponseDto>>)
    ),
    tag = "regions"
)]
pub async fn list_cities(
    State(service): State<Arc<RegionService>>,
    Query(query): Query<CityListQuery>,
) -> Result<Json<ApiResponse<Vec<CityResponseDto>>>> {
    let page = service.list_cities(&query).await?;
    let meta = Meta::of(&page);
    let dtos: Vec<CityResponseDto> = page.items.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, Some(meta))))
}

/// Get a city by id
#[utoipa::path(
    get,
    path = "/api/regions/cities/{id}",
    params(
        ("id" = i64, Path, description = "City id")
    ),
    responses(
        (status = 200, description = "City details", body = ApiResponse<CityResponseDto>),
        (status = 404, description = "City not found")
    ),
    tag = "regions"
)]
pub async fn get_city(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CityResponseDto>>> {
    let city = service.get_city(id).await?;
    Ok(Json(ApiResponse::success(Some(city.into()), None, None)))
}

/// Create a city under an existing province
#[utoipa::path(
    post,
    path = "/api/regions/cities",
    request_body = CreateCityDto,
    responses(
        (status = 200, description = "City created", body = ApiResponse<CityResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 422, description = "Province does not exist")
    ),
    tag = "regions"
)]
pub async fn create_city(
    State(service): State<Arc<RegionService>>,
    AppJson(dto): AppJson<CreateCityDto>,
) -> Result<Json<ApiResponse<CityResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let city = service.create_city(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(city.into()),
        Some("Kota berhasil ditambahkan".to_string()),
        None,
    )))
}

/// Update a city
#[utoipa::path(
    put,
    path = "/api/regions/cities/{id}",
    params(
        ("id" = i64, Path, description = "City id")
    ),
    request_body = UpdateCityDto,
    responses(
        (status = 200, description = "City updated", body = ApiResponse<CityResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "City not found"),
        (status = 422, description = "Province does not exist")
    ),
    tag = "regions"
)]
pub async fn update_city(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateCityDto>,
) -> Result<Json<ApiResponse<CityResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let city = service.update_city(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(city.into()),
        Some(format!("Kota dengan ID {} berhasil diperbarui", id)),
        None,
    )))
}

/// Delete a city
#[utoipa::path(
    delete,
    path = "/api/regions/cities/{id}",
    params(
        ("id" = i64, Path, description = "City id")
    ),
    responses(
        (status = 200, description = "City deleted"),
        (status = 404, description = "City not found"),
        (status = 409, description = "City still has dependents")
    ),
    tag = "regions"
)]
pub async fn delete_city(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_city(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some(format!("Kota dengan ID {} berhasil dihapus", id)),
        None,
    )))
}

/// List subdistricts of a city (cascading selection)
#[utoipa::path(
    get,
    path = "/api/regions/cities/{id}/subdistricts",
    params(
        ("id" = i64, Path, description = "City id"),
        ProvinceListQuery
    ),
    responses(
        (status = 200, description = "Paginated list of subdistricts in the city", body = ApiResponse<Vec<SubdistrictResponseDto>>),
        (status = 404, description = "City not found")
    ),
    tag = "regions"
)]
pub async fn list_subdistricts_by_city(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<i64>,
    Query(query): Query<ProvinceListQuery>,
) -> Result<Json<ApiResponse<Vec<SubdistrictResponseDto>>>> {
    service.get_city(id).await?;

    let scoped = SubdistrictListQuery {
        page: query.page,
        limit: query.limit,
        search: query.search,
        city_id: Some(id),
    };
    let page = service.list_subdistricts(&scoped).await?;
    let meta = Meta::of(&page);
    let dtos: Vec<SubdistrictResponseDto> = page.items.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, Some(meta))))
}

// ==================== Subdistrict Handlers ====================

/// List subdistricts with pagination, search, and optional city scope
#[utoipa::path(
    get,
    path = "/api/regions/subdistricts",
    params(SubdistrictListQuery),
    responses(
        (status = 200, description = "Paginated list of subdistricts", body = ApiResponse<Vec<SubdistrictResponseDto>>)
    ),
    tag = "regions"
)]
pub async fn list_subdistricts(
    State(service): State<Arc<RegionService>>,
    Query(query): Query<SubdistrictListQuery>,
) -> Result<Json<ApiResponse<Vec<SubdistrictResponseDto>>>> {
    let page = service.list_subdistricts(&query).await?;
    let meta = Meta::of(&page);
    let dtos: Vec<SubdistrictResponseDto> = page.items.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, Some(meta))))
}

/// Get a subdistrict by id
#[utoipa::path(
    get,
    path = "/api/regions/subdistricts/{id}",
    params(
        ("id" = i64, Path, description = "Subdistrict id")
    ),
    responses(
        (status = 200, description = "Subdistrict details", body = ApiResponse<SubdistrictResponseDto>),
        (status = 404, description = "Subdistrict not found")
    ),
    tag = "regions"
)]
pub async fn get_subdistrict(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<SubdistrictResponseDto>>> {
    let subdistrict = service.get_subdistrict(id).await?;
    Ok(Json(ApiResponse::success(
        Some(subdistrict.into()),
        None,
        None,
    )))
}

/// Create a subdistrict under an existing city
#[utoipa::path(
    post,
    path = "/api/regions/subdistricts",
    request_body = CreateSubdistrictDto,
    responses(
        (status = 200, description = "Subdistrict created", body = ApiResponse<SubdistrictResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 422, description = "City does not exist")
    ),
    tag = "regions"
)]
pub async fn create_subdistrict(
    State(service): State<Arc<RegionService>>,
    AppJson(dto): AppJson<CreateSubdistrictDto>,
) -> Result<Json<ApiResponse<SubdistrictResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let subdistrict = service.create_subdistrict(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(subdistrict.into()),
        Some("Kecamatan berhasil ditambahkan".to_string()),
        None,
    )))
}

/// Update a subdistrict
#[utoipa::path(
    put,
    path = "/api/regions/subdistricts/{id}",
    params(
        ("id" = i64, Path, description = "Subdistrict id")
    ),
    request_body = UpdateSubdistrictDto,
    responses(
        (status = 200, description = "Subdistrict updated", body = ApiResponse<SubdistrictResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Subdistrict not found"),
        (status = 422, description = "City does not exist")
    ),
    tag = "regions"
)]
pub async fn update_subdistrict(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateSubdistrictDto>,
) -> Result<Json<ApiResponse<SubdistrictResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let subdistrict = service.update_subdistrict(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(subdistrict.into()),
        Some(format!("Kecamatan dengan ID {} berhasil diperbarui", id)),
        None,
    )))
}

/// Delete a subdistrict
#[utoipa::path(
    delete,
    path = "/api/regions/subdistricts/{id}",
    params(
        ("id" = i64, Path, description = "Subdistrict id")
    ),
    responses(
        (status = 200, description = "Subdistrict deleted"),
        (status = 404, description = "Subdistrict not found"),
        (status = 409, description = "Subdistrict still has dependents")
    ),
    tag = "regions"
)]
pub async fn delete_subdistrict(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_subdistrict(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some(format!("Kecamatan dengan ID {} berhasil dihapus", id)),
        None,
    )))
}
