use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::regions::models::{City, Province, Subdistrict};
use crate::shared::types::{default_limit, default_page};

// ==================== List Queries ====================

/// Query parameters for listing provinces
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceListQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100)]
    pub limit: i64,
    /// Search by name (case-insensitive, partial match)
    #[serde(default)]
    #[param(example = "jawa")]
    pub search: String,
}

/// Query parameters for listing cities
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CityListQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100)]
    pub limit: i64,
    /// Search by name (case-insensitive, partial match)
    #[serde(default)]
    pub search: String,
    /// Restrict to cities of one province
    pub province_id: Option<i64>,
}

/// Query parameters for listing subdistricts
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SubdistrictListQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100)]
    pub limit: i64,
    /// Search by name (case-insensitive, partial match)
    #[serde(default)]
    pub search: String,
    /// Restrict to subdistricts of one city
    pub city_id: Option<i64>,
}

// ==================== Mutation DTOs ====================

/// Request DTO for creating a province
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProvinceDto {
    #[validate(length(min = 2, message = "Nama provinsi minimal 2 karakter"))]
    pub name: String,
}

/// Request DTO for updating a province
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProvinceDto {
    #[validate(length(min = 2, message = "Nama provinsi minimal 2 karakter"))]
    pub name: Option<String>,
}

/// Request DTO for creating a city
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCityDto {
    #[validate(length(min = 2, message = "Nama kota minimal 2 karakter"))]
    pub name: String,
    pub province_id: i64,
}

/// Request DTO for updating a city
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCityDto {
    #[validate(length(min = 2, message = "Nama kota minimal 2 karakter"))]
    pub name: Option<String>,
    pub province_id: Option<i64>,
}

/// Request DTO for creating a subdistrict
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubdistrictDto {
    #[validate(length(min = 2, message = "Nama kecamatan minimal 2 karakter"))]
    pub name: String,
    pub city_id: i64,
}

/// Request DTO for updating a subdistrict
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubdistrictDto {
    #[validate(length(min = 2, message = "Nama kecamatan minimal 2 karakter"))]
    pub name: Option<String>,
    pub city_id: Option<i64>,
}

// ==================== Response DTOs ====================

/// Response DTO for province data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceResponseDto {
    pub id: i64,
    pub name: String,
}

impl From<Province> for ProvinceResponseDto {
    fn from(province: Province) -> Self {
        Self {
            id: province.id,
            name: province.name,
        }
    }
}

/// Response DTO for city data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CityResponseDto {
    pub id: i64,
    pub name: String,
    pub province_id: i64,
}

impl From<City> for CityResponseDto {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            province_id: city.province_id,
        }
    }
}

/// Response DTO for subdistrict data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubdistrictResponseDto {
    pub id: i64,
    pub name: String,
    pub city_id: i64,
}

impl From<Subdistrict> for SubdistrictResponseDto {
    fn from(subdistrict: Subdistrict) -> Self {
        Self {
            id: subdistrict.id,
            name: subdistrict.name,
            city_id: subdistrict.city_id,
        }
    }
}
