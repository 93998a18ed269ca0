use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::cooperatives::models::Cooperative;
use crate::shared::types::{default_limit, default_page};

/// Query parameters for listing cooperatives
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CooperativeListQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100)]
    pub limit: i64,
    /// Search by cooperative name (case-insensitive, partial match)
    #[serde(default)]
    #[param(example = "koperasi maju")]
    pub search: String,
    /// Restrict to one province
    pub province_id: Option<i64>,
    /// Restrict to one city
    pub city_id: Option<i64>,
    /// Restrict to one subdistrict
    pub subdistrict_id: Option<i64>,
}

/// Request DTO for creating a cooperative
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCooperativeDto {
    #[validate(length(min = 1, message = "Nama koperasi harus diisi"))]
    pub name: String,
    pub province_id: i64,
    pub city_id: i64,
    pub subdistrict_id: i64,
}

/// Request DTO for updating a cooperative
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCooperativeDto {
    #[validate(length(min = 1, message = "Nama koperasi harus diisi"))]
    pub name: Option<String>,
    pub province_id: Option<i64>,
    pub city_id: Option<i64>,
    pub subdistrict_id: Option<i64>,
}

/// Response DTO for cooperative data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CooperativeResponseDto {
    pub id: i64,
    pub name: String,
    pub province_id: i64,
    pub city_id: i64,
    pub subdistrict_id: i64,
}

impl From<Cooperative> for CooperativeResponseDto {
    fn from(coop: Cooperative) -> Self {
        Self {
            id: coop.id,
            name: coop.name,
            province_id: coop.province_id,
            city_id: coop.city_id,
            subdistrict_id: coop.subdistrict_id,
        }
    }
}
