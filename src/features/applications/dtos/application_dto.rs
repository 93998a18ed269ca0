use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::applications::models::{
    ApplicationRequest, ApplicationStatus, ApplicationType,
};
use crate::shared::types::{default_limit, default_page};

/// Query parameters for listing application requests
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100)]
    pub limit: i64,
    /// Search by member name or type/status label
    #[serde(default)]
    pub search: String,
    /// Restrict to one applicant
    pub user_id: Option<i64>,
    /// Restrict to one cooperative
    pub cooperative_id: Option<i64>,
    /// Restrict to one application type
    pub r#type: Option<ApplicationType>,
    /// Keep requests dated on or after this day (inclusive)
    pub start_date: Option<NaiveDate>,
    /// Keep requests dated on or before this day (inclusive)
    pub end_date: Option<NaiveDate>,
}

/// Request DTO for creating an application request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationDto {
    pub user_id: i64,
    #[validate(length(min = 1, message = "Nama lengkap harus diisi"))]
    pub full_name: Option<String>,
    pub cooperative_id: i64,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub r#type: ApplicationType,
}

/// Request DTO for updating an application request.
///
/// The status is deliberately absent; it only moves through the resolve
/// endpoint.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationDto {
    pub user_id: Option<i64>,
    #[validate(length(min = 1, message = "Nama lengkap harus diisi"))]
    pub full_name: Option<String>,
    pub cooperative_id: Option<i64>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub r#type: Option<ApplicationType>,
}

/// The decision applied to a submitted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ApplicationDecision {
    #[serde(rename = "Disetujui")]
    Approved,
    #[serde(rename = "Ditolak")]
    Rejected,
}

impl From<ApplicationDecision> for ApplicationStatus {
    fn from(decision: ApplicationDecision) -> Self {
        match decision {
            ApplicationDecision::Approved => ApplicationStatus::Approved,
            ApplicationDecision::Rejected => ApplicationStatus::Rejected,
        }
    }
}

/// Request DTO for resolving an application request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveApplicationDto {
    pub status: ApplicationDecision,
}

/// Response DTO for application request data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponseDto {
    pub id: i64,
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub cooperative_id: i64,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub r#type: ApplicationType,
    pub status: ApplicationStatus,
}

impl From<ApplicationRequest> for ApplicationResponseDto {
    fn from(request: ApplicationRequest) -> Self {
        Self {
            id: request.id,
            user_id: request.user_id,
            full_name: request.full_name,
            cooperative_id: request.cooperative_id,
            amount: request.amount,
            date: request.date,
            r#type: request.r#type,
            status: request.status,
        }
    }
}
