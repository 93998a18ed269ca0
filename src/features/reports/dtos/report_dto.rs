use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::reports::models::{LoanReport, LoanStatus, SavingReport, SavingType};
use crate::shared::types::{default_limit, default_page};

/// Query parameters for listing ledger reports
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ReportListQuery {
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
    /// Restrict to one cooperative
    pub cooperative_id: Option<i64>,
    /// Keep entries dated on or after this day (inclusive)
    pub start_date: Option<NaiveDate>,
    /// Keep entries dated on or before this day (inclusive)
    pub end_date: Option<NaiveDate>,
}

// ==================== Saving Reports ====================

/// Request DTO for creating a saving report
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSavingReportDto {
    pub cooperative_id: i64,
    pub user_id: i64,
    #[validate(length(min = 1, message = "Nama lengkap harus diisi"))]
    pub full_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub r#type: SavingType,
}

/// Request DTO for updating a saving report
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSavingReportDto {
    pub cooperative_id: Option<i64>,
    pub user_id: Option<i64>,
    #[validate(length(min = 1, message = "Nama lengkap harus diisi"))]
    pub full_name: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub r#type: Option<SavingType>,
}

/// Response DTO for saving report data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavingReportResponseDto {
    pub id: i64,
    pub cooperative_id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub r#type: SavingType,
}

impl From<SavingReport> for SavingReportResponseDto {
    fn from(report: SavingReport) -> Self {
        Self {
            id: report.id,
            cooperative_id: report.cooperative_id,
            user_id: report.user_id,
            full_name: report.full_name,
            amount: report.amount,
            date: report.date,
            r#type: report.r#type,
        }
    }
}

// ==================== Loan Reports ====================

/// Request DTO for creating a loan report
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoanReportDto {
    pub cooperative_id: i64,
    pub user_id: i64,
    #[validate(length(min = 1, message = "Nama lengkap harus diisi"))]
    pub full_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub status: LoanStatus,
}

/// Request DTO for updating a loan report
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLoanReportDto {
    pub cooperative_id: Option<i64>,
    pub user_id: Option<i64>,
    #[validate(length(min = 1, message = "Nama lengkap harus diisi"))]
    pub full_name: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub status: Option<LoanStatus>,
}

/// Response DTO for loan report data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanReportResponseDto {
    pub id: i64,
    pub cooperative_id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub status: LoanStatus,
}

impl From<LoanReport> for LoanReportResponseDto {
    fn from(report: LoanReport) -> Self {
        Self {
            id: report.id,
            cooperative_id: report.cooperative_id,
            user_id: report.user_id,
            full_name: report.full_name,
            amount: report.amount,
            date: report.date,
            status: report.status,
        }
    }
}
