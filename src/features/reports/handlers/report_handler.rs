use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::reports::dtos::{
    CreateLoanReportDto, CreateSavingReportDto, LoanReportResponseDto, ReportListQuery,
    SavingReportResponseDto, UpdateLoanReportDto, UpdateSavingReportDto,
};
use crate::features::reports::services::{LoanReportService, SavingReportService};
use crate::shared::types::{ApiResponse, Meta};

/// Shared state for the report handlers
#[derive(Clone)]
pub struct ReportState {
    pub savings: Arc<SavingReportService>,
    pub loans: Arc<LoanReportService>,
}

// ==================== Saving Report Handlers ====================

/// List saving reports with pagination, search, and date range
#[utoipa::path(
    get,
    path = "/api/reports/savings",
    params(ReportListQuery),
    responses(
        (status = 200, description = "Paginated list of saving reports", body = ApiResponse<Vec<SavingReportResponseDto>>)
    ),
    tag = "reports"
)]
pub async fn list_saving_reports(
    State(state): State<ReportState>,
    Query(query): Query<ReportListQuery>,
) -> Result<Json<ApiResponse<Vec<SavingReportResponseDto>>>> {
    let page = state.savings.list(&query).await?;
    let meta = Meta::of(&page);
    let dtos: Vec<SavingReportResponseDto> = page.items.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, Some(meta))))
}

/// Get a saving report by id
#[utoipa::path(
    get,
    path = "/api/reports/savings/{id}",
    params(
        ("id" = i64, Path, description = "Saving report id")
    ),
    responses(
        (status = 200, description = "Saving report details", body = ApiResponse<SavingReportResponseDto>),
        (status = 404, description = "Saving report not found")
    ),
    tag = "reports"
)]
pub async fn get_saving_report(
    State(state): State<ReportState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<SavingReportResponseDto>>> {
    let report = state.savings.get(id).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Create a saving report
#[utoipa::path(
    post,
    path = "/api/reports/savings",
    request_body = CreateSavingReportDto,
    responses(
        (status = 200, description = "Saving report created", body = ApiResponse<SavingReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 422, description = "Cooperative does not exist")
    ),
    tag = "reports"
)]
pub async fn create_saving_report(
    State(state): State<ReportState>,
    AppJson(dto): AppJson<CreateSavingReportDto>,
) -> Result<Json<ApiResponse<SavingReportResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = state.savings.create(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(report.into()),
        Some("Laporan simpanan berhasil ditambahkan".to_string()),
        None,
    )))
}

/// Update a saving report
#[utoipa::path(
    put,
    path = "/api/reports/savings/{id}",
    params(
        ("id" = i64, Path, description = "Saving report id")
    ),
    request_body = UpdateSavingReportDto,
    responses(
        (status = 200, description = "Saving report updated", body = ApiResponse<SavingReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Saving report not found"),
        (status = 422, description = "Cooperative does not exist")
    ),
    tag = "reports"
)]
pub async fn update_saving_report(
    State(state): State<ReportState>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateSavingReportDto>,
) -> Result<Json<ApiResponse<SavingReportResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = state.savings.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(report.into()),
        Some(format!("Laporan dengan ID {} berhasil diperbarui", id)),
        None,
    )))
}

/// Delete a saving report
#[utoipa::path(
    delete,
    path = "/api/reports/savings/{id}",
    params(
        ("id" = i64, Path, description = "Saving report id")
    ),
    responses(
        (status = 200, description = "Saving report deleted"),
        (status = 404, description = "Saving report not found")
    ),
    tag = "reports"
)]
pub async fn delete_saving_report(
    State(state): State<ReportState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    state.savings.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some(format!("Laporan dengan ID {} berhasil dihapus", id)),
        None,
    )))
}

// ==================== Loan Report Handlers ====================

/// List loan reports with pagination, search, and date range
#[utoipa::path(
    get,
    path = "/api/reports/loans",
    params(ReportListQuery),
    responses(
        (status = 200, description = "Paginated list of loan reports", body = ApiResponse<Vec<LoanReportResponseDto>>)
    ),
    tag = "reports"
)]
pub async fn list_loan_reports(
    State(state): State<ReportState>,
    Query(query): Query<ReportListQuery>,
) -> Result<Json<ApiResponse<Vec<LoanReportResponseDto>>>> {
    let page = state.loans.list(&query).await?;
    let meta = Meta::of(&page);
    let dtos: Vec<LoanReportResponseDto> = page.items.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, Some(meta))))
}

/// Get a loan report by id
#[utoipa::path(
    get,
    path = "/api/reports/loans/{id}",
    params(
        ("id" = i64, Path, description = "Loan report id")
    ),
    responses(
        (status = 200, description = "Loan report details", body = ApiResponse<LoanReportResponseDto>),
        (status = 404, description = "Loan report not found")
    ),
    tag = "reports"
)]
pub async fn get_loan_report(
    State(state): State<ReportState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<LoanReportResponseDto>>> {
    let report = state.loans.get(id).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Create a loan report
#[utoipa::path(
    post,
    path = "/api/reports/loans",
    request_body = CreateLoanReportDto,
    responses(
        (status = 200, description = "Loan report created", body = ApiResponse<LoanReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 422, description = "Cooperative does not exist")
    ),
    tag = "reports"
)]
pub async fn create_loan_report(
    State(state): State<ReportState>,
    AppJson(dto): AppJson<CreateLoanReportDto>,
) -> Result<Json<ApiResponse<LoanReportResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = state.loans.create(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(report.into()),
        Some("Laporan pinjaman berhasil ditambahkan".to_string()),
        None,
    )))
}

/// Update a loan report
#[utoipa::path(
    put,
    path = "/api/reports/loans/{id}",
    params(
        ("id" = i64, Path, description = "Loan report id")
    ),
    request_body = UpdateLoanReportDto,
    responses(
        (status = 200, description = "Loan report updated", body = ApiResponse<LoanReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Loan report not found"),
        (status = 422, description = "Cooperative does not exist")
    ),
    tag = "reports"
)]
pub async fn update_loan_report(
    State(state): State<ReportState>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateLoanReportDto>,
) -> Result<Json<ApiResponse<LoanReportResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = state.loans.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(report.into()),
        Some(format!("Laporan dengan ID {} berhasil diperbarui", id)),
        None,
    )))
}

/// Delete a loan report
#[utoipa::path(
    delete,
    path = "/api/reports/loans/{id}",
    params(
        ("id" = i64, Path, description = "Loan report id")
    ),
    responses(
        (status = 200, description = "Loan report deleted"),
        (status = 404, description = "Loan report not found")
    ),
    tag = "reports"
)]
pub async fn delete_loan_report(
    State(state): State<ReportState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    state.loans.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some(format!("Laporan dengan ID {} berhasil dihapus", id)),
        None,
    )))
}
