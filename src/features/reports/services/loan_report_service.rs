use std::sync::Arc;

use crate::core::database::Registry;
use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{
    CreateLoanReportDto, ReportListQuery, UpdateLoanReportDto,
};
use crate::features::reports::models::LoanReport;
use crate::features::reports::services::saving_report_service::ensure_positive_amount;
use crate::shared::query::{Paged, Query};

/// Service for the loan-report ledger
pub struct LoanReportService {
    registry: Arc<Registry>,
}

impl LoanReportService {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// List loan reports; date range is inclusive on both ends, newest date
    /// first
    pub async fn list(&self, query: &ReportListQuery) -> Result<Paged<LoanReport>> {
        self.registry.simulate_latency().await;
        let rows = self.registry.loan_reports.snapshot().await;
        Ok(Query::new(rows)
            .scope(query.cooperative_id, |report, cooperative_id| {
                report.cooperative_id == *cooperative_id
            })
            .scope(query.start_date, |report, start| report.date >= *start)
            .scope(query.end_date, |report, end| report.date <= *end)
            .search(&query.search, |report, needle| {
                report.status.as_str().to_lowercase().contains(needle)
                    || report.full_name.to_lowercase().contains(needle)
            })
            .sort_desc_by(|report| report.date)
            .paginate(query.page, query.limit))
    }

    pub async fn get(&self, id: i64) -> Result<LoanReport> {
        self.registry.simulate_latency().await;
        self.registry.loan_reports.find(id).await.ok_or_else(|| {
            AppError::NotFound(format!("Laporan dengan ID {} tidak ditemukan", id))
        })
    }

    pub async fn create(&self, dto: CreateLoanReportDto) -> Result<LoanReport> {
        self.registry.simulate_latency().await;
        ensure_positive_amount(dto.amount)?;
        self.ensure_cooperative_exists(dto.cooperative_id).await?;

        let report = self
            .registry
            .loan_reports
            .insert(|id| LoanReport {
                id,
                cooperative_id: dto.cooperative_id,
                user_id: dto.user_id,
                full_name: dto.full_name,
                amount: dto.amount,
                date: dto.date,
                status: dto.status,
            })
            .await;
        tracing::info!(
            "Loan report created: id={}, cooperative_id={}, amount={}",
            report.id,
            report.cooperative_id,
            report.amount
        );
        Ok(report)
    }

    pub async fn update(&self, id: i64, dto: UpdateLoanReportDto) -> Result<LoanReport> {
        self.registry.simulate_latency().await;
        if let Some(amount) = dto.amount {
            ensure_positive_amount(amount)?;
        }
        if let Some(cooperative_id) = dto.cooperative_id {
            self.ensure_cooperative_exists(cooperative_id).await?;
        }
        self.registry
            .loan_reports
            .update(id, |report| {
                if let Some(cooperative_id) = dto.cooperative_id {
                    report.cooperative_id = cooperative_id;
                }
                if let Some(user_id) = dto.user_id {
                    report.user_id = user_id;
                }
                if let Some(full_name) = dto.full_name {
                    report.full_name = full_name;
                }
                if let Some(amount) = dto.amount {
                    report.amount = amount;
                }
                if let Some(date) = dto.date {
                    report.date = date;
                }
                if let Some(status) = dto.status {
                    report.status = status;
                }
            })
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!("Laporan dengan ID {} tidak ditemukan", id))
            })
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.registry.simulate_latency().await;
        if !self.registry.loan_reports.remove(id).await {
            return Err(AppError::NotFound(format!(
                "Laporan dengan ID {} tidak ditemukan",
                id
            )));
        }
        tracing::info!("Loan report deleted: id={}", id);
        Ok(())
    }

    async fn ensure_cooperative_exists(&self, cooperative_id: i64) -> Result<()> {
        if !self.registry.cooperatives.contains(cooperative_id).await {
            return Err(AppError::ReferentialIntegrity(format!(
                "Koperasi dengan ID {} tidak ditemukan",
                cooperative_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::LoanStatus;
    use crate::shared::test_helpers::seeded_registry;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn list_query() -> ReportListQuery {
        ReportListQuery {
            page: 1,
            limit: 10,
            search: String::new(),
            cooperative_id: None,
            start_date: None,
            end_date: None,
        }
    }

    fn day(raw: &str) -> NaiveDate {
        raw.parse().expect("valid date")
    }

    #[tokio::test]
    async fn search_matches_the_status_label() {
        let service = LoanReportService::new(seeded_registry());
        let page = service
            .list(&ReportListQuery {
                search: "disetujui".to_string(),
                ..list_query()
            })
            .await
            .expect("list");
        assert_eq!(page.total, 2);
        assert!(page
            .items
            .iter()
            .all(|r| r.status == LoanStatus::Approved));
    }

    #[tokio::test]
    async fn equal_dates_keep_insertion_order_when_sorted() {
        let registry = seeded_registry();
        let service = LoanReportService::new(registry.clone());
        // Two extra rows sharing the latest date; they must come back in
        // insertion order.
        for name in ["Pertama", "Kedua"] {
            service
                .create(CreateLoanReportDto {
                    cooperative_id: 1,
                    user_id: 110,
                    full_name: name.to_string(),
                    amount: Decimal::from(100_000),
                    date: day("2025-01-18"),
                    status: LoanStatus::Pending,
                })
                .await
                .expect("create");
        }
        let page = service.list(&list_query()).await.expect("list");
        let top: Vec<&str> = page
            .items
            .iter()
            .take(3)
            .map(|r| r.full_name.as_str())
            .collect();
        assert_eq!(top, vec!["Dewi Lestari", "Pertama", "Kedua"]);
    }

    #[tokio::test]
    async fn update_can_resolve_a_pending_loan() {
        let service = LoanReportService::new(seeded_registry());
        let updated = service
            .update(
                2,
                UpdateLoanReportDto {
                    cooperative_id: None,
                    user_id: None,
                    full_name: None,
                    amount: None,
                    date: None,
                    status: Some(LoanStatus::Approved),
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.status, LoanStatus::Approved);
    }

    #[tokio::test]
    async fn moving_a_report_to_an_unknown_cooperative_fails() {
        let service = LoanReportService::new(seeded_registry());
        let err = service
            .update(
                1,
                UpdateLoanReportDto {
                    cooperative_id: Some(404),
                    user_id: None,
                    full_name: None,
                    amount: None,
                    date: None,
                    status: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ReferentialIntegrity(_)));
    }
}
