use std::sync::Arc;

use rust_decimal::Decimal;

use crate::core::database::Registry;
use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{
    CreateSavingReportDto, ReportListQuery, UpdateSavingReportDto,
};
use crate::features::reports::models::SavingReport;
use crate::shared::query::{Paged, Query};

/// Service for the saving-report ledger
pub struct SavingReportService {
    registry: Arc<Registry>,
}

impl SavingReportService {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// List saving reports; date range is inclusive on both ends, newest
    /// date first
    pub async fn list(&self, query: &ReportListQuery) -> Result<Paged<SavingReport>> {
        self.registry.simulate_latency().await;
        let rows = self.registry.saving_reports.snapshot().await;
        Ok(Query::new(rows)
            .scope(query.cooperative_id, |report, cooperative_id| {
                report.cooperative_id == *cooperative_id
            })
            .scope(query.start_date, |report, start| report.date >= *start)
            .scope(query.end_date, |report, end| report.date <= *end)
            .search(&query.search, |report, needle| {
                report.r#type.as_str().to_lowercase().contains(needle)
                    || report.full_name.to_lowercase().contains(needle)
            })
            .sort_desc_by(|report| report.date)
            .paginate(query.page, query.limit))
    }

    pub async fn get(&self, id: i64) -> Result<SavingReport> {
        self.registry.simulate_latency().await;
        self.registry.saving_reports.find(id).await.ok_or_else(|| {
            AppError::NotFound(format!("Laporan dengan ID {} tidak ditemukan", id))
        })
    }

    pub async fn create(&self, dto: CreateSavingReportDto) -> Result<SavingReport> {
        self.registry.simulate_latency().await;
        ensure_positive_amount(dto.amount)?;
        self.ensure_cooperative_exists(dto.cooperative_id).await?;

        let report = self
            .registry
            .saving_reports
            .insert(|id| SavingReport {
                id,
                cooperative_id: dto.cooperative_id,
                user_id: dto.user_id,
                full_name: dto.full_name,
                amount: dto.amount,
                date: dto.date,
                r#type: dto.r#type,
            })
            .await;
        tracing::info!(
            "Saving report created: id={}, cooperative_id={}, amount={}",
            report.id,
            report.cooperative_id,
            report.amount
        );
        Ok(report)
    }

    pub async fn update(&self, id: i64, dto: UpdateSavingReportDto) -> Result<SavingReport> {
        self.registry.simulate_latency().await;
        if let Some(amount) = dto.amount {
            ensure_positive_amount(amount)?;
        }
        if let Some(cooperative_id) = dto.cooperative_id {
            self.ensure_cooperative_exists(cooperative_id).await?;
        }
        self.registry
            .saving_reports
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
                if let Some(r#type) = dto.r#type {
                    report.r#type = r#type;
                }
            })
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!("Laporan dengan ID {} tidak ditemukan", id))
            })
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.registry.simulate_latency().await;
        if !self.registry.saving_reports.remove(id).await {
            return Err(AppError::NotFound(format!(
                "Laporan dengan ID {} tidak ditemukan",
                id
            )));
        }
        tracing::info!("Saving report deleted: id={}", id);
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

pub(crate) fn ensure_positive_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(AppError::Validation(
            "Jumlah harus lebih besar dari nol".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::SavingType;
    use crate::shared::test_helpers::seeded_registry;
    use chrono::NaiveDate;

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
    async fn listing_is_sorted_by_date_descending() {
        let service = SavingReportService::new(seeded_registry());
        let page = service.list(&list_query()).await.expect("list");
        let dates: Vec<NaiveDate> = page.items.iter().map(|r| r.date).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
        assert_eq!(page.items[0].date, day("2025-01-15"));
    }

    #[tokio::test]
    async fn date_range_is_inclusive_on_both_ends() {
        let service = SavingReportService::new(seeded_registry());
        let page = service
            .list(&ReportListQuery {
                start_date: Some(day("2025-01-05")),
                end_date: Some(day("2025-01-10")),
                ..list_query()
            })
            .await
            .expect("list");
        assert_eq!(page.total, 2);
        assert!(page
            .items
            .iter()
            .all(|r| r.date >= day("2025-01-05") && r.date <= day("2025-01-10")));
    }

    #[tokio::test]
    async fn search_covers_type_label_and_member_name() {
        let service = SavingReportService::new(seeded_registry());
        let by_type = service
            .list(&ReportListQuery {
                search: "wajib".to_string(),
                ..list_query()
            })
            .await
            .expect("list");
        assert_eq!(by_type.total, 2);

        let by_name = service
            .list(&ReportListQuery {
                search: "BUDI".to_string(),
                ..list_query()
            })
            .await
            .expect("list");
        assert_eq!(by_name.total, 1);
        assert_eq!(by_name.items[0].full_name, "Budi Santoso");
    }

    #[tokio::test]
    async fn cooperative_scope_and_dates_are_conjunctive() {
        let service = SavingReportService::new(seeded_registry());
        let page = service
            .list(&ReportListQuery {
                cooperative_id: Some(1),
                start_date: Some(day("2025-01-02")),
                ..list_query()
            })
            .await
            .expect("list");
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].full_name, "Siti Aminah");
    }

    #[tokio::test]
    async fn create_rejects_a_non_positive_amount() {
        let registry = seeded_registry();
        let service = SavingReportService::new(registry.clone());
        let before = registry.saving_reports.len().await;
        let err = service
            .create(CreateSavingReportDto {
                cooperative_id: 1,
                user_id: 105,
                full_name: "Rina".to_string(),
                amount: Decimal::ZERO,
                date: day("2025-02-01"),
                r#type: SavingType::Pokok,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(registry.saving_reports.len().await, before);
    }

    #[tokio::test]
    async fn create_rejects_an_unknown_cooperative() {
        let service = SavingReportService::new(seeded_registry());
        let err = service
            .create(CreateSavingReportDto {
                cooperative_id: 99,
                user_id: 105,
                full_name: "Rina".to_string(),
                amount: Decimal::from(1000),
                date: day("2025-02-01"),
                r#type: SavingType::Pokok,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ReferentialIntegrity(_)));
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let registry = seeded_registry();
        let service = SavingReportService::new(registry.clone());
        service.delete(1).await.expect("delete");
        let err = service.delete(1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(registry.saving_reports.len().await, 3);
    }
}
