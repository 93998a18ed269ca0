use std::sync::Arc;

use crate::core::database::Registry;
use crate::core::error::{AppError, Result};
use crate::features::applications::dtos::{
    ApplicationDecision, ApplicationListQuery, CreateApplicationDto, UpdateApplicationDto,
};
use crate::features::applications::models::{ApplicationRequest, ApplicationStatus};
use crate::features::reports::services::saving_report_service::ensure_positive_amount;
use crate::shared::query::{Paged, Query};

/// Service for save/borrow application requests
pub struct ApplicationService {
    registry: Arc<Registry>,
}

impl ApplicationService {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// List application requests; scopes are conjunctive, newest date first
    pub async fn list(&self, query: &ApplicationListQuery) -> Result<Paged<ApplicationRequest>> {
        self.registry.simulate_latency().await;
        let rows = self.registry.application_requests.snapshot().await;
        Ok(Query::new(rows)
            .scope(query.user_id, |request, user_id| {
                request.user_id == *user_id
            })
            .scope(query.cooperative_id, |request, cooperative_id| {
                request.cooperative_id == *cooperative_id
            })
            .scope(query.r#type, |request, r#type| request.r#type == *r#type)
            .scope(query.start_date, |request, start| request.date >= *start)
            .scope(query.end_date, |request, end| request.date <= *end)
            .search(&query.search, |request, needle| {
                request.r#type.as_str().to_lowercase().contains(needle)
                    || request.status.as_str().to_lowercase().contains(needle)
                    || request
                        .full_name
                        .as_ref()
                        .is_some_and(|name| name.to_lowercase().contains(needle))
            })
            .sort_desc_by(|request| request.date)
            .paginate(query.page, query.limit))
    }

    pub async fn get(&self, id: i64) -> Result<ApplicationRequest> {
        self.registry.simulate_latency().await;
        self.registry
            .application_requests
            .find(id)
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!("Pengajuan dengan ID {} tidak ditemukan", id))
            })
    }

    /// Create a request; every new request starts as submitted.
    pub async fn create(&self, dto: CreateApplicationDto) -> Result<ApplicationRequest> {
        self.registry.simulate_latency().await;
        ensure_positive_amount(dto.amount)?;
        self.ensure_cooperative_exists(dto.cooperative_id).await?;

        let request = self
            .registry
            .application_requests
            .insert(|id| ApplicationRequest {
                id,
                user_id: dto.user_id,
                full_name: dto.full_name,
                cooperative_id: dto.cooperative_id,
                amount: dto.amount,
                date: dto.date,
                r#type: dto.r#type,
                status: ApplicationStatus::Submitted,
            })
            .await;
        tracing::info!(
            "Application request created: id={}, user_id={}, type={}",
            request.id,
            request.user_id,
            request.r#type.as_str()
        );
        Ok(request)
    }

    pub async fn update(&self, id: i64, dto: UpdateApplicationDto) -> Result<ApplicationRequest> {
        self.registry.simulate_latency().await;
        if let Some(amount) = dto.amount {
            ensure_positive_amount(amount)?;
        }
        if let Some(cooperative_id) = dto.cooperative_id {
            self.ensure_cooperative_exists(cooperative_id).await?;
        }
        self.registry
            .application_requests
            .update(id, |request| {
                if let Some(user_id) = dto.user_id {
                    request.user_id = user_id;
                }
                if let Some(full_name) = dto.full_name {
                    request.full_name = Some(full_name);
                }
                if let Some(cooperative_id) = dto.cooperative_id {
                    request.cooperative_id = cooperative_id;
                }
                if let Some(amount) = dto.amount {
                    request.amount = amount;
                }
                if let Some(date) = dto.date {
                    request.date = date;
                }
                if let Some(r#type) = dto.r#type {
                    request.r#type = r#type;
                }
            })
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!("Pengajuan dengan ID {} tidak ditemukan", id))
            })
    }

    /// Resolve a submitted request. A request that has already been decided
    /// cannot move again.
    pub async fn update_status(
        &self,
        id: i64,
        decision: ApplicationDecision,
    ) -> Result<ApplicationRequest> {
        self.registry.simulate_latency().await;
        let current = self
            .registry
            .application_requests
            .find(id)
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!("Pengajuan dengan ID {} tidak ditemukan", id))
            })?;

        if current.status.is_resolved() {
            return Err(AppError::Conflict(format!(
                "Pengajuan dengan ID {} sudah {}",
                id,
                current.status.as_str()
            )));
        }

        let updated = self
            .registry
            .application_requests
            .update(id, |request| {
                request.status = decision.into();
            })
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!("Pengajuan dengan ID {} tidak ditemukan", id))
            })?;
        tracing::info!(
            "Application request resolved: id={}, status={}",
            id,
            updated.status.as_str()
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.registry.simulate_latency().await;
        if !self.registry.application_requests.remove(id).await {
            return Err(AppError::NotFound(format!(
                "Pengajuan dengan ID {} tidak ditemukan",
                id
            )));
        }
        tracing::info!("Application request deleted: id={}", id);
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
    use crate::features::applications::models::ApplicationType;
    use crate::shared::test_helpers::seeded_registry;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn list_query() -> ApplicationListQuery {
        ApplicationListQuery {
            page: 1,
            limit: 10,
            search: String::new(),
            user_id: None,
            cooperative_id: None,
            r#type: None,
            start_date: None,
            end_date: None,
        }
    }

    fn create_dto() -> CreateApplicationDto {
        CreateApplicationDto {
            user_id: 103,
            full_name: Some("Ahmad Fauzi".to_string()),
            cooperative_id: 2,
            amount: Decimal::from(500_000),
            date: NaiveDate::from_ymd_opt(2025, 2, 1).expect("valid date"),
            r#type: ApplicationType::Save,
        }
    }

    #[tokio::test]
    async fn new_requests_start_as_submitted() {
        let service = ApplicationService::new(seeded_registry());
        let request = service.create(create_dto()).await.expect("create");
        assert_eq!(request.status, ApplicationStatus::Submitted);
        assert_eq!(request.id, 3);
    }

    #[tokio::test]
    async fn a_submitted_request_can_be_approved_once() {
        let service = ApplicationService::new(seeded_registry());
        let resolved = service
            .update_status(1, ApplicationDecision::Approved)
            .await
            .expect("resolve");
        assert_eq!(resolved.status, ApplicationStatus::Approved);

        let err = service
            .update_status(1, ApplicationDecision::Rejected)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn an_already_resolved_request_cannot_move_again() {
        let service = ApplicationService::new(seeded_registry());
        // Seed request 2 is already approved.
        let err = service
            .update_status(2, ApplicationDecision::Rejected)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        let request = service.get(2).await.expect("get");
        assert_eq!(request.status, ApplicationStatus::Approved);
    }

    #[tokio::test]
    async fn type_scope_narrows_the_listing() {
        let service = ApplicationService::new(seeded_registry());
        let page = service
            .list(&ApplicationListQuery {
                r#type: Some(ApplicationType::Borrow),
                ..list_query()
            })
            .await
            .expect("list");
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].r#type, ApplicationType::Borrow);
    }

    #[tokio::test]
    async fn user_and_cooperative_scopes_are_conjunctive() {
        let service = ApplicationService::new(seeded_registry());
        let page = service
            .list(&ApplicationListQuery {
                user_id: Some(101),
                cooperative_id: Some(2),
                ..list_query()
            })
            .await
            .expect("list");
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn search_matches_the_status_label() {
        let service = ApplicationService::new(seeded_registry());
        let page = service
            .list(&ApplicationListQuery {
                search: "diajukan".to_string(),
                ..list_query()
            })
            .await
            .expect("list");
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, 1);
    }

    #[tokio::test]
    async fn create_rejects_an_unknown_cooperative() {
        let registry = seeded_registry();
        let service = ApplicationService::new(registry.clone());
        let before = registry.application_requests.len().await;
        let err = service
            .create(CreateApplicationDto {
                cooperative_id: 99,
                ..create_dto()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ReferentialIntegrity(_)));
        assert_eq!(registry.application_requests.len().await, before);
    }
}
