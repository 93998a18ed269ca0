use std::sync::Arc;

use crate::core::config::DeletePolicy;
use crate::core::database::Registry;
use crate::core::error::{AppError, Result};
use crate::features::cooperatives::dtos::{
    CooperativeListQuery, CreateCooperativeDto, UpdateCooperativeDto,
};
use crate::features::cooperatives::models::Cooperative;
use crate::shared::query::{Paged, Query};

/// Service for cooperative (koperasi) records
pub struct CooperativeService {
    registry: Arc<Registry>,
}

impl CooperativeService {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// List cooperatives; region scopes are conjunctive, search matches the
    /// cooperative name only, newest id first
    pub async fn list(&self, query: &CooperativeListQuery) -> Result<Paged<Cooperative>> {
        self.registry.simulate_latency().await;
        let rows = self.registry.cooperatives.snapshot().await;
        Ok(Query::new(rows)
            .scope(query.province_id, |coop, province_id| {
                coop.province_id == *province_id
            })
            .scope(query.city_id, |coop, city_id| coop.city_id == *city_id)
            .scope(query.subdistrict_id, |coop, subdistrict_id| {
                coop.subdistrict_id == *subdistrict_id
            })
            .search(&query.search, |coop, needle| {
                coop.name.to_lowercase().contains(needle)
            })
            .sort_desc_by(|coop| coop.id)
            .paginate(query.page, query.limit))
    }

    pub async fn get(&self, id: i64) -> Result<Cooperative> {
        self.registry.simulate_latency().await;
        self.registry.cooperatives.find(id).await.ok_or_else(|| {
            AppError::NotFound(format!("Koperasi dengan ID {} tidak ditemukan", id))
        })
    }

    pub async fn create(&self, dto: CreateCooperativeDto) -> Result<Cooperative> {
        self.registry.simulate_latency().await;
        self.validate_chain(dto.province_id, dto.city_id, dto.subdistrict_id)
            .await?;

        let coop = self
            .registry
            .cooperatives
            .insert(|id| Cooperative {
                id,
                name: dto.name,
                province_id: dto.province_id,
                city_id: dto.city_id,
                subdistrict_id: dto.subdistrict_id,
            })
            .await;
        tracing::info!("Cooperative created: id={}, name={}", coop.id, coop.name);
        Ok(coop)
    }

    pub async fn update(&self, id: i64, dto: UpdateCooperativeDto) -> Result<Cooperative> {
        self.registry.simulate_latency().await;
        let current = self.registry.cooperatives.find(id).await.ok_or_else(|| {
            AppError::NotFound(format!("Koperasi dengan ID {} tidak ditemukan", id))
        })?;

        // Re-validate the chain with the merged region ids whenever any of
        // them changes.
        if dto.province_id.is_some() || dto.city_id.is_some() || dto.subdistrict_id.is_some() {
            self.validate_chain(
                dto.province_id.unwrap_or(current.province_id),
                dto.city_id.unwrap_or(current.city_id),
                dto.subdistrict_id.unwrap_or(current.subdistrict_id),
            )
            .await?;
        }

        self.registry
            .cooperatives
            .update(id, |coop| {
                if let Some(name) = dto.name {
                    coop.name = name;
                }
                if let Some(province_id) = dto.province_id {
                    coop.province_id = province_id;
                }
                if let Some(city_id) = dto.city_id {
                    coop.city_id = city_id;
                }
                if let Some(subdistrict_id) = dto.subdistrict_id {
                    coop.subdistrict_id = subdistrict_id;
                }
            })
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!("Koperasi dengan ID {} tidak ditemukan", id))
            })
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.registry.simulate_latency().await;
        if !self.registry.cooperatives.contains(id).await {
            return Err(AppError::NotFound(format!(
                "Koperasi dengan ID {} tidak ditemukan",
                id
            )));
        }

        match self.registry.delete_policy() {
            DeletePolicy::Restrict => {
                let has_ledgers = self
                    .registry
                    .saving_reports
                    .any(|r| r.cooperative_id == id)
                    .await
                    || self
                        .registry
                        .loan_reports
                        .any(|r| r.cooperative_id == id)
                        .await
                    || self
                        .registry
                        .application_requests
                        .any(|r| r.cooperative_id == id)
                        .await;
                if has_ledgers {
                    return Err(AppError::Conflict(format!(
                        "Koperasi dengan ID {} masih memiliki transaksi terkait",
                        id
                    )));
                }
                self.registry.cooperatives.remove(id).await;
            }
            DeletePolicy::Cascade => {
                self.registry
                    .remove_cooperatives_where(|coop| coop.id == id)
                    .await;
            }
        }

        tracing::info!("Cooperative deleted: id={}", id);
        Ok(())
    }

    /// The three region ids must form a real chain: the subdistrict belongs
    /// to the city, and the city belongs to the province.
    async fn validate_chain(
        &self,
        province_id: i64,
        city_id: i64,
        subdistrict_id: i64,
    ) -> Result<()> {
        if !self.registry.provinces.contains(province_id).await {
            return Err(AppError::ReferentialIntegrity(format!(
                "Provinsi dengan ID {} tidak ditemukan",
                province_id
            )));
        }

        let city = self.registry.cities.find(city_id).await.ok_or_else(|| {
            AppError::ReferentialIntegrity(format!("Kota dengan ID {} tidak ditemukan", city_id))
        })?;
        if city.province_id != province_id {
            return Err(AppError::ReferentialIntegrity(format!(
                "Kota dengan ID {} bukan bagian dari provinsi dengan ID {}",
                city_id, province_id
            )));
        }

        let subdistrict = self
            .registry
            .subdistricts
            .find(subdistrict_id)
            .await
            .ok_or_else(|| {
                AppError::ReferentialIntegrity(format!(
                    "Kecamatan dengan ID {} tidak ditemukan",
                    subdistrict_id
                ))
            })?;
        if subdistrict.city_id != city_id {
            return Err(AppError::ReferentialIntegrity(format!(
                "Kecamatan dengan ID {} bukan bagian dari kota dengan ID {}",
                subdistrict_id, city_id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{cascading_registry, seeded_registry};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn list_query() -> CooperativeListQuery {
        CooperativeListQuery {
            page: 1,
            limit: 10,
            search: String::new(),
            province_id: None,
            city_id: None,
            subdistrict_id: None,
        }
    }

    #[tokio::test]
    async fn subdistrict_scope_narrows_to_the_single_match() {
        // Seed has one cooperative in 357101 and four elsewhere.
        let service = CooperativeService::new(seeded_registry());
        let query = CooperativeListQuery {
            subdistrict_id: Some(357101),
            ..list_query()
        };
        let page = service.list(&query).await.expect("list");
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Koperasi Maju Bersama");
    }

    #[tokio::test]
    async fn scopes_combine_conjunctively() {
        let service = CooperativeService::new(seeded_registry());
        let by_province = service
            .list(&CooperativeListQuery {
                province_id: Some(35),
                ..list_query()
            })
            .await
            .expect("list");
        let by_both = service
            .list(&CooperativeListQuery {
                province_id: Some(35),
                city_id: Some(3171),
                ..list_query()
            })
            .await
            .expect("list");
        assert_eq!(by_province.total, 1);
        // 3171 belongs to province 31, so the intersection is empty.
        assert_eq!(by_both.total, 0);
    }

    #[tokio::test]
    async fn search_matches_the_name_case_insensitively() {
        let service = CooperativeService::new(seeded_registry());
        let page = service
            .list(&CooperativeListQuery {
                search: "SEJAHTERA".to_string(),
                ..list_query()
            })
            .await
            .expect("list");
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Koperasi Sejahtera");
    }

    #[tokio::test]
    async fn create_rejects_an_inconsistent_chain() {
        let registry = seeded_registry();
        let service = CooperativeService::new(registry.clone());
        let before = registry.cooperatives.len().await;

        // 357101 is a subdistrict of 3571, not of 3171.
        let err = service
            .create(CreateCooperativeDto {
                name: "Koperasi Salah Rantai".to_string(),
                province_id: 31,
                city_id: 3171,
                subdistrict_id: 357101,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ReferentialIntegrity(_)));
        assert_eq!(registry.cooperatives.len().await, before);
    }

    #[tokio::test]
    async fn create_rejects_a_city_outside_the_province() {
        let service = CooperativeService::new(seeded_registry());
        // City 3571 belongs to province 35, not 31.
        let err = service
            .create(CreateCooperativeDto {
                name: "Koperasi Salah Provinsi".to_string(),
                province_id: 31,
                city_id: 3571,
                subdistrict_id: 357101,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ReferentialIntegrity(_)));
    }

    #[tokio::test]
    async fn create_with_a_valid_chain_assigns_the_next_id() {
        let service = CooperativeService::new(seeded_registry());
        let coop = service
            .create(CreateCooperativeDto {
                name: "Koperasi Baru".to_string(),
                province_id: 35,
                city_id: 3571,
                subdistrict_id: 357102,
            })
            .await
            .expect("create");
        assert_eq!(coop.id, 6);
    }

    #[tokio::test]
    async fn update_revalidates_the_merged_chain() {
        let service = CooperativeService::new(seeded_registry());
        // Moving cooperative 1 (35/3571/357101) to city 3171 alone breaks
        // both links of the chain.
        let err = service
            .update(
                1,
                UpdateCooperativeDto {
                    name: None,
                    province_id: None,
                    city_id: Some(3171),
                    subdistrict_id: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ReferentialIntegrity(_)));
    }

    #[tokio::test]
    async fn delete_restricts_while_ledgers_reference_it() {
        let registry = seeded_registry();
        let service = CooperativeService::new(registry.clone());
        // Cooperative 1 has saving and loan rows in the seed.
        let err = service.delete(1).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(registry.cooperatives.contains(1).await);
    }

    #[tokio::test]
    async fn cascade_delete_takes_the_ledgers_with_it() {
        let registry = cascading_registry();
        let service = CooperativeService::new(registry.clone());

        let coop = registry
            .cooperatives
            .insert(|id| Cooperative {
                id,
                name: "Koperasi Uji".to_string(),
                province_id: 1,
                city_id: 1,
                subdistrict_id: 1,
            })
            .await;
        registry
            .saving_reports
            .insert(|id| crate::features::reports::models::SavingReport {
                id,
                cooperative_id: coop.id,
                user_id: 1,
                full_name: "Budi".to_string(),
                amount: Decimal::from(1000),
                date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
                r#type: crate::features::reports::models::SavingType::Pokok,
            })
            .await;

        service.delete(coop.id).await.expect("delete");
        assert_eq!(registry.cooperatives.len().await, 0);
        assert_eq!(registry.saving_reports.len().await, 0);
    }

    #[tokio::test]
    async fn delete_missing_cooperative_is_not_found() {
        let service = CooperativeService::new(seeded_registry());
        let err = service.delete(99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
