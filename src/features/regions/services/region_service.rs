use std::sync::Arc;

use crate::core::config::DeletePolicy;
use crate::core::database::Registry;
use crate::core::error::{AppError, Result};
use crate::features::regions::dtos::{
    CityListQuery, CreateCityDto, CreateProvinceDto, CreateSubdistrictDto, ProvinceListQuery,
    SubdistrictListQuery, UpdateCityDto, UpdateProvinceDto, UpdateSubdistrictDto,
};
use crate::features::regions::models::{City, Province, Subdistrict};
use crate::shared::query::{Paged, Query};

/// Service for managing the Indonesian administrative region hierarchy
pub struct RegionService {
    registry: Arc<Registry>,
}

impl RegionService {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    // ==================== Province Methods ====================

    /// List provinces with optional search, newest id first
    pub async fn list_provinces(&self, query: &ProvinceListQuery) -> Result<Paged<Province>> {
        self.registry.simulate_latency().await;
        let rows = self.registry.provinces.snapshot().await;
        Ok(Query::new(rows)
            .search(&query.search, |p, needle| {
                p.name.to_lowercase().contains(needle)
            })
            .sort_desc_by(|p| p.id)
            .paginate(query.page, query.limit))
    }

    pub async fn get_province(&self, id: i64) -> Result<Province> {
        self.registry.simulate_latency().await;
        self.registry.provinces.find(id).await.ok_or_else(|| {
            AppError::NotFound(format!("Provinsi dengan ID {} tidak ditemukan", id))
        })
    }

    pub async fn create_province(&self, dto: CreateProvinceDto) -> Result<Province> {
        self.registry.simulate_latency().await;
        let province = self
            .registry
            .provinces
            .insert(|id| Province { id, name: dto.name })
            .await;
        tracing::info!("Province created: id={}, name={}", province.id, province.name);
        Ok(province)
    }

    pub async fn update_province(&self, id: i64, dto: UpdateProvinceDto) -> Result<Province> {
        self.registry.simulate_latency().await;
        self.registry
            .provinces
            .update(id, |province| {
                if let Some(name) = dto.name {
                    province.name = name;
                }
            })
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!("Provinsi dengan ID {} tidak ditemukan", id))
            })
    }

    pub async fn delete_province(&self, id: i64) -> Result<()> {
        self.registry.simulate_latency().await;
        if !self.registry.provinces.contains(id).await {
            return Err(AppError::NotFound(format!(
                "Provinsi dengan ID {} tidak ditemukan",
                id
            )));
        }

        match self.registry.delete_policy() {
            DeletePolicy::Restrict => {
                let has_children = self
                    .registry
                    .cities
                    .any(|city| city.province_id == id)
                    .await
                    || self
                        .registry
                        .cooperatives
                        .any(|coop| coop.province_id == id)
                        .await;
                if has_children {
                    return Err(AppError::Conflict(format!(
                        "Provinsi dengan ID {} masih memiliki kota atau koperasi terkait",
                        id
                    )));
                }
            }
            DeletePolicy::Cascade => {
                let city_ids: Vec<i64> = self
                    .registry
                    .cities
                    .snapshot()
                    .await
                    .into_iter()
                    .filter(|city| city.province_id == id)
                    .map(|city| city.id)
                    .collect();
                self.registry
                    .subdistricts
                    .remove_where(|s| city_ids.contains(&s.city_id))
                    .await;
                self.registry
                    .remove_cooperatives_where(|coop| coop.province_id == id)
                    .await;
                self.registry
                    .cities
                    .remove_where(|city| city.province_id == id)
                    .await;
            }
        }

        self.registry.provinces.remove(id).await;
        tracing::info!("Province deleted: id={}", id);
        Ok(())
    }

    // ==================== City Methods ====================

    /// List cities, optionally scoped to one province, newest id first
    pub async fn list_cities(&self, query: &CityListQuery) -> Result<Paged<City>> {
        self.registry.simulate_latency().await;
        let rows = self.registry.cities.snapshot().await;
        Ok(Query::new(rows)
            .scope(query.province_id, |city, province_id| {
                city.province_id == *province_id
            })
            .search(&query.search, |city, needle| {
                city.name.to_lowercase().contains(needle)
            })
            .sort_desc_by(|city| city.id)
            .paginate(query.page, query.limit))
    }

    pub async fn get_city(&self, id: i64) -> Result<City> {
        self.registry.simulate_latency().await;
        self.registry
            .cities
            .find(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Kota dengan ID {} tidak ditemukan", id)))
    }

    pub async fn create_city(&self, dto: CreateCityDto) -> Result<City> {
        self.registry.simulate_latency().await;
        self.ensure_province_exists(dto.province_id).await?;
        let city = self
            .registry
            .cities
            .insert(|id| City {
                id,
                name: dto.name,
                province_id: dto.province_id,
            })
            .await;
        tracing::info!(
            "City created: id={}, name={}, province_id={}",
            city.id,
            city.name,
            city.province_id
        );
        Ok(city)
    }

    pub async fn update_city(&self, id: i64, dto: UpdateCityDto) -> Result<City> {
        self.registry.simulate_latency().await;
        if let Some(province_id) = dto.province_id {
            self.ensure_province_exists(province_id).await?;
        }
        self.registry
            .cities
            .update(id, |city| {
                if let Some(name) = dto.name {
                    city.name = name;
                }
                if let Some(province_id) = dto.province_id {
                    city.province_id = province_id;
                }
            })
            .await
            .ok_or_else(|| AppError::NotFound(format!("Kota dengan ID {} tidak ditemukan", id)))
    }

    pub async fn delete_city(&self, id: i64) -> Result<()> {
        self.registry.simulate_latency().await;
        if !self.registry.cities.contains(id).await {
            return Err(AppError::NotFound(format!(
                "Kota dengan ID {} tidak ditemukan",
                id
            )));
        }

        match self.registry.delete_policy() {
            DeletePolicy::Restrict => {
                let has_children = self
                    .registry
                    .subdistricts
                    .any(|s| s.city_id == id)
                    .await
                    || self.registry.cooperatives.any(|c| c.city_id == id).await;
                if has_children {
                    return Err(AppError::Conflict(format!(
                        "Kota dengan ID {} masih memiliki kecamatan atau koperasi terkait",
                        id
                    )));
                }
            }
            DeletePolicy::Cascade => {
                self.registry
                    .subdistricts
                    .remove_where(|s| s.city_id == id)
                    .await;
                self.registry
                    .remove_cooperatives_where(|coop| coop.city_id == id)
                    .await;
            }
        }

        self.registry.cities.remove(id).await;
        tracing::info!("City deleted: id={}", id);
        Ok(())
    }

    // ==================== Subdistrict Methods ====================

    /// List subdistricts, optionally scoped to one city, newest id first
    pub async fn list_subdistricts(
        &self,
        query: &SubdistrictListQuery,
    ) -> Result<Paged<Subdistrict>> {
        self.registry.simulate_latency().await;
        let rows = self.registry.subdistricts.snapshot().await;
        Ok(Query::new(rows)
            .scope(query.city_id, |subdistrict, city_id| {
                subdistrict.city_id == *city_id
            })
            .search(&query.search, |subdistrict, needle| {
                subdistrict.name.to_lowercase().contains(needle)
            })
            .sort_desc_by(|subdistrict| subdistrict.id)
            .paginate(query.page, query.limit))
    }

    pub async fn get_subdistrict(&self, id: i64) -> Result<Subdistrict> {
        self.registry.simulate_latency().await;
        self.registry.subdistricts.find(id).await.ok_or_else(|| {
            AppError::NotFound(format!("Kecamatan dengan ID {} tidak ditemukan", id))
        })
    }

    pub async fn create_subdistrict(&self, dto: CreateSubdistrictDto) -> Result<Subdistrict> {
        self.registry.simulate_latency().await;
        self.ensure_city_exists(dto.city_id).await?;
        let subdistrict = self
            .registry
            .subdistricts
            .insert(|id| Subdistrict {
                id,
                name: dto.name,
                city_id: dto.city_id,
            })
            .await;
        tracing::info!(
            "Subdistrict created: id={}, name={}, city_id={}",
            subdistrict.id,
            subdistrict.name,
            subdistrict.city_id
        );
        Ok(subdistrict)
    }

    pub async fn update_subdistrict(
        &self,
        id: i64,
        dto: UpdateSubdistrictDto,
    ) -> Result<Subdistrict> {
        self.registry.simulate_latency().await;
        if let Some(city_id) = dto.city_id {
            self.ensure_city_exists(city_id).await?;
        }
        self.registry
            .subdistricts
            .update(id, |subdistrict| {
                if let Some(name) = dto.name {
                    subdistrict.name = name;
                }
                if let Some(city_id) = dto.city_id {
                    subdistrict.city_id = city_id;
                }
            })
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!("Kecamatan dengan ID {} tidak ditemukan", id))
            })
    }

    pub async fn delete_subdistrict(&self, id: i64) -> Result<()> {
        self.registry.simulate_latency().await;
        if !self.registry.subdistricts.contains(id).await {
            return Err(AppError::NotFound(format!(
                "Kecamatan dengan ID {} tidak ditemukan",
                id
            )));
        }

        match self.registry.delete_policy() {
            DeletePolicy::Restrict => {
                if self
                    .registry
                    .cooperatives
                    .any(|coop| coop.subdistrict_id == id)
                    .await
                {
                    return Err(AppError::Conflict(format!(
                        "Kecamatan dengan ID {} masih memiliki koperasi terkait",
                        id
                    )));
                }
            }
            DeletePolicy::Cascade => {
                self.registry
                    .remove_cooperatives_where(|coop| coop.subdistrict_id == id)
                    .await;
            }
        }

        self.registry.subdistricts.remove(id).await;
        tracing::info!("Subdistrict deleted: id={}", id);
        Ok(())
    }

    // ==================== Parent Checks ====================

    async fn ensure_province_exists(&self, province_id: i64) -> Result<()> {
        if !self.registry.provinces.contains(province_id).await {
            return Err(AppError::ReferentialIntegrity(format!(
                "Provinsi dengan ID {} tidak ditemukan",
                province_id
            )));
        }
        Ok(())
    }

    async fn ensure_city_exists(&self, city_id: i64) -> Result<()> {
        if !self.registry.cities.contains(city_id).await {
            return Err(AppError::ReferentialIntegrity(format!(
                "Kota dengan ID {} tidak ditemukan",
                city_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::cooperatives::models::Cooperative;
    use crate::shared::test_helpers::{cascading_registry, empty_registry};

    fn province_query(page: i64, limit: i64, search: &str) -> ProvinceListQuery {
        ProvinceListQuery {
            page,
            limit,
            search: search.to_string(),
        }
    }

    async fn service_with_two_provinces() -> RegionService {
        let registry = empty_registry();
        let service = RegionService::new(registry);
        for name in ["Aceh", "Bali"] {
            service
                .create_province(CreateProvinceDto {
                    name: name.to_string(),
                })
                .await
                .expect("create province");
        }
        service
    }

    #[tokio::test]
    async fn first_page_of_size_one_returns_the_highest_id() {
        let service = service_with_two_provinces().await;
        let page = service
            .list_provinces(&province_query(1, 1, ""))
            .await
            .expect("list");
        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Bali");
        assert_eq!(page.items[0].id, 2);
    }

    #[tokio::test]
    async fn search_matches_case_insensitively() {
        let service = service_with_two_provinces().await;
        let upper = service
            .list_provinces(&province_query(1, 10, "BALI"))
            .await
            .expect("list");
        let lower = service
            .list_provinces(&province_query(1, 10, "bali"))
            .await
            .expect("list");
        assert_eq!(upper.total, 1);
        assert_eq!(lower.total, 1);
        assert_eq!(upper.items[0].id, lower.items[0].id);
    }

    #[tokio::test]
    async fn get_missing_province_is_not_found() {
        let service = RegionService::new(empty_registry());
        let err = service.get_province(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn deleting_twice_fails_without_shrinking_the_store() {
        let service = service_with_two_provinces().await;
        service.delete_province(1).await.expect("first delete");
        let err = service.delete_province(1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let page = service
            .list_provinces(&province_query(1, 10, ""))
            .await
            .expect("list");
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn create_city_requires_an_existing_province() {
        let registry = empty_registry();
        let service = RegionService::new(registry.clone());
        let err = service
            .create_city(CreateCityDto {
                name: "Kota Fiktif".to_string(),
                province_id: 99,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ReferentialIntegrity(_)));
        assert_eq!(registry.cities.len().await, 0);
    }

    #[tokio::test]
    async fn city_listing_scopes_to_the_parent_province() {
        let service = service_with_two_provinces().await;
        for (name, province_id) in [("Banda Aceh", 1), ("Denpasar", 2), ("Singaraja", 2)] {
            service
                .create_city(CreateCityDto {
                    name: name.to_string(),
                    province_id,
                })
                .await
                .expect("create city");
        }
        let query = CityListQuery {
            page: 1,
            limit: 10,
            search: String::new(),
            province_id: Some(2),
        };
        let page = service.list_cities(&query).await.expect("list");
        assert_eq!(page.total, 2);
        assert!(page.items.iter().all(|c| c.province_id == 2));
    }

    #[tokio::test]
    async fn moving_a_subdistrict_to_a_missing_city_fails() {
        let service = service_with_two_provinces().await;
        service
            .create_city(CreateCityDto {
                name: "Denpasar".to_string(),
                province_id: 2,
            })
            .await
            .expect("create city");
        let subdistrict = service
            .create_subdistrict(CreateSubdistrictDto {
                name: "Denpasar Selatan".to_string(),
                city_id: 1,
            })
            .await
            .expect("create subdistrict");
        let err = service
            .update_subdistrict(
                subdistrict.id,
                UpdateSubdistrictDto {
                    name: None,
                    city_id: Some(77),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ReferentialIntegrity(_)));
    }

    #[tokio::test]
    async fn restrict_policy_refuses_to_orphan_children() {
        let service = service_with_two_provinces().await;
        service
            .create_city(CreateCityDto {
                name: "Denpasar".to_string(),
                province_id: 2,
            })
            .await
            .expect("create city");
        let err = service.delete_province(2).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(service.get_province(2).await.is_ok());
    }

    #[tokio::test]
    async fn cascade_policy_removes_the_whole_subtree() {
        let registry = cascading_registry();
        let service = RegionService::new(registry.clone());
        let province = service
            .create_province(CreateProvinceDto {
                name: "Jawa Timur".to_string(),
            })
            .await
            .expect("create province");
        let city = service
            .create_city(CreateCityDto {
                name: "Kediri".to_string(),
                province_id: province.id,
            })
            .await
            .expect("create city");
        let subdistrict = service
            .create_subdistrict(CreateSubdistrictDto {
                name: "Mojoroto".to_string(),
                city_id: city.id,
            })
            .await
            .expect("create subdistrict");
        registry
            .cooperatives
            .insert(|id| Cooperative {
                id,
                name: "Koperasi Maju".to_string(),
                province_id: province.id,
                city_id: city.id,
                subdistrict_id: subdistrict.id,
            })
            .await;

        service.delete_province(province.id).await.expect("delete");

        assert_eq!(registry.cities.len().await, 0);
        assert_eq!(registry.subdistricts.len().await, 0);
        assert_eq!(registry.cooperatives.len().await, 0);
    }

    #[tokio::test]
    async fn page_boundaries_cover_a_large_store_without_overlap() {
        use fake::faker::address::en::StateName;
        use fake::Fake;

        let service = RegionService::new(empty_registry());
        for _ in 0..25 {
            let name: String = StateName().fake();
            service
                .create_province(CreateProvinceDto { name })
                .await
                .expect("create province");
        }

        let mut seen = Vec::new();
        for page in 1..=4 {
            let paged = service
                .list_provinces(&province_query(page, 10, ""))
                .await
                .expect("list");
            assert_eq!(paged.total, 25);
            seen.extend(paged.items.iter().map(|p| p.id));
        }
        // 10 + 10 + 5 + 0, every id exactly once, descending
        assert_eq!(seen, (1..=25).rev().collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn update_renames_in_place() {
        let service = service_with_two_provinces().await;
        let updated = service
            .update_province(
                1,
                UpdateProvinceDto {
                    name: Some("Nanggroe Aceh".to_string()),
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.name, "Nanggroe Aceh");
        assert_eq!(updated.id, 1);
        let page = service
            .list_provinces(&province_query(1, 10, ""))
            .await
            .expect("list");
        assert_eq!(page.total, 2);
    }
}
