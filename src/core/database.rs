//! The in-memory registry: one table per entity, constructed once at
//! process start and injected into every service.

use std::time::Duration;

use crate::core::config::{DeletePolicy, StoreConfig};
use crate::core::seed;
use crate::core::store::Table;
use crate::features::applications::models::ApplicationRequest;
use crate::features::cooperatives::models::Cooperative;
use crate::features::regions::models::{City, Province, Subdistrict};
use crate::features::reports::models::{LoanReport, SavingReport};
use crate::features::users::models::User;

pub struct Registry {
    latency: Duration,
    delete_policy: DeletePolicy,
    pub provinces: Table<Province>,
    pub cities: Table<City>,
    pub subdistricts: Table<Subdistrict>,
    pub cooperatives: Table<Cooperative>,
    pub users: Table<User>,
    pub saving_reports: Table<SavingReport>,
    pub loan_reports: Table<LoanReport>,
    pub application_requests: Table<ApplicationRequest>,
}

impl Registry {
    /// Build the registry from the static region datasets and the built-in
    /// demo records.
    pub fn with_seed(config: &StoreConfig) -> Result<Self, String> {
        let data = seed::load()?;
        Ok(Self {
            latency: config.latency,
            delete_policy: config.delete_policy,
            provinces: Table::seeded(data.provinces),
            cities: Table::seeded(data.cities),
            subdistricts: Table::seeded(data.subdistricts),
            cooperatives: Table::seeded(data.cooperatives),
            users: Table::seeded(data.users),
            saving_reports: Table::seeded(data.saving_reports),
            loan_reports: Table::seeded(data.loan_reports),
            application_requests: Table::seeded(data.application_requests),
        })
    }

    /// An empty registry, for tests that install their own records.
    pub fn empty(config: &StoreConfig) -> Self {
        Self {
            latency: config.latency,
            delete_policy: config.delete_policy,
            provinces: Table::new(),
            cities: Table::new(),
            subdistricts: Table::new(),
            cooperatives: Table::new(),
            users: Table::new(),
            saving_reports: Table::new(),
            loan_reports: Table::new(),
            application_requests: Table::new(),
        }
    }

    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// Artificial delay emulating a remote data source. No-op at zero.
    pub async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Remove cooperatives matching the predicate together with the ledger
    /// rows that reference them. Returns the number of cooperatives removed.
    pub async fn remove_cooperatives_where(
        &self,
        pred: impl Fn(&Cooperative) -> bool,
    ) -> usize {
        let ids: Vec<i64> = self
            .cooperatives
            .snapshot()
            .await
            .into_iter()
            .filter(|coop| pred(coop))
            .map(|coop| coop.id)
            .collect();
        if ids.is_empty() {
            return 0;
        }
        self.saving_reports
            .remove_where(|r| ids.contains(&r.cooperative_id))
            .await;
        self.loan_reports
            .remove_where(|r| ids.contains(&r.cooperative_id))
            .await;
        self.application_requests
            .remove_where(|r| ids.contains(&r.cooperative_id))
            .await;
        self.cooperatives
            .remove_where(|coop| ids.contains(&coop.id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seed_produces_a_consistent_hierarchy() {
        let registry = Registry::with_seed(&StoreConfig::instant()).expect("seed loads");

        let provinces = registry.provinces.snapshot().await;
        let cities = registry.cities.snapshot().await;
        let subdistricts = registry.subdistricts.snapshot().await;
        assert!(!provinces.is_empty());
        assert!(!cities.is_empty());
        assert!(!subdistricts.is_empty());

        for city in &cities {
            assert!(
                provinces.iter().any(|p| p.id == city.province_id),
                "city {} references missing province {}",
                city.id,
                city.province_id
            );
        }
        for subdistrict in &subdistricts {
            assert!(
                cities.iter().any(|c| c.id == subdistrict.city_id),
                "subdistrict {} references missing city {}",
                subdistrict.id,
                subdistrict.city_id
            );
        }
    }

    #[tokio::test]
    async fn seeded_cooperatives_form_valid_chains() {
        let registry = Registry::with_seed(&StoreConfig::instant()).expect("seed loads");

        let cities = registry.cities.snapshot().await;
        let subdistricts = registry.subdistricts.snapshot().await;
        for coop in registry.cooperatives.snapshot().await {
            let subdistrict = subdistricts
                .iter()
                .find(|s| s.id == coop.subdistrict_id)
                .expect("cooperative subdistrict exists");
            assert_eq!(subdistrict.city_id, coop.city_id);
            let city = cities
                .iter()
                .find(|c| c.id == coop.city_id)
                .expect("cooperative city exists");
            assert_eq!(city.province_id, coop.province_id);
        }
    }
}
