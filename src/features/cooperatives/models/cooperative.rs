use serde::Serialize;

use crate::core::store::Record;

/// Cooperative (koperasi) anchored to a province/city/subdistrict chain.
///
/// Invariant: `subdistrict_id`'s city equals `city_id`, and that city's
/// province equals `province_id`. Enforced by the service on every
/// create/update touching a region id.
#[derive(Debug, Clone, Serialize)]
pub struct Cooperative {
    pub id: i64,
    pub name: String,
    pub province_id: i64,
    pub city_id: i64,
    pub subdistrict_id: i64,
}

impl Record for Cooperative {
    fn id(&self) -> i64 {
        self.id
    }
}
