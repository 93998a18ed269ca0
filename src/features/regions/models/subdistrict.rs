use serde::Serialize;

use crate::core::store::Record;

/// Subdistrict model representing Indonesian subdistricts (kecamatan)
#[derive(Debug, Clone, Serialize)]
pub struct Subdistrict {
    pub id: i64,
    pub name: String,
    pub city_id: i64,
}

impl Record for Subdistrict {
    fn id(&self) -> i64 {
        self.id
    }
}
