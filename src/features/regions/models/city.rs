use serde::Serialize;

use crate::core::store::Record;

/// City model representing Indonesian cities/regencies (kabupaten/kota)
#[derive(Debug, Clone, Serialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub province_id: i64,
}

impl Record for City {
    fn id(&self) -> i64 {
        self.id
    }
}
