use serde::Serialize;

use crate::core::store::Record;

/// Province model representing Indonesian provinces (provinsi)
#[derive(Debug, Clone, Serialize)]
pub struct Province {
    pub id: i64,
    pub name: String,
}

impl Record for Province {
    fn id(&self) -> i64 {
        self.id
    }
}
