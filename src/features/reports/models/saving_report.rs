use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::store::Record;

/// Kind of cooperative saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SavingType {
    #[serde(rename = "Simpanan Pokok")]
    Pokok,
    #[serde(rename = "Simpanan Wajib")]
    Wajib,
}

impl SavingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SavingType::Pokok => "Simpanan Pokok",
            SavingType::Wajib => "Simpanan Wajib",
        }
    }
}

/// A saving entry in a cooperative's ledger.
///
/// `full_name` is denormalized from the member for report rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SavingReport {
    pub id: i64,
    pub cooperative_id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub r#type: SavingType,
}

impl Record for SavingReport {
    fn id(&self) -> i64 {
        self.id
    }
}
