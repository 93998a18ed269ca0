use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::store::Record;

/// Decision state of a cooperative loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LoanStatus {
    #[serde(rename = "Disetujui")]
    Approved,
    #[serde(rename = "Ditolak")]
    Rejected,
    #[serde(rename = "Menunggu")]
    Pending,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Approved => "Disetujui",
            LoanStatus::Rejected => "Ditolak",
            LoanStatus::Pending => "Menunggu",
        }
    }
}

/// A loan entry in a cooperative's ledger.
#[derive(Debug, Clone, Serialize)]
pub struct LoanReport {
    pub id: i64,
    pub cooperative_id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub status: LoanStatus,
}

impl Record for LoanReport {
    fn id(&self) -> i64 {
        self.id
    }
}
