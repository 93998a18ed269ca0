use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::store::Record;

/// What the member is applying for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ApplicationType {
    #[serde(rename = "Simpan")]
    Save,
    #[serde(rename = "Pinjam")]
    Borrow,
}

impl ApplicationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationType::Save => "Simpan",
            ApplicationType::Borrow => "Pinjam",
        }
    }
}

/// Workflow state of an application request.
///
/// Transitions: Submitted → Approved or Submitted → Rejected, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ApplicationStatus {
    #[serde(rename = "Diajukan")]
    Submitted,
    #[serde(rename = "Disetujui")]
    Approved,
    #[serde(rename = "Ditolak")]
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "Diajukan",
            ApplicationStatus::Approved => "Disetujui",
            ApplicationStatus::Rejected => "Ditolak",
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, ApplicationStatus::Submitted)
    }
}

/// A member's request to save into or borrow from a cooperative.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationRequest {
    pub id: i64,
    pub user_id: i64,
    pub full_name: Option<String>,
    pub cooperative_id: i64,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub r#type: ApplicationType,
    pub status: ApplicationStatus,
}

impl Record for ApplicationRequest {
    fn id(&self) -> i64 {
        self.id
    }
}
