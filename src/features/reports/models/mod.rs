mod loan_report;
mod saving_report;

pub use loan_report::{LoanReport, LoanStatus};
pub use saving_report::{SavingReport, SavingType};
