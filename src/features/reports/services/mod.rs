pub mod loan_report_service;
pub mod saving_report_service;

pub use loan_report_service::LoanReportService;
pub use saving_report_service::SavingReportService;
