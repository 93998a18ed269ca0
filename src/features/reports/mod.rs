//! Savings and loan report ledgers.
//!
//! Both ledgers share the same listing pipeline: cooperative scope, search
//! over the member name and the type/status label, an inclusive date range,
//! and a date-descending sort.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{LoanReportService, SavingReportService};
