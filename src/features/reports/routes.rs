use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::{LoanReportService, SavingReportService};

/// Create routes for the savings/loans report feature
pub fn routes(savings: Arc<SavingReportService>, loans: Arc<LoanReportService>) -> Router {
    let state = ReportState { savings, loans };
    Router::new()
        // Saving report routes
        .route("/api/reports/savings", get(handlers::list_saving_reports))
        .route("/api/reports/savings", post(handlers::create_saving_report))
        .route(
            "/api/reports/savings/{id}",
            get(handlers::get_saving_report),
        )
        .route(
            "/api/reports/savings/{id}",
            put(handlers::update_saving_report),
        )
        .route(
            "/api/reports/savings/{id}",
            delete(handlers::delete_saving_report),
        )
        // Loan report routes
        .route("/api/reports/loans", get(handlers::list_loan_reports))
        .route("/api/reports/loans", post(handlers::create_loan_report))
        .route("/api/reports/loans/{id}", get(handlers::get_loan_report))
        .route(
            "/api/reports/loans/{id}",
            put(handlers::update_loan_report),
        )
        .route(
            "/api/reports/loans/{id}",
            delete(handlers::delete_loan_report),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::shared::test_helpers::seeded_registry;

    fn server() -> TestServer {
        let registry = seeded_registry();
        let savings = Arc::new(SavingReportService::new(registry.clone()));
        let loans = Arc::new(LoanReportService::new(registry));
        TestServer::new(routes(savings, loans)).expect("test server")
    }

    #[tokio::test]
    async fn saving_listing_accepts_a_date_window() {
        let server = server();
        let response = server
            .get("/api/reports/savings")
            .add_query_param("startDate", "2025-01-05")
            .add_query_param("endDate", "2025-01-10")
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], json!(2));
    }

    #[tokio::test]
    async fn loan_search_matches_the_indonesian_status_label() {
        let server = server();
        let response = server
            .get("/api/reports/loans")
            .add_query_param("search", "menunggu")
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], json!(1));
        assert_eq!(body["data"][0]["status"], json!("Menunggu"));
    }
}
