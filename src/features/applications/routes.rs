use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::features::applications::handlers;
use crate::features::applications::services::ApplicationService;

/// Create routes for the applications feature
pub fn routes(service: Arc<ApplicationService>) -> Router {
    Router::new()
        .route("/api/applications", get(handlers::list_applications))
        .route("/api/applications", post(handlers::create_application))
        .route("/api/applications/{id}", get(handlers::get_application))
        .route("/api/applications/{id}", put(handlers::update_application))
        .route(
            "/api/applications/{id}",
            delete(handlers::delete_application),
        )
        .route(
            "/api/applications/{id}/status",
            patch(handlers::resolve_application),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::shared::test_helpers::seeded_registry;

    fn server() -> TestServer {
        let service = Arc::new(ApplicationService::new(seeded_registry()));
        TestServer::new(routes(service)).expect("test server")
    }

    #[tokio::test]
    async fn resolving_twice_is_a_conflict_envelope() {
        let server = server();

        let first = server
            .patch("/api/applications/1/status")
            .json(&json!({ "status": "Disetujui" }))
            .await;
        first.assert_status_ok();

        let second = server
            .patch("/api/applications/1/status")
            .json(&json!({ "status": "Ditolak" }))
            .await;
        second.assert_status(StatusCode::CONFLICT);
        let body: Value = second.json();
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn the_decision_only_accepts_approved_or_rejected() {
        let server = server();
        let response = server
            .patch("/api/applications/1/status")
            .json(&json!({ "status": "Diajukan" }))
            .await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn created_requests_come_back_submitted() {
        let server = server();
        let response = server
            .post("/api/applications")
            .json(&json!({
                "userId": 103,
                "cooperativeId": 1,
                "amount": "750000",
                "date": "2025-02-10",
                "type": "Pinjam"
            }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["status"], json!("Diajukan"));
    }
}
