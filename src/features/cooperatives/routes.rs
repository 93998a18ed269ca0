use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::cooperatives::handlers;
use crate::features::cooperatives::services::CooperativeService;

/// Create routes for the cooperatives feature
pub fn routes(service: Arc<CooperativeService>) -> Router {
    Router::new()
        .route("/api/cooperatives", get(handlers::list_cooperatives))
        .route("/api/cooperatives", post(handlers::create_cooperative))
        .route("/api/cooperatives/{id}", get(handlers::get_cooperative))
        .route("/api/cooperatives/{id}", put(handlers::update_cooperative))
        .route(
            "/api/cooperatives/{id}",
            delete(handlers::delete_cooperative),
        )
        .route(
            "/api/regions/subdistricts/{id}/cooperatives",
            get(handlers::list_cooperatives_by_subdistrict),
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
        let service = Arc::new(CooperativeService::new(seeded_registry()));
        TestServer::new(routes(service)).expect("test server")
    }

    #[tokio::test]
    async fn missing_region_id_in_the_body_fails_as_data() {
        let server = server();
        let response = server
            .post("/api/cooperatives")
            .json(&json!({ "name": "Koperasi A" }))
            .await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));
        assert!(!body["message"].as_str().unwrap_or("").is_empty());
    }

    #[tokio::test]
    async fn inconsistent_chain_is_a_422_envelope() {
        let server = server();
        let response = server
            .post("/api/cooperatives")
            .json(&json!({
                "name": "Koperasi Salah",
                "provinceId": 31,
                "cityId": 3171,
                "subdistrictId": 357101
            }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn subdistrict_route_scopes_the_listing() {
        let server = server();
        let response = server
            .get("/api/regions/subdistricts/357101/cooperatives")
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], json!(1));
        assert_eq!(body["data"][0]["subdistrictId"], json!(357101));
    }
}
