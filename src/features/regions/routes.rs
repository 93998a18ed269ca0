use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::regions::handlers;
use crate::features::regions::services::RegionService;

/// Create routes for the regions feature
pub fn routes(service: Arc<RegionService>) -> Router {
    Router::new()
        // Province routes
        .route("/api/regions/provinces", get(handlers::list_provinces))
        .route("/api/regions/provinces", post(handlers::create_province))
        .route("/api/regions/provinces/{id}", get(handlers::get_province))
        .route("/api/regions/provinces/{id}", put(handlers::update_province))
        .route(
            "/api/regions/provinces/{id}",
            delete(handlers::delete_province),
        )
        .route(
            "/api/regions/provinces/{id}/cities",
            get(handlers::list_cities_by_province),
        )
        // City routes
        .route("/api/regions/cities", get(handlers::list_cities))
        .route("/api/regions/cities", post(handlers::create_city))
        .route("/api/regions/cities/{id}", get(handlers::get_city))
        .route("/api/regions/cities/{id}", put(handlers::update_city))
        .route("/api/regions/cities/{id}", delete(handlers::delete_city))
        .route(
            "/api/regions/cities/{id}/subdistricts",
            get(handlers::list_subdistricts_by_city),
        )
        // Subdistrict routes
        .route("/api/regions/subdistricts", get(handlers::list_subdistricts))
        .route(
            "/api/regions/subdistricts",
            post(handlers::create_subdistrict),
        )
        .route(
            "/api/regions/subdistricts/{id}",
            get(handlers::get_subdistrict),
        )
        .route(
            "/api/regions/subdistricts/{id}",
            put(handlers::update_subdistrict),
        )
        .route(
            "/api/regions/subdistricts/{id}",
            delete(handlers::delete_subdistrict),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::features::regions::dtos::CreateProvinceDto;
    use crate::shared::test_helpers::empty_registry;

    async fn server_with_provinces(names: &[&str]) -> (TestServer, Arc<RegionService>) {
        let service = Arc::new(RegionService::new(empty_registry()));
        for name in names {
            service
                .create_province(CreateProvinceDto {
                    name: name.to_string(),
                })
                .await
                .expect("create province");
        }
        let server = TestServer::new(routes(service.clone())).expect("test server");
        (server, service)
    }

    #[tokio::test]
    async fn listing_returns_the_envelope_with_meta() {
        let (server, _) = server_with_provinces(&["Aceh", "Bali"]).await;

        let response = server
            .get("/api/regions/provinces")
            .add_query_param("page", "1")
            .add_query_param("limit", "1")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["meta"]["total"], json!(2));
        assert_eq!(body["meta"]["limit"], json!(1));
        assert_eq!(body["data"][0]["name"], json!("Bali"));
    }

    #[tokio::test]
    async fn creating_a_city_without_a_province_id_fails_as_data() {
        let (server, service) = server_with_provinces(&["Aceh"]).await;

        let response = server
            .post("/api/regions/cities")
            .json(&json!({ "name": "Kota X" }))
            .await;
        response.assert_status_bad_request();

        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));
        assert!(!body["message"].as_str().unwrap_or("").is_empty());

        let cities = service
            .list_cities(&crate::features::regions::dtos::CityListQuery {
                page: 1,
                limit: 10,
                search: String::new(),
                province_id: None,
            })
            .await
            .expect("list");
        assert_eq!(cities.total, 0);
    }

    #[tokio::test]
    async fn too_short_name_is_rejected_with_a_message() {
        let (server, _) = server_with_provinces(&[]).await;

        let response = server
            .post("/api/regions/provinces")
            .json(&json!({ "name": "X" }))
            .await;
        response.assert_status_bad_request();

        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));
        assert!(!body["message"].as_str().unwrap_or("").is_empty());
    }

    #[tokio::test]
    async fn missing_province_lookup_is_a_404_envelope() {
        let (server, _) = server_with_provinces(&[]).await;

        let response = server.get("/api/regions/provinces/42").await;
        response.assert_status_not_found();

        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn nested_city_listing_resolves_the_cascade() {
        let (server, service) = server_with_provinces(&["Bali"]).await;
        service
            .create_city(crate::features::regions::dtos::CreateCityDto {
                name: "Denpasar".to_string(),
                province_id: 1,
            })
            .await
            .expect("create city");

        let response = server.get("/api/regions/provinces/1/cities").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], json!(1));
        assert_eq!(body["data"][0]["name"], json!("Denpasar"));
    }
}
