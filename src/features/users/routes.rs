use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::users::handlers;
use crate::features::users::services::UserService;

/// Create routes for the users feature
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/users", get(handlers::list_users))
        .route("/api/users", post(handlers::create_user))
        .route("/api/users/{id}", get(handlers::get_user))
        .route("/api/users/{id}", put(handlers::update_user))
        .route("/api/users/{id}", delete(handlers::delete_user))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::shared::test_helpers::seeded_registry;

    fn server() -> TestServer {
        let service = Arc::new(UserService::new(seeded_registry()));
        TestServer::new(routes(service)).expect("test server")
    }

    #[tokio::test]
    async fn invalid_phone_number_is_rejected() {
        let server = server();
        let response = server
            .post("/api/users")
            .json(&json!({
                "name": "Calon User",
                "email": "calon@example.com",
                "phoneNumber": "62812345678",
                "role": "user"
            }))
            .await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn role_filter_is_applied_from_the_query() {
        let server = server();
        let response = server
            .get("/api/users")
            .add_query_param("role", "admin")
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], json!(2));
    }
}
