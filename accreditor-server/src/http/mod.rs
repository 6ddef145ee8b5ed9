//! HTTP server module

mod api;
mod evaluations;
mod static_files;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub use api::{ApiResult, ErrorResponse, HealthResponse, error_response};
pub use evaluations::{
    CreateEvaluationRequest, CreateEvaluationResponse, MessageResponse, UpdateCriterionResponse,
};

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/criteria-data", get(api::criteria_data))
        .route(
            "/api/evaluations",
            get(evaluations::list_evaluations).post(evaluations::create_evaluation),
        )
        .route("/api/evaluations/:id", get(evaluations::get_evaluation))
        .route(
            "/api/evaluations/:id/criteria/:criterion_index",
            put(evaluations::update_criterion),
        )
        .route(
            "/api/evaluations/:id/criteria/:criterion_index/sub-criteria/:sub_index",
            put(evaluations::update_sub_criterion),
        )
        .fallback(static_files::static_handler)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use accreditor_core::CriteriaTemplate;
    use axum_test::TestServer;

    fn server() -> TestServer {
        let state = Arc::new(AppState::in_memory(CriteriaTemplate::empty()).unwrap());
        TestServer::new(create_router(state)).unwrap()
    }

    #[tokio::test]
    async fn test_router_has_health_endpoint() {
        let response = server().get("/api/health").await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_root_serves_web_ui() {
        let response = server().get("/").await;
        response.assert_status_ok();
        assert!(response.text().contains("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_client_routes_fall_back_to_index() {
        let response = server().get("/evaluations/12").await;
        response.assert_status_ok();
        assert!(response.text().contains("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_static_asset_content_type() {
        let response = server().get("/app.js").await;
        response.assert_status_ok();
        let content_type = response.header("content-type");
        assert!(content_type.to_str().unwrap().contains("javascript"));
    }

    #[tokio::test]
    async fn test_unknown_api_path_is_json_404() {
        let response = server().get("/api/nope").await;
        response.assert_status_not_found();
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "NOT_FOUND");
    }
}
