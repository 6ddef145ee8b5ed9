//! REST API handlers shared across resources

use std::sync::Arc;

use accreditor_core::{CriteriaTemplate, EvaluationError};
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Result type for JSON handlers
pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Map an evaluation error onto a status code and JSON body.
///
/// Storage failures are reported with their underlying message.
pub fn error_response(err: EvaluationError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &err {
        EvaluationError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        EvaluationError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        _ => {
            tracing::error!("Request failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.into(),
        }),
    )
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the server
    pub status: String,
    /// Server version
    pub version: String,
    /// Seconds since server started
    pub uptime_seconds: i64,
    /// Whether a non-empty criteria template was loaded
    pub template_loaded: bool,
}

/// GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        template_loaded: !state.template().is_empty(),
    })
}

/// GET /api/criteria-data - the loaded template, `[]` if loading failed
pub async fn criteria_data(State(state): State<Arc<AppState>>) -> Json<CriteriaTemplate> {
    Json(state.template().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, routing::get};
    use axum_test::TestServer;

    fn create_test_app(template: CriteriaTemplate) -> Router {
        let state = Arc::new(AppState::in_memory(template).unwrap());
        Router::new()
            .route("/api/health", get(health))
            .route("/api/criteria-data", get(criteria_data))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = TestServer::new(create_test_app(CriteriaTemplate::empty())).unwrap();

        let response = server.get("/api/health").await;
        response.assert_status_ok();

        let body: HealthResponse = response.json();
        assert_eq!(body.status, "ok");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
        assert!(body.uptime_seconds >= 0);
        assert!(!body.template_loaded);
    }

    #[tokio::test]
    async fn test_criteria_data_empty_when_template_missing() {
        let server = TestServer::new(create_test_app(CriteriaTemplate::empty())).unwrap();

        let response = server.get("/api/criteria-data").await;
        response.assert_status_ok();
        response.assert_json(&serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_criteria_data_returns_template() {
        let json = r#"[{"title": "Students", "type": "must", "subCriteria": [
            {"text": "Admission", "questions": ["Is there a policy?"]}
        ]}]"#;
        let template = CriteriaTemplate::from_json(json).unwrap();
        let server = TestServer::new(create_test_app(template)).unwrap();

        let response = server.get("/api/criteria-data").await;
        response.assert_status_ok();
        let expected: serde_json::Value = serde_json::from_str(json).unwrap();
        response.assert_json(&expected);
    }

    #[test]
    fn test_error_response_status_mapping() {
        let (status, body) = error_response(EvaluationError::Validation("missing".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "VALIDATION_ERROR");

        let (status, _) = error_response(EvaluationError::NotFound("Evaluation 1".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = error_response(EvaluationError::LockPoisoned);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Database connection lock poisoned");
    }
}
