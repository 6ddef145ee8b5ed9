//! Storage failures surface as 500 responses carrying the database message

mod common;

use std::sync::Arc;

use accreditor_server::http::{CreateEvaluationResponse, ErrorResponse};
use accreditor_server::{AppState, create_router};
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use tempfile::TempDir;

/// File-backed server with one evaluation whose `responses` table is then dropped
async fn server_with_broken_schema(temp_dir: &TempDir) -> (TestServer, i64) {
    let database = temp_dir.path().join("accreditor.db");
    let state = Arc::new(AppState::open(&database, common::template()).unwrap());
    let server = TestServer::new(create_router(state)).unwrap();

    let created: CreateEvaluationResponse = server
        .post("/api/evaluations")
        .json(&json!({"programName": "CS", "universityName": "State"}))
        .await
        .json();

    let conn = rusqlite::Connection::open(&database).unwrap();
    conn.execute_batch("DROP TABLE responses;").unwrap();

    (server, created.id)
}

#[tokio::test]
async fn get_evaluation_reports_database_failure() {
    let temp_dir = TempDir::new().unwrap();
    let (server, id) = server_with_broken_schema(&temp_dir).await;

    let response = server.get(&format!("/api/evaluations/{id}")).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let error: ErrorResponse = response.json();
    assert_eq!(error.code, "INTERNAL_ERROR");
    assert!(error.error.contains("no such table: responses"), "{}", error.error);
}

#[tokio::test]
async fn sub_criterion_update_reports_database_failure() {
    let temp_dir = TempDir::new().unwrap();
    let (server, id) = server_with_broken_schema(&temp_dir).await;

    let response = server
        .put(&format!("/api/evaluations/{id}/criteria/0/sub-criteria/0"))
        .json(&json!({"responses": ["Yes", "No", null, "Yes"]}))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let error: ErrorResponse = response.json();
    assert_eq!(error.code, "INTERNAL_ERROR");
    assert!(error.error.starts_with("Database error"), "{}", error.error);
}
