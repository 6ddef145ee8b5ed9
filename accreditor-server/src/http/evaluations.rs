//! Evaluation REST API endpoints
//!
//! Path ids that are not integers match nothing, exactly like an unknown id.

use std::sync::Arc;

use accreditor_core::{
    CriterionUpdate, EvaluationDocument, EvaluationError, EvaluationSummary, NewEvaluation,
    SubCriterionUpdate,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use super::api::{ApiResult, ErrorResponse, error_response};
use crate::AppState;

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn parse_index(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// Unwrap a JSON body, reporting a missing or malformed one as a validation error
fn json_body<T>(
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, (StatusCode, Json<ErrorResponse>)> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        error_response(EvaluationError::Validation(rejection.body_text()))
    })
}

fn evaluation_not_found(raw: &str) -> (StatusCode, Json<ErrorResponse>) {
    error_response(EvaluationError::NotFound(format!("Evaluation {}", raw)))
}

/// GET /api/evaluations
pub async fn list_evaluations(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Vec<EvaluationSummary>> {
    state
        .evaluations
        .list_evaluations()
        .map(Json)
        .map_err(error_response)
}

/// GET /api/evaluations/:id
pub async fn get_evaluation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<EvaluationDocument> {
    let evaluation_id = parse_id(&id).ok_or_else(|| evaluation_not_found(&id))?;
    state
        .evaluations
        .get_document(evaluation_id)
        .map(Json)
        .map_err(error_response)
}

/// Body of POST /api/evaluations
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvaluationRequest {
    #[serde(default)]
    pub program_name: Option<String>,
    #[serde(default)]
    pub university_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEvaluationResponse {
    pub id: i64,
    pub program_name: String,
    pub university_name: String,
    pub message: String,
}

/// POST /api/evaluations
pub async fn create_evaluation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateEvaluationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateEvaluationResponse>), (StatusCode, Json<ErrorResponse>)> {
    let request = json_body(payload)?;
    let new = NewEvaluation::new(request.program_name, request.university_name)
        .map_err(error_response)?;
    let evaluation = state
        .evaluations
        .create_evaluation(new)
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateEvaluationResponse {
            id: evaluation.id,
            program_name: evaluation.program_name,
            university_name: evaluation.university_name,
            message: "Evaluation created successfully".into(),
        }),
    ))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateCriterionResponse {
    pub message: String,
    /// Criterion rows changed; zero when nothing matched
    pub changes: usize,
}

/// PUT /api/evaluations/:id/criteria/:criterion_index
pub async fn update_criterion(
    State(state): State<Arc<AppState>>,
    Path((id, criterion_index)): Path<(String, String)>,
    payload: Result<Json<CriterionUpdate>, JsonRejection>,
) -> ApiResult<UpdateCriterionResponse> {
    let update = json_body(payload)?;
    let changes = match (parse_id(&id), parse_index(&criterion_index)) {
        (Some(evaluation_id), Some(criterion_index)) => state
            .evaluations
            .update_criterion(evaluation_id, criterion_index, &update)
            .map_err(error_response)?,
        _ => 0,
    };

    Ok(Json(UpdateCriterionResponse {
        message: "Criterion updated successfully".into(),
        changes,
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// PUT /api/evaluations/:id/criteria/:criterion_index/sub-criteria/:sub_index
pub async fn update_sub_criterion(
    State(state): State<Arc<AppState>>,
    Path((id, criterion_index, sub_index)): Path<(String, String, String)>,
    payload: Result<Json<SubCriterionUpdate>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let update = json_body(payload)?;
    let (Some(evaluation_id), Some(criterion_index), Some(sub_index)) = (
        parse_id(&id),
        parse_index(&criterion_index),
        parse_index(&sub_index),
    ) else {
        return Err(error_response(EvaluationError::NotFound(format!(
            "Sub-criterion {}.{} of evaluation {}",
            criterion_index, sub_index, id
        ))));
    };

    state
        .evaluations
        .update_sub_criterion(evaluation_id, criterion_index, sub_index, &update)
        .map_err(error_response)?;

    Ok(Json(MessageResponse {
        message: "Sub-criterion updated successfully".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("4.2"), None);
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index("3"), Some(3));
    }

    #[test]
    fn test_create_request_uses_camel_case() {
        let request: CreateEvaluationRequest =
            serde_json::from_str(r#"{"programName": "CS", "universityName": "State"}"#).unwrap();
        assert_eq!(request.program_name.as_deref(), Some("CS"));
        assert_eq!(request.university_name.as_deref(), Some("State"));

        let request: CreateEvaluationRequest = serde_json::from_str("{}").unwrap();
        assert!(request.program_name.is_none());
    }
}
