//! Inference HTTP Routes
//!
//! Session lifecycle and automaton walks over `InferenceService`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde_json::Value;

use crate::api::{
    parse_session_id, AnswerRequest, ApiError, ErrorResponse, InferenceService, RuleSource,
    StartRequest, StepResponse, WalkRequest, WalkResponse,
};
use crate::session::SessionSnapshot;

type Rejection = (StatusCode, Json<ErrorResponse>);

/// Session routes, mounted under `/inference`
pub fn inference_routes(service: Arc<InferenceService>) -> Router {
    Router::new()
        .route("/start", post(start_handler))
        .route("/answer", post(answer_handler))
        .route(
            "/sessions/:session_id",
            get(snapshot_handler).delete(end_handler),
        )
        .with_state(service)
}

/// Automaton routes, mounted under `/automaton`
pub fn automaton_routes(service: Arc<InferenceService>) -> Router {
    Router::new()
        .route("/walk", post(walk_handler))
        .with_state(service)
}

fn reject(err: ApiError) -> Rejection {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from_error(&err)))
}

/// Failures found while reading the request body, before the service ran
fn reject_input(service: &InferenceService, err: ApiError) -> Rejection {
    service.metrics().increment_requests_rejected();
    reject(err)
}

/// Unwrap a JSON body; a missing content type or unparsable body becomes
/// a validation error in the usual envelope.
fn json_body(
    service: &InferenceService,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Value, Rejection> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| {
            reject_input(
                service,
                ApiError::validation(format!("Invalid JSON body: {}", rejection.body_text())),
            )
        })
}

async fn start_handler(
    State(service): State<Arc<InferenceService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<StepResponse>), Rejection> {
    let body = json_body(&service, payload)?;
    let req = StartRequest::from_value(body).map_err(|e| reject_input(&service, e))?;
    let step = match &req.source {
        RuleSource::Project(project_id) => service.start_session(project_id),
        RuleSource::Inline(rules) => service.start_session_with_rules(rules),
    }
    .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(step)))
}

async fn answer_handler(
    State(service): State<Arc<InferenceService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<StepResponse>, Rejection> {
    let body = json_body(&service, payload)?;
    let req = AnswerRequest::from_value(body).map_err(|e| reject_input(&service, e))?;
    service
        .submit_answer(req.session_id, &req.fact, req.value)
        .map(Json)
        .map_err(reject)
}

async fn snapshot_handler(
    State(service): State<Arc<InferenceService>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>, Rejection> {
    let session_id = parse_session_id(Some(session_id)).map_err(|e| reject_input(&service, e))?;
    service
        .session_snapshot(session_id)
        .map(Json)
        .map_err(reject)
}

async fn end_handler(
    State(service): State<Arc<InferenceService>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>, Rejection> {
    let session_id = parse_session_id(Some(session_id)).map_err(|e| reject_input(&service, e))?;
    service.end_session(session_id).map(Json).map_err(reject)
}

async fn walk_handler(
    State(service): State<Arc<InferenceService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<WalkResponse>, Rejection> {
    let body = json_body(&service, payload)?;
    let req = WalkRequest::from_value(body).map_err(|e| reject_input(&service, e))?;
    service
        .walk_rule(&req.project_id, &req.rule_id, &req.answers)
        .map(Json)
        .map_err(reject)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_maps_status() {
        let (status, Json(body)) = reject(ApiError::SessionFinished("done".into()));
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.code, "RQ_SESSION_FINISHED");
        assert_eq!(body.status, 409);
    }
}
