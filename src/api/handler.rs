//! Line-protocol handler
//!
//! Parses one JSON request, dispatches it to the service and renders one
//! JSON response. Errors never escape as panics; they become error lines.

use serde::Serialize;
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::request::{AnswerRequest, Request, RuleSource, StartRequest, WalkRequest};
use super::response::Response;
use super::service::InferenceService;

/// Dispatches protocol requests to an `InferenceService`
pub struct ApiHandler<'a> {
    service: &'a InferenceService,
}

impl<'a> ApiHandler<'a> {
    pub fn new(service: &'a InferenceService) -> Self {
        Self { service }
    }

    /// Handle a raw JSON request string
    pub fn handle(&self, json_request: &str) -> Response {
        let request = match Request::parse(json_request) {
            Ok(r) => r,
            Err(e) => {
                self.service.metrics().increment_requests_rejected();
                return Response::error(&e);
            }
        };

        match self.dispatch(request) {
            Ok(data) => Response::success(data),
            Err(e) => Response::error(&e),
        }
    }

    fn dispatch(&self, request: Request) -> ApiResult<Value> {
        match request {
            Request::Start(r) => self.handle_start(r),
            Request::Answer(r) => self.handle_answer(r),
            Request::Walk(r) => self.handle_walk(r),
            Request::Snapshot(id) => to_value(self.service.session_snapshot(id)?),
            Request::End(id) => to_value(self.service.end_session(id)?),
        }
    }

    fn handle_start(&self, req: StartRequest) -> ApiResult<Value> {
        let step = match &req.source {
            RuleSource::Project(project_id) => self.service.start_session(project_id)?,
            RuleSource::Inline(rules) => self.service.start_session_with_rules(rules)?,
        };
        to_value(step)
    }

    fn handle_answer(&self, req: AnswerRequest) -> ApiResult<Value> {
        to_value(
            self.service
                .submit_answer(req.session_id, &req.fact, req.value)?,
        )
    }

    fn handle_walk(&self, req: WalkRequest) -> ApiResult<Value> {
        to_value(
            self.service
                .walk_rule(&req.project_id, &req.rule_id, &req.answers)?,
        )
    }
}

fn to_value<T: Serialize>(data: T) -> ApiResult<Value> {
    serde_json::to_value(data)
        .map_err(|e| ApiError::StoreIo(format!("Failed to serialize response: {}", e)))
}
