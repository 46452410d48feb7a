//! API response types

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::automaton::WalkOutcome;
use crate::condition::Answers;
use crate::scheduler::Decision;
use crate::session::SessionSnapshot;

use super::errors::ApiError;

/// Outcome of a start or answer request.
///
/// While the session is open it carries the next question; once finished
/// it carries the conclusion (or the no-rule message) and the answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResponse {
    pub session_id: Uuid,
    pub finished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
    /// Set only when a rule fired
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Answers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl StepResponse {
    /// Build from a snapshot. `possible_values` applies to the pending
    /// question and is ignored once the session is finished.
    pub fn from_snapshot(snapshot: SessionSnapshot, possible_values: Option<Vec<String>>) -> Self {
        match snapshot.decision {
            Decision::AwaitingAnswer { fact } => Self {
                session_id: snapshot.session_id,
                finished: false,
                next_question: Some(fact),
                possible_values,
                conclusion: None,
                rule_id: None,
                answers: None,
                explanation: None,
            },
            Decision::Concluded {
                rule_id,
                conclusion,
            } => Self {
                session_id: snapshot.session_id,
                finished: true,
                next_question: None,
                possible_values: None,
                conclusion: Some(conclusion),
                rule_id: Some(rule_id),
                answers: Some(snapshot.answers),
                explanation: snapshot.explanation,
            },
            Decision::NoRuleSatisfied { message } => Self {
                session_id: snapshot.session_id,
                finished: true,
                next_question: None,
                possible_values: None,
                conclusion: Some(message),
                rule_id: None,
                answers: Some(snapshot.answers),
                explanation: snapshot.explanation,
            },
        }
    }
}

/// Result of walking one rule's automaton
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkResponse {
    pub project_id: String,
    pub rule_id: String,
    pub finished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_fact: Option<String>,
    pub outcome: WalkOutcome,
    pub states: usize,
}

impl WalkResponse {
    pub fn new(
        project_id: impl Into<String>,
        rule_id: impl Into<String>,
        outcome: WalkOutcome,
        states: usize,
    ) -> Self {
        let pending_fact = match &outcome {
            WalkOutcome::Pending { fact, .. } => Some(fact.clone()),
            _ => None,
        };
        Self {
            project_id: project_id.into(),
            rule_id: rule_id.into(),
            finished: outcome.is_accepted(),
            pending_fact,
            outcome,
            states,
        }
    }
}

/// Line-protocol success response
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub status: String,
    pub data: Value,
}

impl SuccessResponse {
    pub fn new(data: Value) -> Self {
        Self {
            status: "ok".to_string(),
            data,
        }
    }
}

/// Error body shared by the line protocol and HTTP
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub status: u16,
}

impl ErrorResponse {
    pub fn from_error(err: &ApiError) -> Self {
        Self {
            error: err.message(),
            code: err.code().to_string(),
            status: err.status_code(),
        }
    }
}

/// Unified line-protocol response
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Success(SuccessResponse),
    Error(ErrorResponse),
}

impl Response {
    pub fn success(data: Value) -> Self {
        Response::Success(SuccessResponse::new(data))
    }

    pub fn error(err: &ApiError) -> Self {
        Response::Error(ErrorResponse::from_error(err))
    }

    /// Convert to a single JSON line
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"error":"response serialization failed: {}","code":"RQ_INTERNAL","status":500}}"#,
                e
            )
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }
}
