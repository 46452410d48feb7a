//! API request types
//!
//! Requests arrive as JSON, either as HTTP bodies or as JSON lines tagged
//! with an `op` field. Every field is optional on the wire so that missing
//! input surfaces as a validation error rather than a decoder failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::condition::{Answers, FactValue};
use crate::rules::RawRule;

use super::errors::{ApiError, ApiResult};

/// Where a session takes its rules from
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSource {
    /// Rules listed by a project in the store
    Project(String),
    /// Rules supplied with the request
    Inline(Vec<RawRule>),
}

/// Start request
#[derive(Debug, Clone, PartialEq)]
pub struct StartRequest {
    pub source: RuleSource,
}

/// Answer request
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRequest {
    pub session_id: Uuid,
    pub fact: String,
    pub value: FactValue,
}

/// Automaton walk request
#[derive(Debug, Clone, PartialEq)]
pub struct WalkRequest {
    pub project_id: String,
    pub rule_id: String,
    pub answers: Answers,
}

/// Unified request envelope for the line protocol
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Start(StartRequest),
    Answer(AnswerRequest),
    Walk(WalkRequest),
    Snapshot(Uuid),
    End(Uuid),
}

/// Raw request for parsing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawRequest {
    #[serde(default)]
    op: Option<String>,
    #[serde(default, alias = "projectId")]
    project_id: Option<String>,
    #[serde(default)]
    rules: Option<Vec<RawRule>>,
    #[serde(default, alias = "sessionId")]
    session_id: Option<String>,
    #[serde(default)]
    fact: Option<String>,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default, alias = "ruleId")]
    rule_id: Option<String>,
    #[serde(default)]
    answers: Option<Value>,
}

impl RawRequest {
    fn from_value(value: Value) -> ApiResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| ApiError::validation(format!("Invalid request body: {}", e)))
    }
}

impl Request {
    /// Parse one protocol line
    pub fn parse(json: &str) -> ApiResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| ApiError::validation(format!("Invalid JSON: {}", e)))?;
        let raw = RawRequest::from_value(value)?;
        let op = raw
            .op
            .clone()
            .ok_or_else(|| ApiError::validation("Missing op"))?;

        match op.as_str() {
            "start" => Ok(Request::Start(StartRequest::from_raw(raw)?)),
            "answer" => Ok(Request::Answer(AnswerRequest::from_raw(raw)?)),
            "walk" => Ok(Request::Walk(WalkRequest::from_raw(raw)?)),
            "snapshot" => Ok(Request::Snapshot(parse_session_id(raw.session_id)?)),
            "end" => Ok(Request::End(parse_session_id(raw.session_id)?)),
            other => Err(ApiError::UnknownOperation(other.to_string())),
        }
    }
}

impl StartRequest {
    pub fn from_value(value: Value) -> ApiResult<Self> {
        Self::from_raw(RawRequest::from_value(value)?)
    }

    fn from_raw(raw: RawRequest) -> ApiResult<Self> {
        let project_id = raw.project_id.filter(|p| !p.trim().is_empty());
        match (project_id, raw.rules) {
            (Some(_), Some(_)) => Err(ApiError::validation(
                "Provide either project_id or rules, not both",
            )),
            (Some(project_id), None) => Ok(Self {
                source: RuleSource::Project(project_id),
            }),
            (None, Some(rules)) => Ok(Self {
                source: RuleSource::Inline(rules),
            }),
            (None, None) => Err(ApiError::validation("Missing project_id")),
        }
    }
}

impl AnswerRequest {
    pub fn from_value(value: Value) -> ApiResult<Self> {
        Self::from_raw(RawRequest::from_value(value)?)
    }

    fn from_raw(raw: RawRequest) -> ApiResult<Self> {
        let session_id = parse_session_id(raw.session_id)?;
        let fact = raw
            .fact
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| ApiError::validation("Missing fact"))?;
        let value = raw
            .value
            .ok_or_else(|| ApiError::validation(format!("Missing value for '{}'", fact)))?;
        let value = parse_fact_value(&fact, value)?;

        Ok(Self {
            session_id,
            fact,
            value,
        })
    }
}

impl WalkRequest {
    pub fn from_value(value: Value) -> ApiResult<Self> {
        Self::from_raw(RawRequest::from_value(value)?)
    }

    fn from_raw(raw: RawRequest) -> ApiResult<Self> {
        let project_id = raw
            .project_id
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ApiError::validation("Missing project_id"))?;
        let rule_id = raw
            .rule_id
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| ApiError::validation("Missing rule_id"))?;
        let answers = match raw.answers {
            None | Some(Value::Null) => Answers::new(),
            Some(value) => serde_json::from_value(value).map_err(|_| {
                ApiError::validation("answers must map facts to a string or an array of strings")
            })?,
        };

        Ok(Self {
            project_id,
            rule_id,
            answers,
        })
    }
}

/// Parse a session id string
pub fn parse_session_id(raw: Option<String>) -> ApiResult<Uuid> {
    let raw = raw
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::validation("Missing session_id"))?;
    Uuid::parse_str(raw.trim())
        .map_err(|_| ApiError::validation(format!("Invalid session_id: {}", raw)))
}

fn parse_fact_value(fact: &str, value: Value) -> ApiResult<FactValue> {
    let parsed: FactValue = serde_json::from_value(value).map_err(|_| {
        ApiError::validation(format!(
            "Value for '{}' must be a string or an array of strings",
            fact
        ))
    })?;
    if parsed.is_blank() {
        return Err(ApiError::validation(format!("Missing value for '{}'", fact)));
    }
    Ok(parsed)
}
