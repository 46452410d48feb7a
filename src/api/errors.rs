//! API error taxonomy
//!
//! Subsystem errors are folded into a small set of kinds, each with a
//! stable code and an HTTP status. Rule validation errors keep their own
//! `RQ_RULE_*` code.

use thiserror::Error;

use crate::rules::RuleError;
use crate::session::SessionError;
use crate::store::StoreError;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Bad or missing input; nothing was changed
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Request names an operation that does not exist
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Unknown project, rule or session
    #[error("{0}")]
    NotFound(String),

    /// Answer submitted after a terminal outcome
    #[error("{0}")]
    SessionFinished(String),

    /// Rules failed load-time validation
    #[error("{0}")]
    InvalidRuleSet(#[from] RuleError),

    /// The knowledge store could not be read
    #[error("Store error: {0}")]
    StoreIo(String),
}

impl ApiError {
    pub fn validation(reason: impl Into<String>) -> Self {
        ApiError::Validation(reason.into())
    }

    /// Stable string code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "RQ_INVALID_REQUEST",
            ApiError::UnknownOperation(_) => "RQ_UNKNOWN_OPERATION",
            ApiError::NotFound(_) => "RQ_NOT_FOUND",
            ApiError::SessionFinished(_) => "RQ_SESSION_FINISHED",
            ApiError::InvalidRuleSet(err) => err.code().code(),
            ApiError::StoreIo(_) => "RQ_STORE_IO",
        }
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) | ApiError::UnknownOperation(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::SessionFinished(_) => 409,
            ApiError::InvalidRuleSet(_) => 422,
            ApiError::StoreIo(_) => 500,
        }
    }

    /// Message without the kind prefix
    pub fn message(&self) -> String {
        match self {
            ApiError::Validation(m)
            | ApiError::UnknownOperation(m)
            | ApiError::NotFound(m)
            | ApiError::SessionFinished(m)
            | ApiError::StoreIo(m) => m.clone(),
            ApiError::InvalidRuleSet(err) => err.message().to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else {
            ApiError::StoreIo(err.to_string())
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(_) => ApiError::NotFound(err.to_string()),
            SessionError::Finished(_) => ApiError::SessionFinished(err.to_string()),
            SessionError::InvalidAnswer(reason) => ApiError::Validation(reason),
        }
    }
}
