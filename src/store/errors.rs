//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Rule not found: {0}")]
    RuleNotFound(String),

    #[error("Project {0} has no rules")]
    ProjectHasNoRules(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Malformed knowledge file: {0}")]
    Malformed(String),
}

impl StoreError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::ProjectNotFound(_)
            | StoreError::RuleNotFound(_)
            | StoreError::ProjectHasNoRules(_) => 404,
            StoreError::Io(_) | StoreError::Malformed(_) => 500,
        }
    }

    /// True for lookups that failed, as opposed to a broken store
    pub fn is_not_found(&self) -> bool {
        self.status_code() == 404
    }
}
