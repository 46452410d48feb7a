//! # Session Errors

use thiserror::Error;
use uuid::Uuid;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No session with this id (never created, ended, or purged)
    #[error("Session not found: {0}")]
    NotFound(Uuid),

    /// The session already reached a conclusion
    #[error("Session {0} is finished; start a new session")]
    Finished(Uuid),

    /// Missing or blank fact/value
    #[error("Invalid answer: {0}")]
    InvalidAnswer(String),
}

impl SessionError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            SessionError::InvalidAnswer(_) => 400,
            SessionError::NotFound(_) => 404,
            SessionError::Finished(_) => 409,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let id = Uuid::new_v4();
        assert_eq!(SessionError::NotFound(id).status_code(), 404);
        assert_eq!(SessionError::Finished(id).status_code(), 409);
        assert_eq!(SessionError::InvalidAnswer("x".into()).status_code(), 400);
    }
}
