//! Rule error types
//!
//! Error codes:
//! - RQ_RULE_MALFORMED (REJECT)
//! - RQ_RULE_TOO_DEEP (REJECT)
//! - RQ_RULE_SET_EMPTY (REJECT)
//! - RQ_RULE_NO_FACTS (REJECT)

use std::fmt;

/// Rule-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleErrorCode {
    /// Condition shape not recognized or missing required parts
    RqRuleMalformed,
    /// Condition nested deeper than the configured limit
    RqRuleTooDeep,
    /// No rules to run
    RqRuleSetEmpty,
    /// Rules reference no facts, so nothing can be asked
    RqRuleNoFacts,
}

impl RuleErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            RuleErrorCode::RqRuleMalformed => "RQ_RULE_MALFORMED",
            RuleErrorCode::RqRuleTooDeep => "RQ_RULE_TOO_DEEP",
            RuleErrorCode::RqRuleSetEmpty => "RQ_RULE_SET_EMPTY",
            RuleErrorCode::RqRuleNoFacts => "RQ_RULE_NO_FACTS",
        }
    }

    /// Returns the invariant violated by this error
    pub fn invariant(&self) -> &'static str {
        match self {
            RuleErrorCode::RqRuleMalformed => "R1",
            RuleErrorCode::RqRuleTooDeep => "R2",
            RuleErrorCode::RqRuleSetEmpty => "R3",
            RuleErrorCode::RqRuleNoFacts => "R3",
        }
    }
}

impl fmt::Display for RuleErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Rule error with the offending rule, when known
#[derive(Debug, Clone)]
pub struct RuleError {
    code: RuleErrorCode,
    message: String,
    rule_id: Option<String>,
}

impl RuleError {
    /// Create a malformed condition error
    pub fn malformed(rule_id: impl Into<String>, reason: impl Into<String>) -> Self {
        let rule_id = rule_id.into();
        Self {
            code: RuleErrorCode::RqRuleMalformed,
            message: format!("Rule '{}': {}", rule_id, reason.into()),
            rule_id: Some(rule_id),
        }
    }

    /// Create a depth limit error
    pub fn too_deep(rule_id: impl Into<String>, limit: usize) -> Self {
        let rule_id = rule_id.into();
        Self {
            code: RuleErrorCode::RqRuleTooDeep,
            message: format!(
                "Rule '{}': condition nested deeper than {} levels",
                rule_id, limit
            ),
            rule_id: Some(rule_id),
        }
    }

    /// Create an empty rule set error
    pub fn empty_set() -> Self {
        Self {
            code: RuleErrorCode::RqRuleSetEmpty,
            message: "Rule set is empty".into(),
            rule_id: None,
        }
    }

    /// Create a no-facts error
    pub fn no_facts() -> Self {
        Self {
            code: RuleErrorCode::RqRuleNoFacts,
            message: "Rule set references no facts".into(),
            rule_id: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> RuleErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending rule id if applicable
    pub fn rule_id(&self) -> Option<&str> {
        self.rule_id.as_deref()
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REJECT] {}: {}", self.code, self.message)?;
        write!(f, " [violates {}]", self.code.invariant())
    }
}

impl std::error::Error for RuleError {}

/// Result type for rule operations
pub type RuleResult<T> = Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(RuleErrorCode::RqRuleMalformed.code(), "RQ_RULE_MALFORMED");
        assert_eq!(RuleErrorCode::RqRuleTooDeep.code(), "RQ_RULE_TOO_DEEP");
        assert_eq!(RuleErrorCode::RqRuleSetEmpty.code(), "RQ_RULE_SET_EMPTY");
        assert_eq!(RuleErrorCode::RqRuleNoFacts.code(), "RQ_RULE_NO_FACTS");
    }

    #[test]
    fn test_malformed_names_rule() {
        let err = RuleError::malformed("r7", "unrecognized condition shape 'not'");
        assert_eq!(err.rule_id(), Some("r7"));
        assert!(err.message().contains("r7"));
        assert!(err.message().contains("'not'"));
    }

    #[test]
    fn test_error_display() {
        let err = RuleError::too_deep("r1", 8);
        let display = format!("{}", err);
        assert!(display.contains("RQ_RULE_TOO_DEEP"));
        assert!(display.contains("R2"));
    }
}
