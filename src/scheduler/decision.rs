//! Scheduler output states

use serde::Serialize;

/// Message used when no rule is satisfied and none declares an
/// else-conclusion.
pub const NO_RULE_SATISFIED: &str = "no rule satisfied";

/// What the scheduler wants next
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Decision {
    /// Ask this fact
    AwaitingAnswer { fact: String },
    /// A rule fired
    Concluded {
        #[serde(rename = "ruleId")]
        rule_id: String,
        conclusion: String,
    },
    /// Every candidate was ruled out; not an error
    NoRuleSatisfied { message: String },
}

impl Decision {
    /// Returns true for `Concluded` and `NoRuleSatisfied`
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Decision::AwaitingAnswer { .. })
    }

    pub fn pending_fact(&self) -> Option<&str> {
        match self {
            Decision::AwaitingAnswer { fact } => Some(fact),
            _ => None,
        }
    }

    /// The terminal text: the conclusion or the no-rule message
    pub fn outcome_text(&self) -> Option<&str> {
        match self {
            Decision::AwaitingAnswer { .. } => None,
            Decision::Concluded { conclusion, .. } => Some(conclusion),
            Decision::NoRuleSatisfied { message } => Some(message),
        }
    }
}
