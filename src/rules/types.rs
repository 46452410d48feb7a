//! Rule and rule set types

use crate::condition::{collect_distinct_facts, distinct_facts, Condition};

use super::errors::{RuleError, RuleResult};

/// A condition paired with what it concludes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Stable rule identifier
    pub id: String,
    pub condition: Condition,
    pub conclusion: String,
    /// Surfaced when a session ends without any satisfied rule
    pub else_conclusion: Option<String>,
}

impl Rule {
    /// Create a rule without an else-conclusion
    pub fn new(
        id: impl Into<String>,
        condition: Condition,
        conclusion: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            condition,
            conclusion: conclusion.into(),
            else_conclusion: None,
        }
    }

    /// Attach an else-conclusion
    pub fn with_else(mut self, else_conclusion: impl Into<String>) -> Self {
        self.else_conclusion = Some(else_conclusion.into());
        self
    }

    /// Number of distinct facts the condition references
    pub fn specificity(&self) -> usize {
        distinct_facts(&self.condition).len()
    }

    /// Distinct facts in first-seen order
    pub fn facts(&self) -> Vec<&str> {
        distinct_facts(&self.condition)
    }
}

/// Ordered, validated rules for one inference run.
///
/// Guaranteed non-empty and to reference at least one fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Wrap rules, rejecting empty sets and sets without facts.
    ///
    /// Conditions are assumed to be well-formed already; use `RuleLoader`
    /// to check shapes and depth.
    pub fn new(rules: Vec<Rule>) -> RuleResult<Self> {
        if rules.is_empty() {
            return Err(RuleError::empty_set());
        }
        if collect_distinct_facts(rules.iter().map(|r| &r.condition)).is_empty() {
            return Err(RuleError::no_facts());
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Find a rule by id
    pub fn get(&self, rule_id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == rule_id)
    }

    /// Rule ids in declaration order
    pub fn ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id.as_str()).collect()
    }

    /// First else-conclusion in declaration order
    pub fn else_conclusion(&self) -> Option<&str> {
        self.rules.iter().find_map(|r| r.else_conclusion.as_deref())
    }
}
