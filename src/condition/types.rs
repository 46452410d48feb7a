//! Condition and fact value types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hard upper bound on condition nesting.
///
/// The loader rejects deeper trees; the evaluator and extractor stop
/// descending past it.
pub const MAX_CONDITION_DEPTH: usize = 64;

/// A fact value: a single string or a set of strings (multi-select facts).
///
/// Serialized untagged, so `"red"` and `["red", "blue"]` are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactValue {
    /// Scalar value
    One(String),
    /// Set of values (order preserved, duplicates ignored when matching)
    Many(Vec<String>),
}

impl FactValue {
    /// Create a scalar value
    pub fn one(value: impl Into<String>) -> Self {
        FactValue::One(value.into())
    }

    /// Create a set value
    pub fn many<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FactValue::Many(values.into_iter().map(Into::into).collect())
    }

    /// All values as a slice; a scalar is a one-element slice.
    pub fn values(&self) -> &[String] {
        match self {
            FactValue::One(v) => std::slice::from_ref(v),
            FactValue::Many(vs) => vs,
        }
    }

    /// Returns true if `value` is one of this value's members
    pub fn contains(&self, value: &str) -> bool {
        self.values().iter().any(|v| v == value)
    }

    /// Returns true if the two values share at least one member.
    ///
    /// Covers all four scalar/set combinations.
    pub fn intersects(&self, other: &FactValue) -> bool {
        self.values().iter().any(|v| other.contains(v))
    }

    /// Returns true if there is nothing usable in this value.
    ///
    /// Blank scalars and sets with only blank members count as empty.
    pub fn is_blank(&self) -> bool {
        self.values().iter().all(|v| v.trim().is_empty())
    }
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactValue::One(v) => write!(f, "{}", v),
            FactValue::Many(vs) => write!(f, "[{}]", vs.join(", ")),
        }
    }
}

impl From<&str> for FactValue {
    fn from(value: &str) -> Self {
        FactValue::One(value.to_string())
    }
}

impl From<String> for FactValue {
    fn from(value: String) -> Self {
        FactValue::One(value)
    }
}

impl From<Vec<String>> for FactValue {
    fn from(values: Vec<String>) -> Self {
        FactValue::Many(values)
    }
}

/// Boolean expression over named facts.
///
/// Closed set of shapes; anything else is rejected by the rule loader before
/// it can reach evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Fact answer intersects `expected`
    Equals { fact: String, expected: FactValue },
    /// Fact answer shares nothing with `excluded`
    NotIn { fact: String, excluded: FactValue },
    /// Every child holds
    All(Vec<Condition>),
    /// At least one child holds
    Or(Vec<Condition>),
}

impl Condition {
    /// Create an equality leaf
    pub fn equals(fact: impl Into<String>, expected: impl Into<FactValue>) -> Self {
        Condition::Equals {
            fact: fact.into(),
            expected: expected.into(),
        }
    }

    /// Create an exclusion leaf
    pub fn not_in(fact: impl Into<String>, excluded: impl Into<FactValue>) -> Self {
        Condition::NotIn {
            fact: fact.into(),
            excluded: excluded.into(),
        }
    }

    /// Create a conjunction
    pub fn all(children: Vec<Condition>) -> Self {
        Condition::All(children)
    }

    /// Create a disjunction
    pub fn or(children: Vec<Condition>) -> Self {
        Condition::Or(children)
    }

    /// Returns the fact of a leaf, or None for groups
    pub fn leaf_fact(&self) -> Option<&str> {
        match self {
            Condition::Equals { fact, .. } | Condition::NotIn { fact, .. } => Some(fact),
            Condition::All(_) | Condition::Or(_) => None,
        }
    }

    /// Nesting depth of the tree; a single leaf has depth 1.
    ///
    /// Uses an explicit work stack so arbitrarily deep trees cannot exhaust
    /// the call stack while being measured.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1usize)];

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Condition::All(children) | Condition::Or(children) = node {
                stack.extend(children.iter().map(|c| (c, depth + 1)));
            }
        }

        max_depth
    }

    /// Operator name used in explanations and error messages
    pub fn op_name(&self) -> &'static str {
        match self {
            Condition::Equals { .. } => "equals",
            Condition::NotIn { .. } => "notIn",
            Condition::All(_) => "all",
            Condition::Or(_) => "or",
        }
    }
}
