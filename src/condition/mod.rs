//! Condition model for rulequest
//!
//! A rule's condition is a finite boolean tree over named facts.
//!
//! # Shapes
//!
//! - `Equals`: the fact's answer intersects the expected value(s)
//! - `NotIn`: none of the fact's answer values are excluded
//! - `All`: conjunction of children
//! - `Or`: disjunction of children
//!
//! # Invariants
//!
//! - Trees are acyclic and never deeper than `MAX_CONDITION_DEPTH`
//! - Fact names are compared literally (no case folding, no normalization)
//! - Scalar and set values are matched with set-intersection semantics

mod answers;
mod extract;
mod types;

pub use answers::Answers;
pub use extract::{
    collect_distinct_facts, distinct_facts, expected_values_for, extract_facts, references,
};
pub use types::{Condition, FactValue, MAX_CONDITION_DEPTH};
