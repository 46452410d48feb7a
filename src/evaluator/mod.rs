//! Three-valued evaluator for rulequest
//!
//! Two evaluation modes over the same condition tree:
//!
//! - `evaluate`: total, boolean. An unanswered fact makes its leaf false.
//! - `evaluate_partial`: three-valued. An unanswered fact makes its leaf
//!   `Unknown`, and groups propagate monotonically.
//!
//! # Invariants
//!
//! - E1: A decided partial result (`True`/`False`) never contradicts the total
//!   result once every referenced fact is answered
//! - E2: Total evaluation is monotonic under answers for new facts
//! - E3: Both modes are pure functions of (condition, answers)
//!
//! Scheduling decisions go through `evaluate_partial`; `evaluate` is only
//! consulted after the caller has confirmed every referenced fact is answered.

mod evaluator;
mod truth;

pub use evaluator::{evaluate, evaluate_partial, is_fully_answered};
pub use truth::Truth;
