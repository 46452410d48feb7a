//! Rule subsystem for rulequest
//!
//! Rules pair a condition with a conclusion. They arrive as raw JSON from the
//! knowledge store and are converted into typed conditions by the loader.
//!
//! # Design Principles
//!
//! - Unrecognized condition shapes are rejected at load time (R1)
//! - Condition depth is bounded at load time (R2)
//! - A rule set is non-empty and references at least one fact (R3)
//! - Rules are immutable once loaded
//! - Conflicts between simultaneously true rules resolve by specificity,
//!   then declaration order

mod errors;
mod loader;
mod resolver;
mod types;

pub use errors::{RuleError, RuleErrorCode, RuleResult};
pub use loader::{RawRule, RuleLoader};
pub use resolver::ConflictResolver;
pub use types::{Rule, RuleSet};
