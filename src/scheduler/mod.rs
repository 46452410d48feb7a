//! Question scheduler for rulequest
//!
//! Decides, after every answer, whether a conclusion is determined and, if
//! not, which fact to ask next.
//!
//! # Decision Flow (strict order)
//!
//! 1. Keep candidate rules whose partial evaluation is not False
//! 2. A single candidate with every fact answered concludes immediately
//! 3. Collect relevant facts across candidates, first-seen order
//! 4. Ask the first relevant fact that is unanswered or still ambiguous
//! 5. Otherwise conclude with the most specific satisfied candidate
//! 6. Otherwise no rule is satisfied
//!
//! # Invariants
//!
//! - Q1: Decisions depend only on (rule set, answers)
//! - Q2: Resubmitting an identical answer leaves the decision unchanged
//! - Q3: Total evaluation is only used once every candidate fact is answered

mod decision;
mod scheduler;

pub use decision::{Decision, NO_RULE_SATISFIED};
pub use scheduler::QuestionScheduler;
