//! rulequest - adaptive rule-inference question engine
//!
//! Given a set of rules whose conditions reference named facts, asks for
//! one fact at a time, choosing each question so that it can still change
//! the outcome, and stops as soon as a rule's conclusion is certain or no
//! rule can be satisfied.
//!
//! Layers, bottom up: `condition` (types and fact extraction), `evaluator`
//! (two- and three-valued evaluation), `rules` (loading and conflict
//! resolution), `scheduler` (next question or outcome), `session`,
//! `automaton` (alternate first-edge walker), `store`, `api`, and the
//! `http_server`/`cli` transports.

pub mod api;
pub mod automaton;
pub mod cli;
pub mod condition;
pub mod evaluator;
pub mod http_server;
pub mod observability;
pub mod rules;
pub mod scheduler;
pub mod session;
pub mod store;
