//! # Automaton Translator
//!
//! Compiles one condition into a small state graph and walks it against the
//! current answers. The walker only ever follows a state's first edge, so an
//! `or` whose first branch mismatches is reported as stuck even when a later
//! branch would match. The question scheduler does not use this path.

mod graph;
mod walker;

pub use graph::{translate, Automaton, Edge, EdgeLabel, State, StateId};
pub use walker::{walk, WalkOutcome};
