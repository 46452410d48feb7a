//! First-edge walker

use serde::Serialize;

use crate::condition::Answers;

use super::graph::{Automaton, EdgeLabel, StateId};

/// Where a walk ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WalkOutcome {
    /// Reached an accepting state
    Accepted { state: StateId },
    /// Needs an answer for `fact` to go further
    Pending { fact: String, state: StateId },
    /// The answer on the current edge does not match
    Stuck { state: StateId },
}

impl WalkOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, WalkOutcome::Accepted { .. })
    }
}

/// Walk from the start state following only the first edge of each state.
///
/// No backtracking: a mismatch on the first branch of an `or` is stuck.
pub fn walk(automaton: &Automaton, answers: &Answers) -> WalkOutcome {
    let mut current = automaton.start();

    // Every step moves forward in an acyclic graph; the bound guards
    // against a malformed arena.
    for _ in 0..=automaton.len() {
        let Some(state) = automaton.state(current) else {
            return WalkOutcome::Stuck { state: current };
        };
        if state.is_final {
            return WalkOutcome::Accepted { state: current };
        }
        let Some(edge) = state.edges.first() else {
            return WalkOutcome::Stuck { state: current };
        };

        let passes = match &edge.label {
            EdgeLabel::Epsilon => true,
            EdgeLabel::Match { fact, values } => match answers.get(fact) {
                None => {
                    return WalkOutcome::Pending {
                        fact: fact.clone(),
                        state: current,
                    }
                }
                Some(answer) => answer.intersects(values),
            },
            EdgeLabel::Exclude { fact, excluded } => match answers.get(fact) {
                None => {
                    return WalkOutcome::Pending {
                        fact: fact.clone(),
                        state: current,
                    }
                }
                Some(answer) => !answer.intersects(excluded),
            },
        };

        if !passes {
            return WalkOutcome::Stuck { state: current };
        }
        current = edge.target;
    }

    WalkOutcome::Stuck { state: current }
}
