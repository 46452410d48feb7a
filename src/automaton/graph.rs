//! Arena state graph and condition translation

use serde::Serialize;

use crate::condition::{Condition, FactValue, MAX_CONDITION_DEPTH};

/// Index into `Automaton::states`
pub type StateId = usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgeLabel {
    /// Taken unconditionally
    Epsilon,
    /// Taken when the answer shares a value with `values`
    Match { fact: String, values: FactValue },
    /// Taken when the answer shares no value with `excluded`
    Exclude { fact: String, excluded: FactValue },
}

impl EdgeLabel {
    pub fn fact(&self) -> Option<&str> {
        match self {
            EdgeLabel::Epsilon => None,
            EdgeLabel::Match { fact, .. } | EdgeLabel::Exclude { fact, .. } => Some(fact),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub label: EdgeLabel,
    pub target: StateId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct State {
    pub id: StateId,
    pub is_final: bool,
    pub edges: Vec<Edge>,
}

/// Translated condition. States live in one arena and refer to each other
/// by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Automaton {
    states: Vec<State>,
    start: StateId,
}

impl Automaton {
    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id)
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Ids of accepting states
    pub fn finals(&self) -> Vec<StateId> {
        self.states
            .iter()
            .filter(|s| s.is_final)
            .map(|s| s.id)
            .collect()
    }
}

/// Entry state plus accepting states of a partially built graph
struct Fragment {
    start: StateId,
    finals: Vec<StateId>,
}

#[derive(Default)]
struct Builder {
    states: Vec<State>,
}

impl Builder {
    fn add_state(&mut self, is_final: bool) -> StateId {
        let id = self.states.len();
        self.states.push(State {
            id,
            is_final,
            edges: Vec::new(),
        });
        id
    }

    fn connect(&mut self, from: StateId, label: EdgeLabel, target: StateId) {
        self.states[from].edges.push(Edge { label, target });
    }

    fn leaf(&mut self, label: EdgeLabel) -> Fragment {
        let start = self.add_state(false);
        let end = self.add_state(true);
        self.connect(start, label, end);
        Fragment {
            start,
            finals: vec![end],
        }
    }

    fn build(&mut self, condition: &Condition, depth: usize) -> Fragment {
        // Past the depth bound the subtree becomes a dead end.
        if depth > MAX_CONDITION_DEPTH {
            let start = self.add_state(false);
            return Fragment {
                start,
                finals: Vec::new(),
            };
        }

        match condition {
            Condition::Equals { fact, expected } => self.leaf(EdgeLabel::Match {
                fact: fact.clone(),
                values: expected.clone(),
            }),
            Condition::NotIn { fact, excluded } => self.leaf(EdgeLabel::Exclude {
                fact: fact.clone(),
                excluded: excluded.clone(),
            }),
            Condition::All(children) => {
                let mut parts = children.iter().map(|c| self.build(c, depth + 1)).collect::<Vec<_>>();
                if parts.is_empty() {
                    let only = self.add_state(true);
                    return Fragment {
                        start: only,
                        finals: vec![only],
                    };
                }
                for i in 1..parts.len() {
                    let next_start = parts[i].start;
                    let finals = std::mem::take(&mut parts[i - 1].finals);
                    for state in finals {
                        self.states[state].is_final = false;
                        self.connect(state, EdgeLabel::Epsilon, next_start);
                    }
                }
                let start = parts[0].start;
                let finals = parts.pop().map(|p| p.finals).unwrap_or_default();
                Fragment { start, finals }
            }
            Condition::Or(children) => {
                let start = self.add_state(false);
                let mut finals = Vec::new();
                for child in children {
                    let part = self.build(child, depth + 1);
                    self.connect(start, EdgeLabel::Epsilon, part.start);
                    finals.extend(part.finals);
                }
                Fragment { start, finals }
            }
        }
    }
}

/// Translate a condition into an automaton.
///
/// `equals`/`notIn` become two states joined by a labeled edge, `all`
/// chains its operands with epsilon edges (intermediate finals demoted) and
/// `or` fans out from a fresh start state.
pub fn translate(condition: &Condition) -> Automaton {
    let mut builder = Builder::default();
    let fragment = builder.build(condition, 1);
    Automaton {
        states: builder.states,
        start: fragment.start,
    }
}
