//! Accumulated answers for one inference run

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::FactValue;

/// Fact name → answer.
///
/// Sorted by fact name so serialized output is deterministic. Resubmitting a
/// fact overwrites its previous answer; nothing is ever removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers {
    values: BTreeMap<String, FactValue>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any earlier answer for the same fact.
    pub fn insert(&mut self, fact: impl Into<String>, value: impl Into<FactValue>) {
        self.values.insert(fact.into(), value.into());
    }

    pub fn get(&self, fact: &str) -> Option<&FactValue> {
        self.values.get(fact)
    }

    pub fn contains(&self, fact: &str) -> bool {
        self.values.contains_key(fact)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate answers in fact-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FactValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Answers
where
    K: Into<String>,
    V: Into<FactValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut answers = Answers::new();
        for (fact, value) in iter {
            answers.insert(fact, value);
        }
        answers
    }
}
