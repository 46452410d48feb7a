//! Fact reference extraction
//!
//! Depth-first walks over a condition tree. `All`/`Or` contribute their
//! children in order; leaves contribute their own fact.

use std::collections::HashSet;

use super::types::{Condition, MAX_CONDITION_DEPTH};

/// Returns every fact the condition mentions, depth-first, duplicates kept.
pub fn extract_facts(condition: &Condition) -> Vec<&str> {
    let mut facts = Vec::new();
    walk(condition, 1, &mut facts);
    facts
}

fn walk<'a>(condition: &'a Condition, depth: usize, out: &mut Vec<&'a str>) {
    if depth > MAX_CONDITION_DEPTH {
        return;
    }
    match condition {
        Condition::Equals { fact, .. } | Condition::NotIn { fact, .. } => out.push(fact),
        Condition::All(children) | Condition::Or(children) => {
            for child in children {
                walk(child, depth + 1, out);
            }
        }
    }
}

/// Facts the condition mentions, first occurrence order, no duplicates.
pub fn distinct_facts(condition: &Condition) -> Vec<&str> {
    collect_distinct_facts(std::iter::once(condition))
}

/// De-duplicated facts across several conditions, preserving the order in
/// which they are first seen.
pub fn collect_distinct_facts<'a, I>(conditions: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Condition>,
{
    let mut seen = HashSet::new();
    let mut facts = Vec::new();

    for condition in conditions {
        for fact in extract_facts(condition) {
            if seen.insert(fact) {
                facts.push(fact);
            }
        }
    }

    facts
}

/// Returns true if `fact` appears anywhere in the condition
pub fn references(condition: &Condition, fact: &str) -> bool {
    extract_facts(condition).into_iter().any(|f| f == fact)
}

/// Expected values the condition's `Equals` leaves imply for `fact`.
///
/// Flattened through `All`/`Or` groups; set-valued expectations contribute
/// each member. `NotIn` leaves imply no expected value. Order of first
/// appearance, no duplicates.
pub fn expected_values_for<'a>(condition: &'a Condition, fact: &str) -> Vec<&'a str> {
    let mut values = Vec::new();
    collect_expected(condition, fact, 1, &mut values);
    values
}

fn collect_expected<'a>(
    condition: &'a Condition,
    fact: &str,
    depth: usize,
    out: &mut Vec<&'a str>,
) {
    if depth > MAX_CONDITION_DEPTH {
        return;
    }
    match condition {
        Condition::Equals { fact: f, expected } if f == fact => {
            for value in expected.values() {
                if !out.contains(&value.as_str()) {
                    out.push(value);
                }
            }
        }
        Condition::Equals { .. } | Condition::NotIn { .. } => {}
        Condition::All(children) | Condition::Or(children) => {
            for child in children {
                collect_expected(child, fact, depth + 1, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::FactValue;

    fn hero() -> Condition {
        Condition::all(vec![
            Condition::equals("runs", "yes"),
            Condition::or(vec![
                Condition::equals("cape", "yes"),
                Condition::equals("mask", "yes"),
            ]),
            Condition::not_in("villain", FactValue::many(["yes"])),
            Condition::equals("runs", "fast"),
        ])
    }

    #[test]
    fn test_extract_depth_first_with_duplicates() {
        assert_eq!(
            extract_facts(&hero()),
            vec!["runs", "cape", "mask", "villain", "runs"]
        );
    }

    #[test]
    fn test_distinct_preserves_first_seen() {
        assert_eq!(distinct_facts(&hero()), vec!["runs", "cape", "mask", "villain"]);
    }

    #[test]
    fn test_collect_across_conditions() {
        let a = Condition::all(vec![Condition::equals("x", "1"), Condition::equals("y", "1")]);
        let b = Condition::all(vec![Condition::equals("z", "1"), Condition::equals("x", "2")]);
        assert_eq!(collect_distinct_facts([&a, &b]), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_expected_values_flattened() {
        let cond = Condition::or(vec![
            Condition::equals("color", FactValue::many(["red", "blue"])),
            Condition::all(vec![Condition::equals("color", "red")]),
            Condition::not_in("color", FactValue::many(["green"])),
        ]);
        assert_eq!(expected_values_for(&cond, "color"), vec!["red", "blue"]);
        assert!(expected_values_for(&cond, "size").is_empty());
    }

    #[test]
    fn test_extraction_stops_past_depth_limit() {
        let mut cond = Condition::equals("deep", "yes");
        for _ in 0..MAX_CONDITION_DEPTH {
            cond = Condition::all(vec![cond]);
        }
        assert!(extract_facts(&cond).is_empty());
        assert!(!references(&cond, "deep"));
    }
}
