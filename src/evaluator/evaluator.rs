//! Condition evaluation against accumulated answers
//!
//! Exact, literal matching only. No coercion, no case folding.

use crate::condition::{extract_facts, Answers, Condition, FactValue, MAX_CONDITION_DEPTH};

use super::truth::Truth;

/// Total evaluation.
///
/// Assumes every referenced fact is answered. An absent fact makes its
/// `Equals`/`NotIn` leaf false rather than failing, which differs from
/// `evaluate_partial`. Subtrees past the depth limit evaluate to false.
pub fn evaluate(condition: &Condition, answers: &Answers) -> bool {
    evaluate_at(condition, answers, 1)
}

fn evaluate_at(condition: &Condition, answers: &Answers, depth: usize) -> bool {
    if depth > MAX_CONDITION_DEPTH {
        return false;
    }
    match condition {
        Condition::Equals { fact, expected } => answers
            .get(fact)
            .map_or(false, |answer| equals_match(expected, answer)),
        Condition::NotIn { fact, excluded } => answers
            .get(fact)
            .map_or(false, |answer| not_in_match(excluded, answer)),
        Condition::All(children) => children
            .iter()
            .all(|child| evaluate_at(child, answers, depth + 1)),
        Condition::Or(children) => children
            .iter()
            .any(|child| evaluate_at(child, answers, depth + 1)),
    }
}

/// Three-valued evaluation.
///
/// Unanswered facts yield `Unknown`; groups combine with Kleene AND/OR.
/// Subtrees past the depth limit yield `Unknown`.
pub fn evaluate_partial(condition: &Condition, answers: &Answers) -> Truth {
    evaluate_partial_at(condition, answers, 1)
}

fn evaluate_partial_at(condition: &Condition, answers: &Answers, depth: usize) -> Truth {
    if depth > MAX_CONDITION_DEPTH {
        return Truth::Unknown;
    }
    match condition {
        Condition::Equals { fact, expected } => match answers.get(fact) {
            Some(answer) => Truth::from(equals_match(expected, answer)),
            None => Truth::Unknown,
        },
        Condition::NotIn { fact, excluded } => match answers.get(fact) {
            Some(answer) => Truth::from(not_in_match(excluded, answer)),
            None => Truth::Unknown,
        },
        Condition::All(children) => Truth::all(
            children
                .iter()
                .map(|child| evaluate_partial_at(child, answers, depth + 1)),
        ),
        Condition::Or(children) => Truth::any(
            children
                .iter()
                .map(|child| evaluate_partial_at(child, answers, depth + 1)),
        ),
    }
}

/// Returns true if every fact the condition references has an answer
pub fn is_fully_answered(condition: &Condition, answers: &Answers) -> bool {
    extract_facts(condition)
        .into_iter()
        .all(|fact| answers.contains(fact))
}

/// Set-intersection match between expected and given values
fn equals_match(expected: &FactValue, answer: &FactValue) -> bool {
    expected.intersects(answer)
}

/// True iff none of the answer's values are excluded
fn not_in_match(excluded: &FactValue, answer: &FactValue) -> bool {
    !excluded.intersects(answer)
}
