//! Property tests for condition evaluation
//!
//! Conditions and answers are drawn from a small universe of three facts
//! and three values so that random answers actually hit the conditions.

use proptest::prelude::*;

use rulequest::condition::{Answers, Condition, FactValue};
use rulequest::evaluator::{evaluate, evaluate_partial, Truth};

const FACTS: [&str; 3] = ["a", "b", "c"];
const VALUES: [&str; 3] = ["x", "y", "z"];

fn value_strategy() -> impl Strategy<Value = FactValue> {
    prop_oneof![
        prop::sample::select(VALUES.to_vec()).prop_map(|v| FactValue::one(v)),
        prop::sample::subsequence(VALUES.to_vec(), 1..=3).prop_map(|vs| FactValue::many(vs)),
    ]
}

fn leaf_strategy() -> impl Strategy<Value = Condition> {
    (prop::sample::select(FACTS.to_vec()), value_strategy(), any::<bool>()).prop_map(
        |(fact, value, positive)| {
            if positive {
                Condition::equals(fact, value)
            } else {
                Condition::not_in(fact, value)
            }
        },
    )
}

fn condition_strategy() -> impl Strategy<Value = Condition> {
    leaf_strategy().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Condition::All),
            prop::collection::vec(inner, 0..4).prop_map(Condition::Or),
        ]
    })
}

fn answers_strategy() -> impl Strategy<Value = Answers> {
    prop::collection::btree_map(prop::sample::select(FACTS.to_vec()), value_strategy(), 0..=3)
        .prop_map(|map| map.into_iter().collect())
}

fn fill_strategy() -> impl Strategy<Value = Vec<FactValue>> {
    prop::collection::vec(value_strategy(), FACTS.len())
}

/// Answer every fact `base` leaves open, keeping the given answers.
fn complete(base: &Answers, fill: &[FactValue]) -> Answers {
    let mut answers = base.clone();
    for (fact, value) in FACTS.iter().zip(fill) {
        if !answers.contains(fact) {
            answers.insert(*fact, value.clone());
        }
    }
    answers
}

// ── Monotonicity: new facts never turn a true condition false ─────────────

proptest! {
    #[test]
    fn evaluate_is_monotonic_under_new_facts(
        condition in condition_strategy(),
        base in answers_strategy(),
        fill in fill_strategy()
    ) {
        if evaluate(&condition, &base) {
            let extended = complete(&base, &fill);
            prop_assert!(
                evaluate(&condition, &extended),
                "{:?} became false after extending {:?} to {:?}",
                condition, base, extended
            );
        }
    }
}

// ── Consistency: a decided partial result survives every completion ───────

proptest! {
    #[test]
    fn decided_partial_matches_any_completion(
        condition in condition_strategy(),
        base in answers_strategy(),
        fill in fill_strategy()
    ) {
        let partial = evaluate_partial(&condition, &base);
        if partial.is_decided() {
            let total = evaluate(&condition, &complete(&base, &fill));
            prop_assert_eq!(partial.as_bool(), Some(total));
        }
    }

    #[test]
    fn fully_answered_partial_is_decided(
        condition in condition_strategy(),
        fill in fill_strategy()
    ) {
        let answers = complete(&Answers::new(), &fill);
        prop_assert_eq!(
            evaluate_partial(&condition, &answers),
            Truth::from(evaluate(&condition, &answers))
        );
    }

    #[test]
    fn evaluation_is_pure(
        condition in condition_strategy(),
        base in answers_strategy()
    ) {
        prop_assert_eq!(evaluate(&condition, &base), evaluate(&condition, &base));
        prop_assert_eq!(evaluate_partial(&condition, &base), evaluate_partial(&condition, &base));
    }
}
