//! Question scheduling over a fixed rule set

use crate::condition::{collect_distinct_facts, expected_values_for, references, Answers, FactValue};
use crate::evaluator::{evaluate, evaluate_partial, is_fully_answered, Truth};
use crate::rules::{ConflictResolver, Rule, RuleSet};

use super::decision::{Decision, NO_RULE_SATISFIED};

/// Stateless scheduler over a borrowed rule set.
///
/// All state lives in the `Answers` passed to each call, so the same
/// scheduler can serve any number of sessions sharing the rule set.
pub struct QuestionScheduler<'a> {
    rules: &'a RuleSet,
}

impl<'a> QuestionScheduler<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Decision before any answer: the first fact referenced by any rule,
    /// scanning rules in order and each condition depth-first.
    pub fn initial(&self) -> Decision {
        let first = collect_distinct_facts(self.rules.rules().iter().map(|r| &r.condition))
            .into_iter()
            .next();

        match first {
            Some(fact) => Decision::AwaitingAnswer {
                fact: fact.to_string(),
            },
            None => self.decide(&Answers::new()),
        }
    }

    /// Rules not yet ruled out by the answers
    pub fn candidates(&self, answers: &Answers) -> Vec<&'a Rule> {
        self.rules
            .rules()
            .iter()
            .filter(|rule| evaluate_partial(&rule.condition, answers) != Truth::False)
            .collect()
    }

    /// Decision after the latest answer has been recorded in `answers`.
    pub fn decide(&self, answers: &Answers) -> Decision {
        let candidates = self.candidates(answers);

        // A lone survivor with nothing left to ask is fully determined.
        if let [only] = candidates.as_slice() {
            if is_fully_answered(&only.condition, answers) {
                return concluded(only);
            }
        }

        let relevant = collect_distinct_facts(candidates.iter().map(|r| &r.condition));

        let next = relevant.into_iter().find(|fact| match answers.get(fact) {
            None => true,
            Some(answer) => is_ambiguous(&candidates, fact, answer),
        });

        if let Some(fact) = next {
            return Decision::AwaitingAnswer {
                fact: fact.to_string(),
            };
        }

        let winners: Vec<&Rule> = candidates
            .into_iter()
            .filter(|rule| evaluate(&rule.condition, answers))
            .collect();

        match ConflictResolver::pick(&winners) {
            Some(rule) => concluded(rule),
            None => Decision::NoRuleSatisfied {
                message: self
                    .rules
                    .else_conclusion()
                    .unwrap_or(NO_RULE_SATISFIED)
                    .to_string(),
            },
        }
    }
}

fn concluded(rule: &Rule) -> Decision {
    Decision::Concluded {
        rule_id: rule.id.clone(),
        conclusion: rule.conclusion.clone(),
    }
}

/// An answered fact is ambiguous when the candidates referencing it expect
/// more than one distinct value for it, or expect exactly one value the
/// answer does not contain. Such a fact is asked again.
fn is_ambiguous(candidates: &[&Rule], fact: &str, answer: &FactValue) -> bool {
    let mut expected: Vec<&str> = Vec::new();

    for rule in candidates.iter().filter(|r| references(&r.condition, fact)) {
        for value in expected_values_for(&rule.condition, fact) {
            if !expected.contains(&value) {
                expected.push(value);
            }
        }
    }

    match expected.as_slice() {
        [] => false,
        [single] => !answer.contains(single),
        _ => true,
    }
}
