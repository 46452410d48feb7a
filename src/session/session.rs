//! Session model

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::condition::{Answers, FactValue};
use crate::rules::RuleSet;
use crate::scheduler::{Decision, QuestionScheduler};

use super::errors::{SessionError, SessionResult};

/// One inference run
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session identifier
    pub id: Uuid,

    /// Project the rules were loaded from, if any
    pub project_id: Option<String>,

    rules: Arc<RuleSet>,
    answers: Answers,
    decision: Decision,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the session last accepted an answer
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Start a session and compute its first decision.
    pub fn start(project_id: Option<String>, rules: Arc<RuleSet>) -> Self {
        let decision = QuestionScheduler::new(&rules).initial();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project_id,
            rules,
            answers: Answers::new(),
            decision,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record an answer and advance the scheduler.
    ///
    /// Any fact may be answered, not only the pending one. Rejected
    /// submissions leave the session untouched.
    pub fn submit(&mut self, fact: &str, value: FactValue) -> SessionResult<&Decision> {
        if self.decision.is_terminal() {
            return Err(SessionError::Finished(self.id));
        }
        if fact.trim().is_empty() {
            return Err(SessionError::InvalidAnswer("fact is required".into()));
        }
        if value.is_blank() {
            return Err(SessionError::InvalidAnswer(format!(
                "value for '{}' is required",
                fact
            )));
        }

        self.answers.insert(fact, value);
        self.decision = QuestionScheduler::new(&self.rules).decide(&self.answers);
        self.updated_at = Utc::now();

        Ok(&self.decision)
    }

    pub fn decision(&self) -> &Decision {
        &self.decision
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn is_finished(&self) -> bool {
        self.decision.is_terminal()
    }

    /// Human-readable account of a terminal decision.
    ///
    /// Names the concluding rule and the answers its condition consumed.
    pub fn explain(&self) -> Option<String> {
        match &self.decision {
            Decision::AwaitingAnswer { .. } => None,
            Decision::Concluded {
                rule_id,
                conclusion,
            } => {
                let rule = self.rules.get(rule_id)?;
                let reasons: Vec<String> = rule
                    .facts()
                    .into_iter()
                    .filter_map(|fact| {
                        self.answers
                            .get(fact)
                            .map(|value| format!("{} = {}", fact, value))
                    })
                    .collect();
                Some(format!(
                    "Rule '{}' concluded '{}' because {}",
                    rule_id,
                    conclusion,
                    reasons.join(", ")
                ))
            }
            Decision::NoRuleSatisfied { .. } => {
                let given: Vec<String> = self
                    .answers
                    .iter()
                    .map(|(fact, value)| format!("{} = {}", fact, value))
                    .collect();
                Some(format!("No rule matched the answers: {}", given.join(", ")))
            }
        }
    }

    /// Point-in-time copy for responses
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            project_id: self.project_id.clone(),
            rule_ids: self.rules.ids().into_iter().map(String::from).collect(),
            answers: self.answers.clone(),
            decision: self.decision.clone(),
            explanation: self.explain(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Serializable view of a session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub rule_ids: Vec<String>,
    pub answers: Answers,
    pub decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::rules::Rule;

    fn hero_rules() -> Arc<RuleSet> {
        Arc::new(
            RuleSet::new(vec![Rule::new(
                "hero",
                Condition::all(vec![
                    Condition::equals("runs", "yes"),
                    Condition::equals("cape", "yes"),
                ]),
                "Hero",
            )])
            .unwrap(),
        )
    }

    #[test]
    fn test_start_asks_first_fact() {
        let session = Session::start(Some("p1".into()), hero_rules());
        assert_eq!(session.decision().pending_fact(), Some("runs"));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_finished_session_rejects_answers() {
        let mut session = Session::start(None, hero_rules());
        session.submit("runs", FactValue::one("yes")).unwrap();
        session.submit("cape", FactValue::one("yes")).unwrap();
        assert!(session.is_finished());

        let err = session.submit("cape", FactValue::one("no")).unwrap_err();
        assert_eq!(err, SessionError::Finished(session.id));
        assert_eq!(session.answers().get("cape"), Some(&FactValue::one("yes")));
    }

    #[test]
    fn test_blank_answers_leave_session_untouched() {
        let mut session = Session::start(None, hero_rules());
        assert!(matches!(
            session.submit("", FactValue::one("yes")),
            Err(SessionError::InvalidAnswer(_))
        ));
        assert!(matches!(
            session.submit("runs", FactValue::one("   ")),
            Err(SessionError::InvalidAnswer(_))
        ));
        assert!(session.answers().is_empty());
        assert_eq!(session.decision().pending_fact(), Some("runs"));
    }

    #[test]
    fn test_explanation_names_rule_and_answers() {
        let mut session = Session::start(None, hero_rules());
        assert!(session.explain().is_none());
        session.submit("runs", FactValue::one("yes")).unwrap();
        session.submit("cape", FactValue::one("yes")).unwrap();

        let explanation = session.explain().unwrap();
        assert!(explanation.contains("'hero'"));
        assert!(explanation.contains("runs = yes"));
        assert!(explanation.contains("cape = yes"));
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = Session::start(Some("p1".into()), hero_rules());
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["projectId"], "p1");
        assert_eq!(json["decision"]["state"], "awaiting_answer");
        assert_eq!(json["ruleIds"][0], "hero");
    }
}
