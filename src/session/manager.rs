//! SessionManager: concurrent session registry backed by DashMap.

use std::sync::Arc;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::condition::FactValue;
use crate::rules::RuleSet;

use super::errors::{SessionError, SessionResult};
use super::session::{Session, SessionSnapshot};

/// Holds every live session.
///
/// Mutation goes through `DashMap::get_mut`, so two submissions to the same
/// session are applied one after the other while other sessions proceed.
#[derive(Debug)]
pub struct SessionManager {
    sessions: DashMap<Uuid, Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Start a session and return its first snapshot.
    pub fn create(&self, project_id: Option<String>, rules: Arc<RuleSet>) -> SessionSnapshot {
        let session = Session::start(project_id, rules);
        let snapshot = session.snapshot();
        self.sessions.insert(session.id, session);
        snapshot
    }

    /// Record an answer for a session.
    pub fn submit(
        &self,
        session_id: Uuid,
        fact: &str,
        value: FactValue,
    ) -> SessionResult<SessionSnapshot> {
        let mut entry = self
            .sessions
            .get_mut(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;
        entry.submit(fact, value)?;
        Ok(entry.snapshot())
    }

    pub fn snapshot(&self, session_id: Uuid) -> SessionResult<SessionSnapshot> {
        self.sessions
            .get(&session_id)
            .map(|s| s.snapshot())
            .ok_or(SessionError::NotFound(session_id))
    }

    /// Discard a session.
    pub fn remove(&self, session_id: Uuid) -> SessionResult<SessionSnapshot> {
        self.sessions
            .remove(&session_id)
            .map(|(_, s)| s.snapshot())
            .ok_or(SessionError::NotFound(session_id))
    }

    /// Drop sessions untouched for longer than `idle`. Returns how many went.
    ///
    /// A window reaching past the earliest representable time purges nothing.
    pub fn purge_idle(&self, idle: Duration) -> usize {
        let Some(cutoff) = Utc::now().checked_sub_signed(idle) else {
            return 0;
        };
        let before = self.sessions.len();
        self.sessions.retain(|_, s| s.updated_at >= cutoff);
        before.saturating_sub(self.sessions.len())
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn contains(&self, session_id: Uuid) -> bool {
        self.sessions.contains_key(&session_id)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::rules::Rule;
    use crate::scheduler::Decision;

    fn rules() -> Arc<RuleSet> {
        Arc::new(
            RuleSet::new(vec![
                Rule::new("r1", Condition::equals("a", "yes"), "A"),
                Rule::new("r2", Condition::equals("a", "no"), "B"),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_create_and_submit() {
        let manager = SessionManager::new();
        let started = manager.create(None, rules());
        assert_eq!(manager.session_count(), 1);

        let after = manager
            .submit(started.session_id, "a", FactValue::one("no"))
            .unwrap();
        assert_eq!(
            after.decision,
            Decision::Concluded {
                rule_id: "r2".into(),
                conclusion: "B".into()
            }
        );
    }

    #[test]
    fn test_unknown_session() {
        let manager = SessionManager::new();
        let id = Uuid::new_v4();
        assert_eq!(
            manager.submit(id, "a", FactValue::one("yes")).unwrap_err(),
            SessionError::NotFound(id)
        );
        assert_eq!(manager.snapshot(id).unwrap_err(), SessionError::NotFound(id));
    }

    #[test]
    fn test_remove() {
        let manager = SessionManager::new();
        let started = manager.create(Some("p".into()), rules());
        assert!(manager.remove(started.session_id).is_ok());
        assert!(!manager.contains(started.session_id));
        assert!(manager.remove(started.session_id).is_err());
    }

    #[test]
    fn test_purge_idle() {
        let manager = SessionManager::new();
        manager.create(None, rules());
        manager.create(None, rules());

        assert_eq!(manager.purge_idle(Duration::hours(1)), 0);
        assert_eq!(manager.purge_idle(Duration::seconds(-1)), 2);
        assert_eq!(manager.session_count(), 0);
    }

    #[test]
    fn test_purge_idle_with_huge_window_keeps_everything() {
        let manager = SessionManager::new();
        manager.create(None, rules());

        assert_eq!(manager.purge_idle(Duration::seconds(10_000_000_000_000)), 0);
        assert_eq!(manager.session_count(), 1);
    }
}
