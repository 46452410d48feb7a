//! Inference service: the operations every transport calls into

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::automaton::{translate, walk};
use crate::condition::{Answers, FactValue};
use crate::observability::MetricsRegistry;
use crate::rules::{RawRule, RuleLoader, RuleSet};
use crate::scheduler::Decision;
use crate::session::{SessionManager, SessionSnapshot};
use crate::store::{KnowledgeBase, DEFAULT_POSSIBLE_VALUES};

use super::errors::{ApiError, ApiResult};
use super::response::{StepResponse, WalkResponse};

/// Tunables for the service
#[derive(Debug, Clone, Copy)]
pub struct ServiceOptions {
    pub max_condition_depth: usize,
    /// Sessions idle for longer are dropped on the next start
    pub session_idle: Duration,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            max_condition_depth: crate::condition::MAX_CONDITION_DEPTH,
            session_idle: Duration::hours(1),
        }
    }
}

/// Runs inference sessions against a knowledge store.
///
/// Synchronous and shareable behind an `Arc`; sessions are isolated from
/// each other by id.
#[derive(Debug)]
pub struct InferenceService {
    store: Arc<dyn KnowledgeBase>,
    sessions: SessionManager,
    loader: RuleLoader,
    metrics: Arc<MetricsRegistry>,
    session_idle: Duration,
}

impl InferenceService {
    pub fn new(store: Arc<dyn KnowledgeBase>, options: ServiceOptions) -> Self {
        Self {
            store,
            sessions: SessionManager::new(),
            loader: RuleLoader::new(options.max_condition_depth),
            metrics: Arc::new(MetricsRegistry::new()),
            session_idle: options.session_idle,
        }
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn store(&self) -> &Arc<dyn KnowledgeBase> {
        &self.store
    }

    /// Start a session over a project's rules.
    pub fn start_session(&self, project_id: &str) -> ApiResult<StepResponse> {
        self.track(self.start_project(project_id))
    }

    /// Start a session over rules supplied by the caller.
    pub fn start_session_with_rules(&self, rules: &[RawRule]) -> ApiResult<StepResponse> {
        self.track(self.start_inline(rules))
    }

    /// Record an answer and return what comes next.
    pub fn submit_answer(
        &self,
        session_id: Uuid,
        fact: &str,
        value: FactValue,
    ) -> ApiResult<StepResponse> {
        self.track(self.answer(session_id, fact, value))
    }

    pub fn session_snapshot(&self, session_id: Uuid) -> ApiResult<SessionSnapshot> {
        self.track(self.sessions.snapshot(session_id).map_err(ApiError::from))
    }

    /// Discard a session, returning its final state.
    pub fn end_session(&self, session_id: Uuid) -> ApiResult<SessionSnapshot> {
        let result = self.sessions.remove(session_id).map_err(ApiError::from);
        if result.is_ok() {
            info!(%session_id, "session ended");
        }
        self.track(result)
    }

    /// Walk one rule's automaton against the given answers.
    pub fn walk_rule(
        &self,
        project_id: &str,
        rule_id: &str,
        answers: &Answers,
    ) -> ApiResult<WalkResponse> {
        self.track(self.walk_project_rule(project_id, rule_id, answers))
    }

    fn start_project(&self, project_id: &str) -> ApiResult<StepResponse> {
        if project_id.trim().is_empty() {
            return Err(ApiError::validation("Missing project_id"));
        }
        let raws = self.store.rules_for_project(project_id)?;
        let rules = self.load(&raws)?;
        Ok(self.open(Some(project_id.to_string()), rules))
    }

    fn start_inline(&self, raws: &[RawRule]) -> ApiResult<StepResponse> {
        let rules = self.load(raws)?;
        Ok(self.open(None, rules))
    }

    fn load(&self, raws: &[RawRule]) -> ApiResult<RuleSet> {
        self.loader.load_rule_set(raws).map_err(|err| {
            warn!(code = err.code().code(), rule_id = ?err.rule_id(), "rule set rejected");
            ApiError::from(err)
        })
    }

    fn open(&self, project_id: Option<String>, rules: RuleSet) -> StepResponse {
        let purged = self.sessions.purge_idle(self.session_idle);
        if purged > 0 {
            debug!(purged, "idle sessions purged");
        }

        let snapshot = self.sessions.create(project_id, Arc::new(rules));
        self.metrics.increment_sessions_started();
        info!(
            session_id = %snapshot.session_id,
            project_id = ?snapshot.project_id,
            rules = snapshot.rule_ids.len(),
            "session started"
        );
        self.step(snapshot)
    }

    fn answer(&self, session_id: Uuid, fact: &str, value: FactValue) -> ApiResult<StepResponse> {
        let snapshot = self.sessions.submit(session_id, fact, value)?;
        self.metrics.increment_answers_accepted();
        debug!(%session_id, fact, "answer accepted");
        Ok(self.step(snapshot))
    }

    fn step(&self, snapshot: SessionSnapshot) -> StepResponse {
        let session_id = snapshot.session_id;
        let possible_values = match &snapshot.decision {
            Decision::AwaitingAnswer { fact } => {
                debug!(%session_id, fact = fact.as_str(), "question scheduled");
                Some(self.possible_values(fact))
            }
            Decision::Concluded {
                rule_id,
                conclusion,
            } => {
                self.metrics.increment_conclusions();
                info!(%session_id, rule_id = rule_id.as_str(), conclusion = conclusion.as_str(), "session concluded");
                None
            }
            Decision::NoRuleSatisfied { message } => {
                self.metrics.increment_no_rule_outcomes();
                info!(%session_id, message = message.as_str(), "no rule satisfied");
                None
            }
        };
        StepResponse::from_snapshot(snapshot, possible_values)
    }

    /// Store-declared values, the yes/no default if the store is unreadable.
    fn possible_values(&self, fact: &str) -> Vec<String> {
        self.store.possible_values(fact).unwrap_or_else(|err| {
            warn!(fact, error = %err, "possible values unavailable, using defaults");
            DEFAULT_POSSIBLE_VALUES.iter().map(|v| v.to_string()).collect()
        })
    }

    fn walk_project_rule(
        &self,
        project_id: &str,
        rule_id: &str,
        answers: &Answers,
    ) -> ApiResult<WalkResponse> {
        if project_id.trim().is_empty() {
            return Err(ApiError::validation("Missing project_id"));
        }
        if rule_id.trim().is_empty() {
            return Err(ApiError::validation("Missing rule_id"));
        }

        let raw = self.store.project_rule(project_id, rule_id)?;
        let rule = self.loader.load_rule(&raw)?;
        let automaton = translate(&rule.condition);
        let outcome = walk(&automaton, answers);

        self.metrics.increment_walks();
        debug!(project_id, rule_id, ?outcome, "automaton walked");
        Ok(WalkResponse::new(project_id, rule_id, outcome, automaton.len()))
    }

    fn track<T>(&self, result: ApiResult<T>) -> ApiResult<T> {
        if let Err(err) = &result {
            self.metrics.increment_requests_rejected();
            debug!(code = err.code(), error = %err, "request rejected");
        }
        result
    }
}
