//! Session isolation tests
//!
//! Sessions share a rule set but never answers. Concurrent submissions to
//! different sessions must not interfere, and submissions to one session are
//! applied one at a time.

use std::sync::Arc;
use std::thread;

use rulequest::api::{InferenceService, ServiceOptions};
use rulequest::condition::FactValue;
use rulequest::rules::RawRule;
use rulequest::scheduler::Decision;
use rulequest::store::MemoryStore;
use serde_json::json;

fn rules() -> Vec<RawRule> {
    serde_json::from_value(json!([
        {"id": "hero", "condition": {"all": [
            {"equals": {"fact": "runs", "value": "yes"}},
            {"equals": {"fact": "cape", "value": "yes"}}
        ]}, "conclusion": "Hero"},
        {"id": "walker", "condition": {"equals": {"fact": "runs", "value": "no"}}, "conclusion": "Walker"}
    ]))
    .unwrap()
}

fn service() -> Arc<InferenceService> {
    Arc::new(InferenceService::new(
        Arc::new(MemoryStore::default()),
        ServiceOptions::default(),
    ))
}

#[test]
fn test_sessions_do_not_share_answers() {
    let svc = service();
    let first = svc.start_session_with_rules(&rules()).unwrap();
    let second = svc.start_session_with_rules(&rules()).unwrap();
    assert_ne!(first.session_id, second.session_id);

    svc.submit_answer(first.session_id, "runs", FactValue::one("no"))
        .unwrap();

    let untouched = svc.session_snapshot(second.session_id).unwrap();
    assert!(untouched.answers.is_empty());
    assert_eq!(
        untouched.decision,
        Decision::AwaitingAnswer {
            fact: "runs".into()
        }
    );
}

#[test]
fn test_concurrent_sessions_reach_their_own_outcomes() {
    let svc = service();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let svc = Arc::clone(&svc);
            thread::spawn(move || {
                let start = svc.start_session_with_rules(&rules()).unwrap();
                if i % 2 == 0 {
                    svc.submit_answer(start.session_id, "runs", FactValue::one("yes"))
                        .unwrap();
                    svc.submit_answer(start.session_id, "cape", FactValue::one("yes"))
                        .unwrap()
                } else {
                    svc.submit_answer(start.session_id, "runs", FactValue::one("no"))
                        .unwrap()
                }
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let step = handle.join().unwrap();
        assert!(step.finished);
        let expected = if i % 2 == 0 { "Hero" } else { "Walker" };
        assert_eq!(step.conclusion.as_deref(), Some(expected));
    }

    assert_eq!(svc.sessions().session_count(), 16);
    assert_eq!(svc.metrics().snapshot().conclusions, 16);
}

#[test]
fn test_concurrent_answers_to_one_session_are_serialized() {
    let svc = service();
    let start = svc.start_session_with_rules(&rules()).unwrap();
    let id = start.session_id;

    thread::scope(|scope| {
        for _ in 0..8 {
            let svc = &svc;
            scope.spawn(move || {
                // Once finished, later submissions are rejected; either
                // outcome is fine, corruption is not.
                let _ = svc.submit_answer(id, "runs", FactValue::one("yes"));
            });
        }
    });

    let snapshot = svc.session_snapshot(id).unwrap();
    assert_eq!(snapshot.answers.len(), 1);
    assert_eq!(snapshot.answers.get("runs"), Some(&FactValue::one("yes")));
    assert_eq!(
        snapshot.decision,
        Decision::AwaitingAnswer {
            fact: "cape".into()
        }
    );
}

#[test]
fn test_ended_session_is_gone_for_everyone() {
    let svc = service();
    let start = svc.start_session_with_rules(&rules()).unwrap();
    svc.end_session(start.session_id).unwrap();

    let err = svc
        .submit_answer(start.session_id, "runs", FactValue::one("yes"))
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}
