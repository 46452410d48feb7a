//! Knowledge file loading tests

use std::fs;
use std::path::Path;
use std::sync::Arc;

use rulequest::api::{InferenceService, ServiceOptions};
use rulequest::condition::FactValue;
use rulequest::store::{JsonFileStore, KnowledgeBase, StoreError};
use serde_json::json;
use tempfile::TempDir;

fn write_store(path: &Path, value: serde_json::Value) {
    fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

fn heroes() -> serde_json::Value {
    json!({
        "projects": [{"id": "p1", "name": "Heroes", "rules": ["r1"], "facts": ["f1", "f2"], "responsibleId": "u1"}],
        "rules": [{
            "id": "r1",
            "condition": {"all": [
                {"equals": {"fact": "runs", "value": "yes"}},
                {"equals": {"fact": "cape", "value": "yes"}}
            ]},
            "conclusion": "Hero",
            "elseConclusion": "Civilian"
        }],
        "facts": [
            {"id": "f1", "name": "runs", "type": "boolean"},
            {"id": "f2", "name": "cape", "type": "select", "possibleValues": ["yes", "no", "sometimes"]}
        ],
        "responsibles": [{"id": "u1", "name": "Ana", "email": "ana@example.com"}]
    })
}

fn setup() -> (TempDir, JsonFileStore) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("knowledge.json");
    write_store(&path, heroes());
    (dir, JsonFileStore::new(path))
}

#[test]
fn test_loads_project_rules() {
    let (_dir, store) = setup();
    let rules = store.rules_for_project("p1").unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].else_conclusion.as_deref(), Some("Civilian"));
    assert_eq!(store.possible_values("cape").unwrap(), vec!["yes", "no", "sometimes"]);
    assert_eq!(store.possible_values("runs").unwrap(), vec!["yes", "no"]);
}

/// Edits to the file are visible on the next call.
#[test]
fn test_file_is_reread_per_call() {
    let (_dir, store) = setup();
    assert_eq!(store.rules_for_project("p1").unwrap()[0].conclusion, "Hero");

    let mut changed = heroes();
    changed["rules"][0]["conclusion"] = json!("Superhero");
    write_store(store.path(), changed);

    assert_eq!(store.rules_for_project("p1").unwrap()[0].conclusion, "Superhero");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("absent.json"));
    assert!(matches!(store.document(), Err(StoreError::Io(_))));
}

#[test]
fn test_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("knowledge.json");
    fs::write(&path, "{ not json").unwrap();
    let store = JsonFileStore::new(path);
    assert!(matches!(store.document(), Err(StoreError::Malformed(_))));
}

#[test]
fn test_service_runs_from_file() {
    let (_dir, store) = setup();
    let svc = InferenceService::new(Arc::new(store), ServiceOptions::default());

    let first = svc.start_session("p1").unwrap();
    assert_eq!(first.next_question.as_deref(), Some("runs"));

    let second = svc
        .submit_answer(first.session_id, "runs", FactValue::one("yes"))
        .unwrap();
    assert_eq!(second.possible_values.as_deref().map(|v| v.len()), Some(3));

    let done = svc
        .submit_answer(first.session_id, "cape", FactValue::one("no"))
        .unwrap();
    assert!(done.finished);
    assert_eq!(done.conclusion.as_deref(), Some("Civilian"));
    assert!(done.rule_id.is_none());
}

/// The unsupported `not` shape is refused when the session starts.
#[test]
fn test_unsupported_shape_rejected_at_start() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("knowledge.json");
    let mut value = heroes();
    value["rules"][0]["condition"] = json!({"not": {"equals": {"fact": "runs", "value": "no"}}});
    write_store(&path, value);

    let svc = InferenceService::new(Arc::new(JsonFileStore::new(path)), ServiceOptions::default());
    let err = svc.start_session("p1").unwrap_err();
    assert_eq!(err.status_code(), 422);
    assert_eq!(err.code(), "RQ_RULE_MALFORMED");
    assert!(err.message().contains("r1"));
}

#[test]
fn test_depth_limit_from_options() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("knowledge.json");
    let mut condition = json!({"equals": {"fact": "a", "value": "yes"}});
    for _ in 0..5 {
        condition = json!({"all": [condition]});
    }
    let mut value = heroes();
    value["rules"][0]["condition"] = condition;
    write_store(&path, value);

    let shallow = ServiceOptions {
        max_condition_depth: 3,
        ..ServiceOptions::default()
    };
    let svc = InferenceService::new(Arc::new(JsonFileStore::new(&path)), shallow);
    assert_eq!(svc.start_session("p1").unwrap_err().code(), "RQ_RULE_TOO_DEEP");

    let svc = InferenceService::new(Arc::new(JsonFileStore::new(&path)), ServiceOptions::default());
    assert!(svc.start_session("p1").is_ok());
}

#[test]
fn test_store_failure_maps_to_500() {
    let dir = TempDir::new().unwrap();
    let svc = InferenceService::new(
        Arc::new(JsonFileStore::new(dir.path().join("absent.json"))),
        ServiceOptions::default(),
    );
    let err = svc.start_session("p1").unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert_eq!(err.code(), "RQ_STORE_IO");
}
