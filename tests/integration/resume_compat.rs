//! Resume compatibility decisions

use serde_json::{json, Map, Value};

use scan_checkpoint::ResumeDecision;

use super::helpers::{fast_store, run_dir, scan_config, ScanAgentState};

#[test]
fn test_resume_with_different_target_of_same_count() {
    let temp = run_dir();
    let store = fast_store();

    let mut state = Map::new();
    state.insert("iteration".to_string(), json!(5));
    state.insert("completed".to_string(), json!(false));
    let saved_config = match json!({"targets": ["a.com"]}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };
    store.save(temp.path(), &state, &saved_config, None);

    let current = match json!({"targets": ["b.com"]}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };
    assert!(store.can_resume(temp.path(), &current));
}

#[test]
fn test_target_count_gate() {
    let temp = run_dir();
    let store = fast_store();
    store.save(
        temp.path(),
        &ScanAgentState::at(4),
        &scan_config(&["a.com", "b.com", "c.com"]),
        None,
    );

    assert!(!store.can_resume(temp.path(), &scan_config(&["a.com", "b.com"])));
    assert_eq!(
        store.resume_decision(temp.path(), &scan_config(&["a.com", "b.com"])),
        ResumeDecision::TargetCountMismatch {
            saved: 3,
            current: 2
        }
    );

    store.save(
        temp.path(),
        &ScanAgentState::at(4),
        &scan_config(&["a.com", "b.com"]),
        None,
    );
    assert!(store.can_resume(temp.path(), &scan_config(&["x.com", "y.com"])));
}

#[test]
fn test_completed_run_gate() {
    let temp = run_dir();
    let store = fast_store();
    let config = scan_config(&["a.com"]);

    store.save(temp.path(), &ScanAgentState::at(12).finished(), &config, None);

    assert!(store.load(temp.path()).is_some());
    assert!(!store.can_resume(temp.path(), &config));
    assert_eq!(
        store.resume_decision(temp.path(), &config),
        ResumeDecision::AlreadyCompleted
    );
}

#[test]
fn test_fresh_run_is_not_resumable() {
    let temp = run_dir();
    assert_eq!(
        fast_store().resume_decision(temp.path(), &scan_config(&["a.com"])),
        ResumeDecision::NoCheckpoint
    );
}

#[test]
fn test_resumable_reports_iteration() {
    let temp = run_dir();
    let store = fast_store();
    let mut tracer = Map::new();
    tracer.insert("run_id".to_string(), json!("run-42"));

    store.save(
        temp.path(),
        &ScanAgentState::at(8),
        &scan_config(&["a.com"]),
        Some(&tracer),
    );

    assert_eq!(
        store.resume_decision(temp.path(), &scan_config(&["a.com"])),
        ResumeDecision::Resumable { iteration: 8 }
    );
}
