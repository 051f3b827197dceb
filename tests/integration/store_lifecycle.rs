//! Save / load / delete lifecycle of a run directory's checkpoint

use serde_json::{json, Value};

use scan_checkpoint::checkpoints::AgentSnapshot;
use scan_checkpoint::fs::checkpoint_path;
use scan_checkpoint::CHECKPOINT_VERSION;

use super::helpers::{dir_entries, fast_store, run_dir, scan_config, write_raw_checkpoint, ScanAgentState};

#[test]
fn test_roundtrip_restores_agent_state() {
    let temp = run_dir();
    let store = fast_store();
    let mut state = ScanAgentState::at(5);
    state
        .context
        .insert("open_ports".to_string(), json!([80, 443]));
    let config = scan_config(&["a.com", "b.com"]);

    store.save(temp.path(), &state, &config, None);

    let checkpoint = store.load(temp.path()).expect("checkpoint should load");
    assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
    assert_eq!(checkpoint.scan_config, config);
    assert!(checkpoint.tracer_data.is_empty());

    let restored = ScanAgentState::from_snapshot(&checkpoint.agent_state).unwrap();
    assert_eq!(restored, state);
}

#[test]
fn test_file_layout() {
    let temp = run_dir();
    fast_store().save(temp.path(), &ScanAgentState::at(1), &scan_config(&["a.com"]), None);

    assert_eq!(dir_entries(temp.path()), vec!["checkpoint.json"]);

    let raw: Value =
        serde_json::from_str(&std::fs::read_to_string(checkpoint_path(temp.path())).unwrap())
            .unwrap();
    assert_eq!(raw["version"], 1);
    assert_eq!(raw["agent_state"]["iteration"], 1);
    assert_eq!(raw["tracer_data"], json!({}));
    assert!(raw["created_at"]
        .as_str()
        .is_some_and(|ts| chrono::DateTime::parse_from_rfc3339(ts).is_ok()));
}

#[test]
fn test_overwrite_leaves_single_file_with_latest_data() {
    let temp = run_dir();
    let store = fast_store();

    store.save(temp.path(), &ScanAgentState::at(1), &scan_config(&["a.com"]), None);
    store.save(
        temp.path(),
        &ScanAgentState::at(2),
        &scan_config(&["a.com", "b.com"]),
        None,
    );

    assert_eq!(dir_entries(temp.path()), vec!["checkpoint.json"]);
    let checkpoint = store.load(temp.path()).unwrap();
    assert_eq!(checkpoint.iteration(), 2);
    assert_eq!(checkpoint.target_count(), 2);
}

#[test]
fn test_version_gate() {
    let temp = run_dir();
    let store = fast_store();

    for version in [0, 2] {
        write_raw_checkpoint(
            temp.path(),
            &json!({
                "version": version,
                "created_at": "2025-06-01T12:00:00+00:00",
                "scan_config": {"targets": ["a.com"]},
                "agent_state": {"iteration": 1, "completed": false},
                "tracer_data": {}
            }),
        );
        assert!(store.load(temp.path()).is_none(), "version {version} accepted");
        assert!(!store.can_resume(temp.path(), &scan_config(&["a.com"])));
    }
}

#[test]
fn test_missing_agent_state_gate() {
    let temp = run_dir();
    write_raw_checkpoint(
        temp.path(),
        &json!({
            "version": 1,
            "created_at": "2025-06-01T12:00:00+00:00",
            "scan_config": {"targets": ["a.com"]}
        }),
    );

    assert!(fast_store().load(temp.path()).is_none());
}

#[test]
fn test_delete_on_empty_run_dir_changes_nothing() {
    let temp = run_dir();
    std::fs::write(temp.path().join("scan.log"), "started\n").unwrap();
    let before = dir_entries(temp.path());

    fast_store().delete(temp.path());

    assert_eq!(dir_entries(temp.path()), before);
}

#[test]
fn test_delete_removes_checkpoint_only() {
    let temp = run_dir();
    let store = fast_store();
    std::fs::write(temp.path().join("scan.log"), "started\n").unwrap();
    store.save(temp.path(), &ScanAgentState::at(3), &scan_config(&["a.com"]), None);

    store.delete(temp.path());

    assert_eq!(dir_entries(temp.path()), vec!["scan.log"]);
    assert!(store.load(temp.path()).is_none());
}

#[test]
fn test_missing_scan_config_gate() {
    let temp = run_dir();
    write_raw_checkpoint(
        temp.path(),
        &json!({
            "version": 1,
            "created_at": "2025-06-01T12:00:00+00:00",
            "agent_state": {"iteration": 2, "completed": false}
        }),
    );

    assert!(fast_store().load(temp.path()).is_none());
    assert!(!fast_store().can_resume(temp.path(), &scan_config(&[])));
}

#[test]
fn test_offsetless_timestamp_still_resumes() {
    let temp = run_dir();
    write_raw_checkpoint(
        temp.path(),
        &json!({
            "version": 1,
            "created_at": "2025-06-01T12:00:00.123456",
            "scan_config": {"targets": ["a.com"]},
            "agent_state": {"iteration": 4, "completed": false},
            "tracer_data": {}
        }),
    );

    let checkpoint = fast_store().load(temp.path()).expect("checkpoint should load");
    assert_eq!(checkpoint.iteration(), 4);
    assert!(fast_store().can_resume(temp.path(), &scan_config(&["a.com"])));
}

#[test]
fn test_null_tracer_data_still_resumes() {
    let temp = run_dir();
    write_raw_checkpoint(
        temp.path(),
        &json!({
            "version": 1,
            "created_at": "2025-06-01T12:00:00+00:00",
            "scan_config": {"targets": ["a.com"]},
            "agent_state": {"iteration": 4, "completed": false},
            "tracer_data": null
        }),
    );

    let checkpoint = fast_store().load(temp.path()).expect("checkpoint should load");
    assert!(checkpoint.tracer_data.is_empty());
    assert!(fast_store().can_resume(temp.path(), &scan_config(&["a.com"])));
}

#[test]
fn test_delete_failure_is_swallowed() {
    let temp = run_dir();
    // A non-empty directory at the checkpoint path cannot be removed as a file
    let squatter = checkpoint_path(temp.path());
    std::fs::create_dir(&squatter).unwrap();
    std::fs::write(squatter.join("entry"), "x").unwrap();

    fast_store().delete(temp.path());

    assert!(squatter.join("entry").exists());
    assert_eq!(dir_entries(temp.path()), vec!["checkpoint.json"]);
}
