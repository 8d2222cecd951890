//! End-to-end CLI tests driving the `anvil` binary against scratch plugins.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn anvil() -> Command {
    Command::cargo_bin("anvil").unwrap()
}

#[cfg(unix)]
fn write_script(plugin_root: &Path, rel: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = plugin_root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
}

fn write_case(plugin_root: &Path, case_name: &str, json: &str) {
    let case_dir = plugin_root.join("fixtures/hooks").join(case_name);
    std::fs::create_dir_all(&case_dir).unwrap();
    std::fs::write(case_dir.join("case.json"), json).unwrap();
}

#[test]
fn test_check_missing_path_is_fatal() {
    anvil()
        .args(["check", "/nonexistent/anvil-target"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_check_json_report_on_empty_plugin() {
    let dir = tempfile::tempdir().unwrap();
    let output = anvil()
        .args(["check", "--json"])
        .arg(dir.path())
        // Pin the consistency rule's workspace detection to the scratch dir.
        .env("FABRICA_ROOT", dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout must be the JSON report");
    assert_eq!(report["tool"], "anvil");
    assert_eq!(report["exit_code"], 1);
    assert!(report["summary"]["error"].as_u64().unwrap() > 0);

    let check_ids: Vec<&str> = report["findings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["check_id"].as_str().unwrap())
        .collect();
    assert!(check_ids.contains(&"structure.no_claude_plugin"));
    assert!(check_ids.contains(&"schema.no_manifest"));
    assert!(check_ids.contains(&"install_docs.no_readme"));
}

#[test]
fn test_check_human_report_groups_by_severity() {
    let dir = tempfile::tempdir().unwrap();
    anvil()
        .arg("check")
        .arg(dir.path())
        .env("FABRICA_ROOT", dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("ERROR"))
        .stdout(predicate::str::contains("[structure.no_claude_plugin]"))
        .stdout(predicate::str::contains("findings:"));
}

#[test]
fn test_test_without_fixtures_reports_none_and_passes() {
    let dir = tempfile::tempdir().unwrap();
    anvil()
        .arg("test")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No hook test fixtures found."));
}

#[cfg(unix)]
#[test]
fn test_test_tally_counts_mixed_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "hooks/ok.sh", "exit 0");
    write_case(
        dir.path(),
        "a-passes",
        r#"{"hook_script": "hooks/ok.sh", "expected": {"exit_code": 0}}"#,
    );
    write_case(
        dir.path(),
        "b-fails",
        r#"{"hook_script": "hooks/ok.sh", "expected": {"exit_code": 3}}"#,
    );

    anvil()
        .arg("test")
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[PASS] a-passes: PASS"))
        .stdout(predicate::str::contains(
            "[FAIL] b-fails: exit_code expected 3, got 0",
        ))
        .stdout(predicate::str::contains("2 tests: 1 passed, 1 failed"));
}

#[cfg(unix)]
#[test]
fn test_test_timeout_does_not_stop_later_fixtures() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "hooks/hang.sh", "sleep 30");
    write_script(dir.path(), "hooks/ok.sh", "exit 0");
    write_case(
        dir.path(),
        "a-hangs",
        r#"{"hook_script": "hooks/hang.sh", "timeout_seconds": 1}"#,
    );
    write_case(
        dir.path(),
        "b-runs",
        r#"{"hook_script": "hooks/ok.sh", "expected": {"exit_code": 0}}"#,
    );

    anvil()
        .arg("test")
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("timed out after 1s"))
        .stdout(predicate::str::contains("[PASS] b-runs: PASS"))
        .stdout(predicate::str::contains("2 tests: 1 passed, 1 failed"));
}
