//! End-to-end CLI tests against a generated snapshot.
//!
//! The sample snapshot holds three items (see `embargo-test-util`): one valid, one invalid, and
//! one that cannot be audited. Every run pins `--today` so embargo dates are deterministic.

use assert_cmd::Command;
use embargo_test_util::{normalize_nondeterministic, write_sample_snapshot};
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

#[allow(deprecated)]
fn embargo_cmd() -> Command {
    Command::cargo_bin("embargo-audit").expect("embargo-audit binary not found")
}

fn snapshot() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    write_sample_snapshot(dir.path());
    dir
}

fn cmd_at(root: &Path) -> Command {
    let mut cmd = embargo_cmd();
    cmd.arg("--snapshot").arg(root).args(["--today", "2024-06-01"]);
    cmd
}

fn read_json(path: &Path) -> Value {
    let text = std::fs::read_to_string(path).expect("read report");
    serde_json::from_str(&text).expect("parse report json")
}

#[test]
fn audit_fails_on_invalid_items_and_writes_report() {
    let snap = snapshot();
    let out = TempDir::new().expect("create temp dir");
    let report_path = out.path().join("report.json");
    let md_path = out.path().join("comment.md");

    cmd_at(snap.path())
        .arg("audit")
        .arg("--report-out")
        .arg(&report_path)
        .arg("--write-markdown")
        .arg("--markdown-out")
        .arg(&md_path)
        .assert()
        .code(2);

    let report = normalize_nondeterministic(read_json(&report_path));
    assert_eq!(report["schema"], "embargo.report.v1");
    assert_eq!(report["tool"]["name"], "embargo-audit");
    assert_eq!(report["tool"]["version"], "__VERSION__");
    assert_eq!(report["started_at"], "__TIMESTAMP__");
    assert_eq!(report["verdict"], "fail");
    assert_eq!(report["data"]["profile"], "strict");
    assert_eq!(report["data"]["generation"], "protected-while-embargoed");
    assert_eq!(report["data"]["audit_date"], "2024-06-01");
    assert_eq!(report["data"]["items_scanned"], 3);

    let statuses: Vec<&str> = report["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|i| i["status"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(statuses, vec!["valid", "invalid", "not_audited"]);

    let md = std::fs::read_to_string(&md_path).expect("read markdown");
    assert!(md.contains("Verdict: **FAIL**"));
    assert!(md.contains("1794/2"));
}

#[test]
fn audit_of_valid_item_passes() {
    let snap = snapshot();
    let out = TempDir::new().expect("create temp dir");
    let report_path = out.path().join("report.json");

    cmd_at(snap.path())
        .args(["--item", "1794/1", "audit", "--report-out"])
        .arg(&report_path)
        .assert()
        .success();

    let report = read_json(&report_path);
    assert_eq!(report["verdict"], "pass");
    assert_eq!(report["items"].as_array().map(Vec::len), Some(1));
}

#[test]
fn unaudited_items_exit_3() {
    let snap = snapshot();
    let out = TempDir::new().expect("create temp dir");
    let report_path = out.path().join("report.json");

    cmd_at(snap.path())
        .args(["--item", "1794/1", "--item", "1794/3", "audit", "--report-out"])
        .arg(&report_path)
        .assert()
        .code(3);

    let report = read_json(&report_path);
    assert_eq!(report["data"]["items_not_audited"], 1);
    assert!(
        report["items"][1]["failure"]
            .as_str()
            .unwrap_or_default()
            .contains("1794-3.json")
    );
}

#[test]
fn warn_profile_override_downgrades_violations() {
    let snap = snapshot();
    let out = TempDir::new().expect("create temp dir");
    let report_path = out.path().join("report.json");

    // The warn preset fails on warnings, so the run still fails; the item itself is valid.
    cmd_at(snap.path())
        .args(["--profile", "warn", "--item", "1794/2", "audit", "--report-out"])
        .arg(&report_path)
        .assert()
        .code(2);

    let report = read_json(&report_path);
    assert_eq!(report["items"][0]["status"], "valid");
    assert_eq!(report["items"][0]["findings"][0]["severity"], "warning");
}

#[test]
fn runtime_error_still_writes_report() {
    let out = TempDir::new().expect("create temp dir");
    let report_path = out.path().join("report.json");

    embargo_cmd()
        .arg("--snapshot")
        .arg(out.path().join("missing"))
        .arg("audit")
        .arg("--report-out")
        .arg(&report_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("snapshot directory does not exist"));

    let report = read_json(&report_path);
    assert_eq!(report["verdict"], "fail");
    assert_eq!(report["findings"][0]["check_id"], "tool.runtime");
    assert_eq!(report["findings"][0]["code"], "runtime_error");
}

#[test]
fn unknown_item_is_a_runtime_error() {
    let snap = snapshot();
    let out = TempDir::new().expect("create temp dir");

    cmd_at(snap.path())
        .args(["--item", "1794/999", "audit", "--report-out"])
        .arg(out.path().join("report.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1794/999"));
}

#[test]
fn md_and_annotations_render_existing_report() {
    let snap = snapshot();
    let out = TempDir::new().expect("create temp dir");
    let report_path = out.path().join("report.json");

    cmd_at(snap.path())
        .arg("audit")
        .arg("--report-out")
        .arg(&report_path)
        .assert()
        .code(2);

    embargo_cmd()
        .arg("md")
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Embargo audit report"))
        .stdout(predicate::str::contains("NOT AUDITED"));

    let output = embargo_cmd()
        .arg("annotations")
        .arg("--report")
        .arg(&report_path)
        .args(["--max", "1"])
        .output()
        .expect("run annotations");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("::error title=1794/2::[embargo.protection:not_protected]"));
}

#[test]
fn list_writes_tsv_rows() {
    let snap = snapshot();
    std::fs::write(
        snap.path().join("embargo.toml"),
        "base_url = \"https://repo.example.edu\"\n",
    )
    .expect("write config");

    cmd_at(snap.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::eq(
            "https://repo.example.edu/handle/1794/1\t1794/1\thttps://repo.example.edu/handle/1794/100\t1794/100\t2099-01-01\tT\n\
             https://repo.example.edu/handle/1794/2\t1794/2\thttps://repo.example.edu/handle/1794/100\t1794/100\t2099-01-01\tF\n",
        ));
}

#[test]
fn list_without_base_url_fails() {
    let snap = snapshot();
    cmd_at(snap.path())
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("base_url"));
}

#[test]
fn reconcile_reports_disagreements() {
    let snap = snapshot();
    cmd_at(snap.path())
        .arg("reconcile")
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "Item 1794/2 has metadata embargo of 2099-01-01 but public access of open\n",
        ))
        .stdout(predicate::str::contains("ERROR: Item 1794/3 could not be read"));
}

#[test]
fn explain_known_and_unknown() {
    embargo_cmd()
        .args(["explain", "not_protected"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remediation"));

    embargo_cmd()
        .args(["explain", "no_such_code"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown check_id or code: no_such_code"));
}

#[test]
fn schema_prints_config_schema() {
    let output = embargo_cmd().arg("schema").output().expect("run schema");
    assert!(output.status.success());
    let schema: Value = serde_json::from_slice(&output.stdout).expect("schema is json");
    assert!(schema["properties"].get("profile").is_some());
}

#[test]
fn bad_today_is_rejected_by_argument_parsing() {
    embargo_cmd()
        .args(["--today", "June 1st", "schema"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}
