use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::tempdir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/december_2024.json")
}

fn cli() -> (Command, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("budget_lens_cli").unwrap();
    cmd.env("NO_COLOR", "1")
        .env("BUDGET_LENS_CONFIG", dir.path().join("config.json"));
    (cmd, dir)
}

#[test]
fn analyze_prints_terminal_report() {
    let (mut cmd, _dir) = cli();
    cmd.arg("analyze")
        .arg(fixture())
        .assert()
        .success()
        .stdout(contains("Household | 2024-12-01"))
        .stdout(contains("Dining Out"))
        .stdout(contains("Most over target"))
        .stdout(contains("Good"));
}

#[test]
fn analyze_json_is_machine_readable() {
    let (mut cmd, _dir) = cli();
    let output = cmd
        .args(["analyze", "--json"])
        .arg(fixture())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["analysis"]["total_assigned"], 2_500_000);
    assert_eq!(report["analysis"]["on_target_percentage"], 64.0);
    assert_eq!(report["analysis"]["budget_discipline_rating"], "Good");
    assert_eq!(report["categories"].as_array().map(Vec::len), Some(6));
}

#[test]
fn config_flag_changes_tolerance() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("wide.json");
    std::fs::write(&config, r#"{ "tolerance_milliunits": 200000 }"#).unwrap();

    let (mut cmd, _dir) = cli();
    let output = cmd
        .args(["analyze", "--json", "--config"])
        .arg(&config)
        .arg(fixture())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // Groceries (-150000) and Dining Out (+150000) now fall within tolerance.
    assert_eq!(report["analysis"]["on_target_count"], 4);
}

#[test]
fn explain_reports_weekly_rule() {
    let (mut cmd, _dir) = cli();
    cmd.arg("explain")
        .arg(fixture())
        .arg("gym")
        .assert()
        .success()
        .stdout(contains("Weekly Cadence"))
        .stdout(contains("$100.00"));
}

#[test]
fn explain_unknown_category_fails() {
    let (mut cmd, _dir) = cli();
    cmd.arg("explain")
        .arg(fixture())
        .arg("Nope")
        .assert()
        .failure()
        .stderr(contains("Category not found: Nope"));
}

#[test]
fn missing_snapshot_fails_with_io_error() {
    let (mut cmd, _dir) = cli();
    cmd.args(["analyze", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(contains("IO error"));
}

#[test]
fn unknown_command_fails() {
    let (mut cmd, _dir) = cli();
    cmd.arg("frobnicate")
        .assert()
        .failure()
        .stderr(contains("Unknown command `frobnicate`"));
}

#[test]
fn script_mode_runs_commands_from_stdin() {
    let (mut cmd, _dir) = cli();
    let input = format!(
        "help\nexplain \"{}\" \"Dining Out\"\nbogus\nexit\nversion\n",
        fixture().display()
    );

    cmd.write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Available commands"))
        .stdout(contains("Monthly Cadence"))
        .stdout(contains("Budget Lens v").not())
        .stderr(contains("Unknown command `bogus`"));
}

#[test]
fn config_command_prints_defaults() {
    let (mut cmd, _dir) = cli();
    cmd.arg("config")
        .assert()
        .success()
        .stdout(contains("\"tolerance_milliunits\": 1000"));
}
