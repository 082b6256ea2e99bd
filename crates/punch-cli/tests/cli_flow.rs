//! End-to-end tests driving the `punch` binary.
//!
//! Each test runs with its own HOME so no user config leaks in.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn punch_binary() -> String {
    env!("CARGO_BIN_EXE_punch").to_string()
}

/// Builds a command isolated from the caller's config and environment.
fn punch(home: &Path) -> Command {
    let mut cmd = Command::new(punch_binary());
    cmd.env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("PUNCH_JSON")
        .env_remove("RUST_LOG");
    cmd
}

/// Runs the command with `stdin` piped in.
fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn punch");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_hours_from_stdin() {
    let temp = TempDir::new().unwrap();
    let mut cmd = punch(temp.path());
    cmd.arg("hours");

    let output = run_with_stdin(cmd, "08:00 12:00 13:00 17:30\n23:50 00:10\n");
    assert!(
        output.status.success(),
        "punch hours should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ATTENDANCE: <stdin>"));
    assert!(stdout.contains("23:50-00:10+1  (20m)  0h"));
    assert!(stdout.contains("Valid days:   2"));
    assert!(stdout.contains("Total hours:  8.5"));
}

#[test]
fn test_hours_json_from_files() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("alice.txt");
    let second = temp.path().join("bob.txt");
    std::fs::write(&first, "09:00-12:05 12:20-17:00\n").unwrap();
    std::fs::write(&second, "08:00 12:00\n8:00\n").unwrap();

    let output = punch(temp.path())
        .arg("hours")
        .arg(&first)
        .arg(&second)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let reports = value.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["total_month_hours"], 7.5);
    assert_eq!(reports[0]["lines"][0]["tags"][0]["category"], "noon");
    assert_eq!(reports[1]["valid_day_count"], 1);
    assert_eq!(reports[1]["lines"][1]["status"], "error");
}

#[test]
fn test_hours_grand_total_for_several_files() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("a.txt");
    let second = temp.path().join("b.txt");
    std::fs::write(&first, "08:00 12:00\n").unwrap();
    std::fs::write(&second, "13:00 17:00\n").unwrap();

    let output = punch(temp.path())
        .args(["hours"])
        .arg(&first)
        .arg(&second)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let grand_total = stdout.split("ALL INPUTS").nth(1).unwrap();
    assert!(grand_total.contains("Inputs:       2"));
    assert!(grand_total.contains("Total hours:  8.0"));
}

#[test]
fn test_hours_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    let output = punch(temp.path())
        .arg("hours")
        .arg(temp.path().join("missing.txt"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read"));
}

#[test]
fn test_config_file_sets_json_and_window() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("punch.toml");
    std::fs::write(
        &config_path,
        "json = true\n\n[analyzer]\nadjacency_window_minutes = 90\n",
    )
    .unwrap();

    let mut cmd = punch(temp.path());
    cmd.arg("--config").arg(&config_path).arg("hours");
    let output = run_with_stdin(cmd, "09:00-12:05 13:10-17:00\n");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["lines"][0]["tags"][0]["gap_minutes"], 65);
}

#[test]
fn test_environment_overrides_config() {
    let temp = TempDir::new().unwrap();

    let mut cmd = punch(temp.path());
    cmd.env("PUNCH_JSON", "true")
        .env("PUNCH_ANALYZER__ROUNDING_STEP_MINUTES", "60")
        .arg("hours");
    let output = run_with_stdin(cmd, "08:00 10:59\n");
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total_month_hours"], 2.0);
}

#[test]
fn test_numbers_summary() {
    let temp = TempDir::new().unwrap();
    let mut cmd = punch(temp.path());
    cmd.args(["numbers", "--standard", "20"]);

    let output = run_with_stdin(cmd, "5, 5, 7\n4\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Count:     4"));
    assert!(stdout.contains("Sum:       21"));
    assert!(stdout.contains("Diff:      +1"));
}

#[test]
fn test_numbers_empty_input_fails() {
    let temp = TempDir::new().unwrap();
    let mut cmd = punch(temp.path());
    cmd.arg("numbers");

    let output = run_with_stdin(cmd, "nothing here\n");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no numbers found"));
}

#[test]
fn test_no_subcommand_prints_help() {
    let temp = TempDir::new().unwrap();
    let output = punch(temp.path()).output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage: punch"));
}
