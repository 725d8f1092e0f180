//! CLI argument validation tests.
//!
//! Tests command-line argument parsing, validation, and error handling.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use posture_watch_core::LandmarkFrame;
use posture_watch_test_support::LandmarkFrameBuilder;
use predicates::prelude::*;

/// Command with config and data directories isolated under `home`.
fn posture_watch(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("posture-watch").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"));
    cmd
}

fn write_session(dir: &Path, frames: &[LandmarkFrame]) -> PathBuf {
    let path = dir.join("session.jsonl");
    let body: String = frames
        .iter()
        .map(|f| serde_json::to_string(f).unwrap() + "\n")
        .collect();
    fs::write(&path, body).unwrap();
    path
}

fn upright_session(dir: &Path) -> PathBuf {
    write_session(dir, &LandmarkFrameBuilder::upright().sequence(0.0, 5.0, 1.0))
}

// === Input Tests ===

#[test]
fn test_missing_input_argument() {
    let home = tempfile::tempdir().unwrap();
    posture_watch(home.path())
        .arg("watch")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("INPUT"));
}

#[test]
fn test_nonexistent_input_file() {
    let home = tempfile::tempdir().unwrap();
    posture_watch(home.path())
        .args(["watch", "/nonexistent/session.jsonl"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_empty_input_file() {
    let home = tempfile::tempdir().unwrap();
    let path = write_session(home.path(), &[]);

    posture_watch(home.path())
        .arg("watch")
        .arg(&path)
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_stdin_input() {
    let home = tempfile::tempdir().unwrap();
    let frame = serde_json::to_string(&LandmarkFrameBuilder::upright().build()).unwrap();

    let output = posture_watch(home.path())
        .args(["watch", "-"])
        .write_stdin(format!("{frame}\n{frame}\n"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 2);
}

// === Value Validation Tests ===

#[test]
fn test_invalid_format_rejected() {
    let home = tempfile::tempdir().unwrap();
    let path = upright_session(home.path());

    posture_watch(home.path())
        .arg("watch")
        .arg(&path)
        .args(["--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_threshold_must_be_positive() {
    let home = tempfile::tempdir().unwrap();
    let path = upright_session(home.path());

    posture_watch(home.path())
        .arg("watch")
        .arg(&path)
        .args(["--threshold", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a positive number of seconds"));

    posture_watch(home.path())
        .arg("watch")
        .arg(&path)
        .args(["--threshold", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid number"));
}

#[test]
fn test_zero_window_rejected() {
    let home = tempfile::tempdir().unwrap();
    let path = upright_session(home.path());

    posture_watch(home.path())
        .arg("watch")
        .arg(&path)
        .args(["--window", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1 frame"));
}

#[test]
fn test_invalid_model_output_rejected() {
    let home = tempfile::tempdir().unwrap();
    let path = upright_session(home.path());

    posture_watch(home.path())
        .arg("watch")
        .arg(&path)
        .args(["--model-output", "logits"])
        .assert()
        .failure();
}

#[test]
fn test_stats_days_must_be_positive() {
    let home = tempfile::tempdir().unwrap();
    posture_watch(home.path())
        .args(["stats", "--days", "0"])
        .assert()
        .failure();
}

// === Verbosity Tests ===

#[test]
fn test_verbosity_v() {
    let home = tempfile::tempdir().unwrap();
    let path = upright_session(home.path());

    posture_watch(home.path())
        .arg("-v")
        .arg("watch")
        .arg(&path)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("heuristic"));
}

#[test]
fn test_verbosity_vvv() {
    let home = tempfile::tempdir().unwrap();
    let path = upright_session(home.path());

    posture_watch(home.path())
        .arg("watch")
        .arg(&path)
        .arg("-vvv")
        .assert()
        .code(0);
}

#[test]
fn test_quiet_suppresses_progress() {
    let home = tempfile::tempdir().unwrap();
    let path = write_session(
        home.path(),
        &LandmarkFrameBuilder::slouched().sequence(0.0, 5.0, 1.0),
    );

    posture_watch(home.path())
        .arg("watch")
        .arg(&path)
        .args(["--threshold", "2", "--no-bell", "--quiet"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("alert").not());
}

// === Subcommand Tests ===

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    posture_watch(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("models"));
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    posture_watch(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("posture-watch"));
}

#[test]
fn test_models_path_uses_override() {
    let home = tempfile::tempdir().unwrap();
    posture_watch(home.path())
        .args(["models", "path", "--models-dir", "/opt/posture/models"])
        .assert()
        .success()
        .stdout(predicate::str::diff("/opt/posture/models\n"));
}

#[test]
fn test_models_path_default() {
    let home = tempfile::tempdir().unwrap();
    posture_watch(home.path())
        .args(["models", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("posture-watch"))
        .stdout(predicate::str::contains("models"));
}

#[test]
fn test_models_list_reports_missing_classifier() {
    let home = tempfile::tempdir().unwrap();
    posture_watch(home.path())
        .args(["models", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not installed"));
}

#[test]
fn test_stats_without_log() {
    let home = tempfile::tempdir().unwrap();
    posture_watch(home.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("No alerts recorded"));
}
