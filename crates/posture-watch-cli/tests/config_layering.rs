//! Integration tests for configuration layering.
//!
//! Tests the full priority chain: hardcoded defaults < XDG config < project config < CLI args

#![allow(clippy::unwrap_used)] // Test code uses unwrap for brevity
#![allow(deprecated)] // cargo_bin deprecation warning

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

/// Twelve seconds of slouching: alerts with a 5 s threshold, not with the 30 s default.
fn slouch_session(dir: &Path) -> PathBuf {
    write_session(dir, &LandmarkFrameBuilder::slouched().sequence(0.0, 12.0, 1.0))
}

fn write_xdg_config(home: &Path, content: &str) {
    let dir = home.join("config").join("posture-watch");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), content).unwrap();
}

fn write_project_config(dir: &Path, content: &str) {
    fs::write(dir.join(".posture-watch.toml"), content).unwrap();
}

#[test]
fn test_default_threshold_does_not_alert() {
    let home = tempfile::tempdir().unwrap();
    let session = slouch_session(home.path());

    posture_watch(home.path())
        .arg("watch")
        .arg(&session)
        .arg("--no-bell")
        .assert()
        .code(0);
}

#[test]
fn test_project_config_applies_threshold() {
    let home = tempfile::tempdir().unwrap();
    let session = slouch_session(home.path());
    write_project_config(
        home.path(),
        r"
[alert]
threshold_secs = 5.0
",
    );

    posture_watch(home.path())
        .arg("watch")
        .arg(&session)
        .arg("--no-bell")
        .assert()
        .code(1);
}

#[test]
fn test_cli_overrides_project_config() {
    let home = tempfile::tempdir().unwrap();
    let session = slouch_session(home.path());
    write_project_config(
        home.path(),
        r"
[alert]
threshold_secs = 5.0

[output]
format = 'json'
",
    );

    posture_watch(home.path())
        .arg("watch")
        .arg(&session)
        .args(["--threshold", "60", "--format", "jsonl", "--no-bell"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_project_config_applies_format() {
    let home = tempfile::tempdir().unwrap();
    let session = slouch_session(home.path());
    write_project_config(
        home.path(),
        r"
[output]
format = 'json'
",
    );

    posture_watch(home.path())
        .arg("watch")
        .arg(&session)
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn test_project_config_found_in_parent() {
    let home = tempfile::tempdir().unwrap();
    let session = slouch_session(home.path());
    write_project_config(
        home.path(),
        r"
[output]
format = 'json'
",
    );
    let nested = home.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    posture_watch(home.path())
        .current_dir(&nested)
        .arg("watch")
        .arg(&session)
        .assert()
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn test_xdg_config_applies() {
    let home = tempfile::tempdir().unwrap();
    let session = slouch_session(home.path());
    write_xdg_config(
        home.path(),
        r"
[alert]
threshold_secs = 5.0
",
    );

    posture_watch(home.path())
        .arg("watch")
        .arg(&session)
        .arg("--no-bell")
        .assert()
        .code(1);
}

#[test]
fn test_project_config_overrides_xdg() {
    let home = tempfile::tempdir().unwrap();
    let session = slouch_session(home.path());
    write_xdg_config(
        home.path(),
        r"
[alert]
threshold_secs = 5.0

[output]
format = 'json'
",
    );
    write_project_config(
        home.path(),
        r"
[alert]
threshold_secs = 60.0
",
    );

    // Threshold from the project file, format still from XDG.
    posture_watch(home.path())
        .arg("watch")
        .arg(&session)
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn test_config_disables_alert_side_effects() {
    let home = tempfile::tempdir().unwrap();
    let session = slouch_session(home.path());
    let log = home.path().join("alerts.jsonl");
    write_project_config(
        home.path(),
        &format!(
            r"
[alert]
threshold_secs = 5.0
enabled = false

[log]
path = '{}'
",
            log.display()
        ),
    );

    // Alerts are still reported, but nothing is recorded.
    posture_watch(home.path())
        .arg("watch")
        .arg(&session)
        .assert()
        .code(1);
    assert!(!log.exists());
}

#[test]
fn test_config_log_path_and_label_limit() {
    let home = tempfile::tempdir().unwrap();
    let session = slouch_session(home.path());
    let log = home.path().join("alerts.jsonl");
    write_project_config(
        home.path(),
        &format!(
            r"
[alert]
threshold_secs = 5.0
user_id = 9

[log]
path = '{}'
label_max_len = 5
",
            log.display()
        ),
    );

    posture_watch(home.path())
        .arg("watch")
        .arg(&session)
        .arg("--no-bell")
        .assert()
        .code(1);

    let content = fs::read_to_string(&log).unwrap();
    let record: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert_eq!(record["label"], "Slouc");
    assert_eq!(record["user_id"], 9);
}

#[test]
fn test_invalid_config_value_warns() {
    let home = tempfile::tempdir().unwrap();
    let session = slouch_session(home.path());
    write_project_config(
        home.path(),
        r"
[output]
format = 'xml'
",
    );

    posture_watch(home.path())
        .arg("watch")
        .arg(&session)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("output.format"));
}
