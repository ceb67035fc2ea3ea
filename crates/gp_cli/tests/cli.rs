//! End-to-end runs of the `gp` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SCHEME: &str = r#"{
  "target": 96.6,
  "weights": {
    "exam": 80, "final": 10,
    "attendance1": 1, "attendance2": 1, "attendance3": 1, "attendance4": 1, "attendance5": 1,
    "attendance6": 1, "attendance7": 1, "attendance8": 1, "attendance9": 1, "attendance10": 1
  },
  "completed": { "exam": 100 }
}"#;

fn scenario(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let p = dir.path().join(name);
    fs::write(&p, body).unwrap();
    p
}

fn gp(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gp").unwrap();
    cmd.current_dir(cwd)
        .env_remove("RUST_LOG")
        .env_remove("GP_LOG_LEVEL")
        .env_remove("GP_DEFAULT_POLICY");
    cmd
}

#[test]
fn plans_to_stdout() {
    let dir = TempDir::new().unwrap();
    let s = scenario(&dir, "s.json", SCHEME);
    gp(dir.path())
        .args(["--scenario", s.to_str().unwrap(), "--policy", "proportional"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"planned\""))
        .stdout(predicate::str::contains("\"policy\": \"proportional\""))
        .stderr(predicate::str::contains("plan: projected 96.60"));
}

#[test]
fn writes_canonical_file() {
    let dir = TempDir::new().unwrap();
    let s = scenario(&dir, "s.json", SCHEME);
    let out = dir.path().join("plans").join("run.json");
    gp(dir.path())
        .args(["--scenario", s.to_str().unwrap(), "--out", out.to_str().unwrap(), "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with(r#"{"outcome":{"detail":{"binary":"#));
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v["policy"], "equal");
    assert_eq!(v["outcome"]["detail"]["binary"]["must_pass"], 7);
}

#[test]
fn env_default_policy_applies() {
    let dir = TempDir::new().unwrap();
    let s = scenario(&dir, "s.json", SCHEME);
    gp(dir.path())
        .env("GP_DEFAULT_POLICY", "custom")
        .args(["--scenario", s.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"policy\": \"proportional\""));
}

#[test]
fn bad_env_policy_is_validation_error() {
    let dir = TempDir::new().unwrap();
    let s = scenario(&dir, "s.json", SCHEME);
    gp(dir.path())
        .env("GP_DEFAULT_POLICY", "fastest")
        .args(["--scenario", s.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("GP_DEFAULT_POLICY"));
}

#[test]
fn grade_flag_overrides_target() {
    let dir = TempDir::new().unwrap();
    let s = scenario(&dir, "s.json", SCHEME);
    gp(dir.path())
        .args(["--scenario", s.to_str().unwrap(), "--grade", "B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"target\": 83.0"));
}

#[test]
fn infeasible_exits_3_with_outcome() {
    let dir = TempDir::new().unwrap();
    let s = scenario(
        &dir,
        "s.json",
        r#"{"target": 50, "weights": {"midterm": 60, "final": 40}, "completed": {"midterm": 0}}"#,
    );
    gp(dir.path())
        .args(["--scenario", s.to_str().unwrap()])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("\"status\": \"infeasible\""))
        .stderr(predicate::str::contains("unreachable"));
}

#[test]
fn out_of_range_score_exits_2() {
    let dir = TempDir::new().unwrap();
    let s = scenario(&dir, "s.json", r#"{"target": 50, "weights": {"a": 100}, "completed": {"a": 140}}"#);
    gp(dir.path())
        .args(["--scenario", s.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("/completed/a"));
}

#[test]
fn negative_weight_exits_2() {
    let dir = TempDir::new().unwrap();
    let s = scenario(&dir, "s.json", r#"{"target": 50, "weights": {"a": 110, "b": -10}}"#);
    gp(dir.path())
        .args(["--scenario", s.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("NegativeWeight"));
}

#[test]
fn missing_target_exits_2() {
    let dir = TempDir::new().unwrap();
    let s = scenario(&dir, "s.json", r#"{"weights": {"a": 100}}"#);
    gp(dir.path())
        .args(["--scenario", s.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no target"));
}

#[test]
fn validate_only_does_not_plan() {
    let dir = TempDir::new().unwrap();
    let s = scenario(&dir, "s.json", SCHEME);
    gp(dir.path())
        .args(["--scenario", s.to_str().unwrap(), "--validate-only"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("validate-only: inputs OK"));
}

#[test]
fn missing_scenario_file_exits_2() {
    let dir = TempDir::new().unwrap();
    gp(dir.path())
        .args(["--scenario", "nope.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn remote_out_path_rejected() {
    let dir = TempDir::new().unwrap();
    let s = scenario(&dir, "s.json", SCHEME);
    gp(dir.path())
        .args(["--scenario", s.to_str().unwrap(), "--out", "https://example.org/run.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must be local"));
}

#[test]
fn bad_log_filter_exits_2() {
    let dir = TempDir::new().unwrap();
    let s = scenario(&dir, "s.json", SCHEME);
    gp(dir.path())
        .args(["--scenario", s.to_str().unwrap(), "--log-level", "gp=loud"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid log level/filter 'gp=loud'"));
}
