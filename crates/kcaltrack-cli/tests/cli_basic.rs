//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a throwaway data
//! directory and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against `dir` and return (stdout, stderr, code).
fn run_cli(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "kcaltrack-cli", "--"])
        .args(args)
        .env("KCALTRACK_DATA_DIR", dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn set_profile(dir: &Path) {
    let (_, stderr, code) = run_cli(
        dir,
        &[
            "profile", "set", "--age", "30", "--sex", "male", "--height-cm", "175",
            "--weight-kg", "70", "--activity", "sedentary", "--goal", "lose",
            "--rate", "0.5",
        ],
    );
    assert_eq!(code, 0, "profile set failed: {stderr}");
}

#[test]
fn test_profile_set_prints_target() {
    let dir = tempfile::tempdir().unwrap();
    set_profile(dir.path());

    let (stdout, _, code) = run_cli(dir.path(), &["profile", "target"]);
    assert_eq!(code, 0);
    let target: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let kcal = target["target_kcal"].as_f64().unwrap();
    assert!((kcal - 1534.8).abs() < 1.0, "target was {kcal}");
}

#[test]
fn test_profile_show_includes_histories() {
    let dir = tempfile::tempdir().unwrap();
    set_profile(dir.path());
    let (_, _, code) = run_cli(dir.path(), &["profile", "weight", "68.5"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(dir.path(), &["profile", "show"]);
    assert_eq!(code, 0);
    let shown: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(shown["profile"]["weight_kg"].as_f64().unwrap(), 68.5);
    assert_eq!(shown["weight_history"].as_array().unwrap().len(), 2);
}

#[test]
fn test_meal_and_exercise_roll_into_summary() {
    let dir = tempfile::tempdir().unwrap();
    set_profile(dir.path());

    let (_, stderr, code) = run_cli(
        dir.path(),
        &[
            "meal", "add", "--description", "breakfast", "--calories", "300",
            "--at", "2024-01-10T08:00:00+00:00",
        ],
    );
    assert_eq!(code, 0, "meal add failed: {stderr}");
    let (_, stderr, code) = run_cli(
        dir.path(),
        &[
            "meal", "add", "--description", "lunch", "--calories", "500",
            "--at", "2024-01-10T13:00:00+00:00",
        ],
    );
    assert_eq!(code, 0, "meal add failed: {stderr}");
    let (_, stderr, code) = run_cli(
        dir.path(),
        &[
            "exercise", "add", "--activity", "running", "--duration", "30",
            "--intensity", "high", "--at", "2024-01-10T18:00:00+00:00",
        ],
    );
    assert_eq!(code, 0, "exercise add failed: {stderr}");

    let (stdout, _, code) = run_cli(dir.path(), &["summary", "day", "2024-01-10"]);
    assert_eq!(code, 0);
    let s: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(s["calories_consumed"].as_f64().unwrap(), 800.0);
    assert_eq!(s["calories_burned"].as_f64().unwrap(), 385.0);
    assert_eq!(s["net_calories"].as_f64().unwrap(), 415.0);
}

#[test]
fn test_exercise_preview_reference_burn() {
    let dir = tempfile::tempdir().unwrap();
    set_profile(dir.path());

    let (stdout, _, code) = run_cli(
        dir.path(),
        &[
            "exercise", "preview", "--activity", "running", "--duration", "30",
            "--intensity", "high",
        ],
    );
    assert_eq!(code, 0);
    let preview: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(preview["calories_burned"].as_f64().unwrap(), 385.0);
}

#[test]
fn test_log_day_and_all() {
    let dir = tempfile::tempdir().unwrap();
    set_profile(dir.path());
    let (_, _, code) = run_cli(
        dir.path(),
        &[
            "meal", "add", "--description", "snack", "--calories", "120",
            "--at", "2024-02-01T15:00:00+00:00",
        ],
    );
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(dir.path(), &["log", "day", "2024-02-01"]);
    assert_eq!(code, 0);
    let entries: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 1);

    let (stdout, _, code) = run_cli(dir.path(), &["log", "all"]);
    assert_eq!(code, 0);
    let entries: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 1);
    assert_eq!(entries[0]["kind"].as_str().unwrap(), "meal");
}

#[test]
fn test_trend_zero_fills_every_day() {
    let dir = tempfile::tempdir().unwrap();
    set_profile(dir.path());
    let (_, _, code) = run_cli(
        dir.path(),
        &[
            "meal", "add", "--description", "only meal", "--calories", "400",
            "--at", "2024-03-02T12:00:00+00:00",
        ],
    );
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(
        dir.path(),
        &["summary", "trend", "2024-03-01", "2024-03-05", "--metric", "consumed"],
    );
    assert_eq!(code, 0);
    let series: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let points = series.as_array().unwrap();
    assert_eq!(points.len(), 5);
    assert_eq!(points[0]["value"].as_f64().unwrap(), 0.0);
    assert_eq!(points[1]["value"].as_f64().unwrap(), 400.0);
}

#[test]
fn test_period_summary() {
    let dir = tempfile::tempdir().unwrap();
    set_profile(dir.path());

    let (stdout, _, code) = run_cli(
        dir.path(),
        &["summary", "period", "2024-03-01", "2024-03-07"],
    );
    assert_eq!(code, 0);
    let s: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(s["days"].as_u64().unwrap(), 7);
}

#[test]
fn test_summary_context_shape() {
    let dir = tempfile::tempdir().unwrap();
    set_profile(dir.path());

    let (stdout, _, code) = run_cli(dir.path(), &["summary", "context"]);
    assert_eq!(code, 0);
    let ctx: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(ctx["recent_days"].as_array().unwrap().len(), 7);
    assert!(ctx["target"]["target_kcal"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_config_show_and_set() {
    let dir = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(dir.path(), &["config", "show"]);
    assert_eq!(code, 0);
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        config["summary"]["adherence_tolerance_kcal"].as_f64().unwrap(),
        200.0
    );

    let (_, _, code) = run_cli(dir.path(), &["config", "set-tolerance", "150"]);
    assert_eq!(code, 0);
    let (stdout, _, code) = run_cli(dir.path(), &["config", "show"]);
    assert_eq!(code, 0);
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        config["summary"]["adherence_tolerance_kcal"].as_f64().unwrap(),
        150.0
    );
}

#[test]
fn test_invalid_input_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    set_profile(dir.path());

    let (_, stderr, code) = run_cli(
        dir.path(),
        &[
            "exercise", "add", "--activity", "parkour", "--duration", "30",
            "--intensity", "high",
        ],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown activity"), "stderr was: {stderr}");

    let (_, _, code) = run_cli(
        dir.path(),
        &["meal", "add", "--description", "ghost", "--calories=-10"],
    );
    assert_ne!(code, 0);
}
