//! Integration tests for the yogaplan binary.
//!
//! These tests verify end-to-end behavior including:
//! - Plan generation from flags and profile files
//! - Stored profile persistence
//! - Library listing

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("yogaplan"))
}

/// Run `plan --json` with the given extra args and parse the output
fn plan_json(data_dir: &std::path::Path, args: &[&str]) -> Value {
    let output = cli()
        .arg("plan")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--json")
        .args(args)
        .output()
        .expect("Failed to run yogaplan");
    assert!(output.status.success(), "{:?}", output);
    serde_json::from_slice(&output.stdout).expect("Plan output is not JSON")
}

fn active_days(plan: &Value) -> usize {
    plan["weekly_schedule"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|d| d["active"] == true)
        .count()
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Personalized weekly yoga and wellness plans",
        ));
}

#[test]
fn test_default_command_prints_plan() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("WEEKLY YOGA PLAN"))
        .stdout(predicate::str::contains("Monday"))
        .stdout(predicate::str::contains("Safety"));
}

#[test]
fn test_json_plan_shape() {
    let temp_dir = setup_test_dir();
    let plan = plan_json(temp_dir.path(), &["--seed", "7"]);

    assert_eq!(plan["weekly_schedule"].as_array().unwrap().len(), 7);
    assert_eq!(plan["weekly_schedule"][0]["day"], "Monday");
    assert_eq!(active_days(&plan), 4);
    assert_eq!(plan["daily_sessions"]["Sunday"]["type"], "rest");
    assert_eq!(plan["progression"]["timeline"], "6 weeks");
    assert!(!plan["safety_notes"].as_array().unwrap().is_empty());
}

#[test]
fn test_athlete_gets_six_active_days() {
    let temp_dir = setup_test_dir();
    let plan = plan_json(temp_dir.path(), &["--fitness", "Athlete", "--seed", "1"]);

    assert_eq!(active_days(&plan), 6);
    assert_eq!(plan["progression"]["blocks"].as_array().unwrap().len(), 4);
}

#[test]
fn test_same_seed_same_schedule() {
    let temp_dir = setup_test_dir();
    let args = ["--goal", "strength", "--goal", "balance", "--seed", "42"];

    let first = plan_json(temp_dir.path(), &args);
    let second = plan_json(temp_dir.path(), &args);

    assert_eq!(first["weekly_schedule"], second["weekly_schedule"]);
    assert_eq!(first["daily_sessions"], second["daily_sessions"]);
}

#[test]
fn test_hypertension_flag_adds_note() {
    let temp_dir = setup_test_dir();
    let plan = plan_json(
        temp_dir.path(),
        &["--condition", "hypertension", "--seed", "3"],
    );

    let notes: Vec<&str> = plan["safety_notes"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(
        notes
            .iter()
            .filter(|n| n.contains("keep head above heart"))
            .count(),
        1
    );
}

#[test]
fn test_profile_file_with_legacy_fields() {
    let temp_dir = setup_test_dir();
    let profile_path = temp_dir.path().join("me.json");
    fs::write(
        &profile_path,
        r#"{"age": "67", "medicalConditions": ["none"], "yogaPurpose": "better sleep"}"#,
    )
    .unwrap();

    let plan = plan_json(
        temp_dir.path(),
        &["--profile", profile_path.to_str().unwrap(), "--seed", "5"],
    );

    assert_eq!(plan["profile"]["age"], 67);
    assert_eq!(plan["profile"]["conditions"].as_array().unwrap().len(), 0);
    assert_eq!(plan["profile"]["goals"][0], "better_sleep");
    assert_eq!(plan["weekly_schedule"][0]["focus"], "better_sleep");
}

#[test]
fn test_non_record_profile_file_fails() {
    let temp_dir = setup_test_dir();
    let profile_path = temp_dir.path().join("bad.json");
    fs::write(&profile_path, "[1, 2, 3]").unwrap();

    cli()
        .arg("plan")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--profile")
        .arg(&profile_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidProfile"));
}

#[test]
fn test_profile_set_and_show() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .args(["profile", "set", "--age", "45", "--fitness", "moderate"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile saved"));

    assert!(data_dir.join("profile.json").exists());

    // A second update keeps the earlier fields
    cli()
        .args(["profile", "set", "--goal", "mindfulness"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    cli()
        .args(["profile", "show"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Age: 45"))
        .stdout(predicate::str::contains("Fitness: moderate"))
        .stdout(predicate::str::contains("Goals: mindfulness"));
}

#[test]
fn test_stored_profile_feeds_plan() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["profile", "set", "--fitness", "high"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    let stored = plan_json(temp_dir.path(), &["--seed", "2"]);
    assert_eq!(active_days(&stored), 6);

    // Flags override the stored profile for one run
    let overridden = plan_json(temp_dir.path(), &["--fitness", "low", "--seed", "2"]);
    assert_eq!(active_days(&overridden), 4);
}

#[test]
fn test_profile_show_without_stored_profile() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["profile", "show"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("defaults apply"))
        .stdout(predicate::str::contains("Age: 30"));
}

#[test]
fn test_today_json_is_a_session() {
    let temp_dir = setup_test_dir();

    let output = cli()
        .arg("today")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .args(["--json", "--seed", "9"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let session: Value = serde_json::from_slice(&output.stdout).unwrap();
    let kind = session["type"].as_str().unwrap();
    assert!(kind == "rest" || kind == "active", "{}", kind);
}

#[test]
fn test_library_listing() {
    cli()
        .arg("library")
        .assert()
        .success()
        .stdout(predicate::str::contains("Warm-up"))
        .stdout(predicate::str::contains("warrior_ii"))
        .stdout(predicate::str::contains("savasana"));
}

#[test]
fn test_library_single_category() {
    cli()
        .args(["library", "--category", "pranayama"])
        .assert()
        .success()
        .stdout(predicate::str::contains("box_breathing"))
        .stdout(predicate::str::contains("savasana").not());
}

#[test]
fn test_invalid_category_fails() {
    cli()
        .args(["library", "--category", "juggling"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category"));
}

#[test]
fn test_legacy_profile_file_overrides_stored_conditions() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["profile", "set", "--condition", "asthma", "--goal", "strength"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    let profile_path = temp_dir.path().join("legacy.json");
    fs::write(
        &profile_path,
        r#"{"medicalConditions": ["hypertension"], "yogaPurpose": "stress_relief"}"#,
    )
    .unwrap();

    let plan = plan_json(
        temp_dir.path(),
        &["--profile", profile_path.to_str().unwrap(), "--seed", "11"],
    );

    let conditions: Vec<&str> = plan["profile"]["conditions"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(conditions, vec!["hypertension"]);
    assert_eq!(plan["profile"]["goals"], serde_json::json!(["stress_relief"]));

    let plan_text = plan["daily_sessions"].to_string();
    assert!(!plan_text.contains("legs_up_the_wall"));
    assert!(!plan_text.contains("warrior_ii"));
    assert!(plan["safety_notes"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .any(|n| n.contains("keep head above heart")));
}

#[test]
fn test_stored_profile_with_string_age_is_kept() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("profile.json"),
        r#"{"age": "67", "conditions": ["hypertension"], "fitness_level": "high"}"#,
    )
    .unwrap();

    let plan = plan_json(temp_dir.path(), &["--seed", "12"]);

    assert_eq!(plan["profile"]["age"], 67);
    assert_eq!(plan["profile"]["conditions"][0], "hypertension");
    assert_eq!(active_days(&plan), 6);
}
