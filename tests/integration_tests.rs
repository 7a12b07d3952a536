//! Integration tests for the buildcrew CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a buildcrew command isolated from the user's config
fn buildcrew(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("buildcrew").unwrap();
    cmd.current_dir(tmp.path())
        .env("HOME", tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("xdg"))
        .env_remove("BUILDCREW_PROFILE")
        .env_remove("BUILDCREW_UNIT")
        .env_remove("RUST_LOG");
    cmd
}

const STEEL_REQUEST: &str = r#"
title: Rebar L2
work_type: steel
geometry:
  rebar_mass: 1000
solve:
  mode: duration
  crew:
    special: 1
    special2: 1
    labor: 1
"#;

const MASONRY_REQUEST: &str = r#"
title: Perimeter wall
project_type: Bungalow
start_date: 2026-12-28
work_type: masonry
geometry:
  wall_length: 10
  wall_height: 3
  area_of_window: 2
  area_of_door: 1
solve:
  mode: crew
  duration_days: 2
"#;

fn write_request(tmp: &TempDir, name: &str, content: &str) {
    let path = tmp.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("duration"))
        .stdout(predicate::str::contains("crew"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("buildcrew"));
}

#[test]
fn test_unknown_work_type_rejected() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["duration", "plumbing", "--labor", "1"])
        .assert()
        .failure();
}

// ============================================================================
// Estimate Command Tests
// ============================================================================

#[test]
fn test_duration_steel() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args([
            "duration",
            "steel",
            "--rebar-mass",
            "1000",
            "--special",
            "1",
            "--special2",
            "1",
            "--labor",
            "1",
            "-f",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"duration_days\": 6"))
        .stdout(predicate::str::contains("\"quantity_unit\": \"kg\""));
}

#[test]
fn test_duration_all_risks_adds_eighteen_days() {
    let tmp = TempDir::new().unwrap();
    // 5.35 days of work plus 18 days of delay
    buildcrew(&tmp)
        .args([
            "duration",
            "steel",
            "--rebar-mass",
            "1000",
            "--special",
            "1",
            "--special2",
            "1",
            "--labor",
            "1",
            "--all-risks",
            "-f",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"delay_days\": 18"))
        .stdout(predicate::str::contains("\"duration_days\": 24"));
}

#[test]
fn test_duration_auto_summary() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args([
            "duration",
            "steel",
            "--rebar-mass",
            "1000",
            "--special",
            "1",
            "--special2",
            "1",
            "--labor",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Steel Works"))
        .stdout(predicate::str::contains("6 days"));
}

#[test]
fn test_duration_without_crew_fails() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["duration", "roof", "--roof-area", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Insufficient crew"));
}

#[test]
fn test_duration_missing_geometry_fails() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["duration", "concrete", "--width", "4", "--labor", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("length"));
}

#[test]
fn test_duration_rejects_foreign_sub_variant() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args([
            "duration",
            "tile",
            "--sub-variant",
            "footing",
            "--width",
            "3",
            "--height",
            "2",
            "--labor",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported work type"));
}

#[test]
fn test_crew_steel_csv() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["crew", "steel", "--rebar-mass", "1000", "--days", "6", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("name,work_type,sub_variant"))
        .stdout(predicate::str::contains(
            "Steel Works,steel,,solve-crew,1000,kg,0,6,1,1,2,",
        ));
}

#[test]
fn test_crew_zero_days_fails() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["crew", "steel", "--rebar-mass", "1000", "--days", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn test_crew_negative_days_fails() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["crew", "steel", "--rebar-mass", "1000", "--days", "-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn test_crew_huge_quantity_fails_cleanly() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["crew", "steel", "--rebar-mass", "1e300", "--days", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_duration_huge_quantity_fails_cleanly() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args([
            "duration",
            "steel",
            "--rebar-mass",
            "1e300",
            "--special",
            "1",
            "--special2",
            "1",
            "--labor",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Estimated duration is out of range"));
}

#[test]
fn test_crew_two_role_roof() {
    let tmp = TempDir::new().unwrap();
    // 96 m² in 3 days at 8 m²/day: 4 per role, foreman halved to 2
    buildcrew(&tmp)
        .args([
            "--profile",
            "two-role",
            "crew",
            "roof",
            "--roof-area",
            "96",
            "--days",
            "3",
            "-f",
            "tsv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Roof Works\troof\t\tsolve-crew\t96\tm²\t0\t3\t2\t4\t4\t",
        ));
}

#[test]
fn test_crew_start_date_gives_completion() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args([
            "crew",
            "tile",
            "--width",
            "3",
            "--height",
            "2",
            "--days",
            "10",
            "--start-date",
            "2026-12-28",
            "-f",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"expected_completion\": \"2027-01-07\""));
}

#[test]
fn test_markdown_output() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["crew", "steel", "--rebar-mass", "500", "--days", "2", "-f", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| name"))
        .stdout(predicate::str::contains("| Steel Works"));
}

// ============================================================================
// Run Command Tests
// ============================================================================

#[test]
fn test_run_directory() {
    let tmp = TempDir::new().unwrap();
    write_request(&tmp, "jobs/rebar.request.yaml", STEEL_REQUEST);
    write_request(&tmp, "jobs/block-a/wall.request.yaml", MASONRY_REQUEST);
    write_request(&tmp, "jobs/notes.yaml", "not: a request");

    // Wall: 30 - 3 = 27 m² in 2 days -> 2 foremen, 1 skilled, 2 unskilled
    buildcrew(&tmp)
        .args(["run", "jobs", "-f", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Perimeter wall\tmasonry\t\tsolve-crew\t27\tm²\t0\t2\t2\t1\t2\t2026-12-30",
        ))
        .stdout(predicate::str::contains(
            "Rebar L2\tsteel\t\tsolve-duration\t1000\tkg\t0\t6\t1\t1\t1\t",
        ));
}

#[test]
fn test_run_json_list() {
    let tmp = TempDir::new().unwrap();
    write_request(&tmp, "a.request.yaml", STEEL_REQUEST);
    write_request(&tmp, "b.request.yaml", MASONRY_REQUEST);

    let output = buildcrew(&tmp)
        .args(["run", ".", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().map(|a| a.len()), Some(2));
    assert_eq!(value[1]["chb_width"], 4.0);
}

#[test]
fn test_run_invalid_file_fails() {
    let tmp = TempDir::new().unwrap();
    write_request(
        &tmp,
        "bad.request.yaml",
        "work_type: steel\ngeometry:\n  rebar_mass: -5\nsolve:\n  mode: crew\n  duration_days: 3\n",
    );

    buildcrew(&tmp)
        .args(["run", "bad.request.yaml"])
        .assert()
        .failure();
}

#[test]
fn test_run_keep_going_reports_good_files() {
    let tmp = TempDir::new().unwrap();
    write_request(&tmp, "a-bad.request.yaml", "work_type: steel\n");
    write_request(&tmp, "b-good.request.yaml", STEEL_REQUEST);

    buildcrew(&tmp)
        .args(["run", ".", "--keep-going", "-f", "tsv"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Rebar L2"))
        .stderr(predicate::str::contains("1 of 2 request files failed"));
}

#[test]
fn test_run_no_files_fails() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["run", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No request files found"));
}

// ============================================================================
// New and Validate Command Tests
// ============================================================================

#[test]
fn test_new_then_validate_and_run() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["new", "concrete", "--sub-variant", "footing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("concrete-footing.request.yaml"));

    assert!(tmp.path().join("concrete-footing.request.yaml").exists());

    buildcrew(&tmp)
        .args(["validate", "concrete-footing.request.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All files passed validation"));

    buildcrew(&tmp)
        .args(["run", "concrete-footing.request.yaml", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"work_type\": \"concrete\""));
}

#[test]
fn test_new_crew_mode_to_stdout() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["new", "roof", "--mode", "crew", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mode: crew"))
        .stdout(predicate::str::contains("roof_area"));
}

#[test]
fn test_new_refuses_overwrite() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["new", "steel", "-o", "rebar.request.yaml"])
        .assert()
        .success();

    buildcrew(&tmp)
        .args(["new", "steel", "-o", "rebar.request.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    buildcrew(&tmp)
        .args(["new", "steel", "-o", "rebar.request.yaml", "--force"])
        .assert()
        .success();
}

#[test]
fn test_new_rejects_foreign_sub_variant() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["new", "masonry", "--sub-variant", "floor-tile"])
        .assert()
        .failure();
}

#[test]
fn test_validate_reports_errors() {
    let tmp = TempDir::new().unwrap();
    write_request(
        &tmp,
        "wall.request.yaml",
        "work_type: masonry\ngeometry:\n  wall_length: 3\nsolve:\n  mode: crew\n  duration_days: 2\n",
    );

    buildcrew(&tmp)
        .args(["validate", "wall.request.yaml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("wall_height"))
        .stderr(predicate::str::contains("Validation failed"));
}

#[test]
fn test_validate_summary_only() {
    let tmp = TempDir::new().unwrap();
    write_request(&tmp, "rebar.request.yaml", STEEL_REQUEST);

    buildcrew(&tmp)
        .args(["validate", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files checked:  1"))
        .stdout(predicate::str::contains("rebar.request.yaml").not());
}

// ============================================================================
// Profile, Config, and Completions Tests
// ============================================================================

#[test]
fn test_profile_three_role() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .arg("profile")
        .assert()
        .success()
        .stdout(predicate::str::contains("1059.2345"))
        .stdout(predicate::str::contains("concrete"));
}

#[test]
fn test_profile_two_role_with_risks() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["profile", "--profile", "two-role", "--risks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("slab-or-footing"))
        .stdout(predicate::str::contains("Rainy season"));
}

#[test]
fn test_config_set_changes_profile() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["config", "set", "profile", "two-role"])
        .assert()
        .success();

    assert!(tmp.path().join(".buildcrew.yaml").exists());

    buildcrew(&tmp)
        .args(["config", "show", "profile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("two-role"));

    buildcrew(&tmp)
        .args(["config", "unset", "profile"])
        .assert()
        .success();
}

#[test]
fn test_config_set_rejects_bad_value() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["config", "set", "unit", "furlong"])
        .assert()
        .failure();
}

#[test]
fn test_env_profile_applies() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .env("BUILDCREW_PROFILE", "two-role")
        .args(["crew", "masonry", "--wall-length", "10", "--wall-height", "3", "--days", "1", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"profile\": \"two-role\""));
}

#[test]
fn test_config_path() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Global:"))
        .stdout(predicate::str::contains(".buildcrew.yaml"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    buildcrew(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("buildcrew"));
}
