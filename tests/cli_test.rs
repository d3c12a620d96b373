//! CLI contract tests for the `segmentation` binary
//!
//! Validates the stdout/stderr/exit-code contract consumed by the calling
//! service: a human summary line, a `JSON_OUTPUT:`-prefixed JSON line on
//! success, and an `Error:` line with exit status 1 on failure.

mod common;

use assert_cmd::Command;
use common::write_frame_pair;
use opencv::core::Rect;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn segmentation_cmd() -> Command {
    let mut cmd = Command::cargo_bin("segmentation").unwrap();
    // Keep stderr silent regardless of the invoking environment
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Extract and parse the payload of the JSON_OUTPUT line
fn parse_json_line(stdout: &str) -> Value {
    let line = stdout
        .lines()
        .find(|line| line.starts_with("JSON_OUTPUT:"))
        .expect("no JSON_OUTPUT line in stdout");
    serde_json::from_str(line.trim_start_matches("JSON_OUTPUT:")).unwrap()
}

#[test]
fn test_single_region_success_contract() {
    let dir = TempDir::new().unwrap();
    let (previous, current) = write_frame_pair(dir.path(), &[Rect::new(60, 50, 40, 30)]);

    let assert = segmentation_cmd()
        .arg(&previous)
        .arg(&current)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 change region(s):"))
        .stdout(predicate::str::contains("JSON_OUTPUT:"))
        .stderr(predicate::str::is_empty());

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json = parse_json_line(&stdout);

    let segments = json["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0]["id"], 1);
    assert!(segments[0]["bbox"]["width"].as_i64().unwrap() > 0);
    assert!(segments[0]["bbox"]["height"].as_i64().unwrap() > 0);
}

#[test]
fn test_identical_images_report_zero_regions() {
    let dir = TempDir::new().unwrap();
    let (previous, _) = write_frame_pair(dir.path(), &[]);

    // The same file as both arguments
    let assert = segmentation_cmd()
        .arg(&previous)
        .arg(&previous)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 change region(s): []"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json = parse_json_line(&stdout);
    assert_eq!(json["segments"].as_array().unwrap().len(), 0);
}

#[test]
fn test_json_count_matches_human_count_and_ids_are_gapless() {
    let dir = TempDir::new().unwrap();
    let (previous, current) = write_frame_pair(
        dir.path(),
        &[Rect::new(20, 20, 40, 40), Rect::new(220, 160, 40, 40)],
    );

    let output = segmentation_cmd()
        .arg(&previous)
        .arg(&current)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let human_line = stdout.lines().next().unwrap();
    assert!(
        human_line.starts_with("Found 2 change region(s):"),
        "unexpected human line: {}",
        human_line
    );

    let json = parse_json_line(&stdout);
    let segments = json["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 2);
    for (index, segment) in segments.iter().enumerate() {
        assert_eq!(segment["id"].as_u64().unwrap(), index as u64 + 1);
    }
}

#[test]
fn test_single_box_flag_merges_regions() {
    let dir = TempDir::new().unwrap();
    let (previous, current) = write_frame_pair(
        dir.path(),
        &[Rect::new(20, 20, 40, 40), Rect::new(220, 160, 40, 40)],
    );

    let assert = segmentation_cmd()
        .arg(&previous)
        .arg(&current)
        .arg("--single-box")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 change region(s):"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json = parse_json_line(&stdout);
    let segments = json["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 1);

    // The merged box must span both painted regions
    let bbox = &segments[0]["bbox"];
    let far_x = bbox["x"].as_i64().unwrap() + bbox["width"].as_i64().unwrap();
    let far_y = bbox["y"].as_i64().unwrap() + bbox["height"].as_i64().unwrap();
    assert!(bbox["x"].as_i64().unwrap() <= 25);
    assert!(bbox["y"].as_i64().unwrap() <= 25);
    assert!(far_x >= 255);
    assert!(far_y >= 195);
}

#[test]
fn test_min_area_flag_filters_regions() {
    let dir = TempDir::new().unwrap();
    let (previous, current) = write_frame_pair(dir.path(), &[Rect::new(60, 50, 30, 30)]);

    segmentation_cmd()
        .arg(&previous)
        .arg(&current)
        .args(["--min-area", "5000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 change region(s): []"));
}

#[test]
fn test_missing_input_fails_with_error_line() {
    let dir = TempDir::new().unwrap();
    let (previous, _) = write_frame_pair(dir.path(), &[]);

    segmentation_cmd()
        .arg(&previous)
        .arg(dir.path().join("does_not_exist.png"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: "))
        .stdout(predicate::str::contains("JSON_OUTPUT:").not());
}

#[test]
fn test_missing_arguments_fail() {
    segmentation_cmd().assert().failure();
}
