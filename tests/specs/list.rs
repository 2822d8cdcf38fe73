// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for `list` and `profiles`.

use crate::prelude::*;

// =============================================================================
// LIST
// =============================================================================

/// > Without a config, list shows the four builtin suites in order
#[test]
fn list_shows_builtin_suites() {
    let project = Project::empty();
    let mut cmd = project.cmd();
    cmd.arg("list");

    let out = run_passes(cmd)
        .stdout_has("AI Validation (8 tests)")
        .stdout_has("Admin Dashboard (6 tests)")
        .stdout_has("Student Journey (5 tests)")
        .stdout_has("Revolutionary System (7 tests)")
        .stdout();

    let ai = out.find("AI Validation").unwrap();
    let admin = out.find("Admin Dashboard").unwrap();
    let journey = out.find("Student Journey").unwrap();
    let system = out.find("Revolutionary System").unwrap();
    assert!(ai < admin && admin < journey && journey < system, "{out}");
}

/// > list prints each test with its priority and category
#[test]
fn list_shows_test_details() {
    let project = Project::with_config(PASSING);
    let mut cmd = project.cmd();
    cmd.arg("list");

    run_passes(cmd)
        .stdout_has("smoke")
        .stdout_has("Smoke (2 tests)")
        .stdout_has("tutor-basic")
        .stdout_has("Tutor Followup")
        .stdout_has(predicates::str::is_match(r"high\s+tutor\s+tutor-followup").unwrap());
}

/// > list -o json emits every suite with pending tests
#[test]
fn list_json_is_pristine() {
    let project = Project::empty();
    let mut cmd = project.cmd();
    cmd.args(["list", "-o", "json"]);

    let json = run_passes(cmd).json();
    let suites = json.as_array().unwrap();
    assert_eq!(suites.len(), 4);
    assert_eq!(suites[0]["id"], "ai-validation");
    for suite in suites {
        assert_eq!(suite["total_passed"], 0);
        assert_eq!(suite["total_failed"], 0);
        for test in suite["tests"].as_array().unwrap() {
            assert_eq!(test["status"], "pending");
            assert!(test.get("duration_ms").is_none());
        }
    }
}

/// > list -o ndjson emits one suite per line
#[test]
fn list_ndjson_one_suite_per_line() {
    let project = Project::empty();
    let mut cmd = project.cmd();
    cmd.args(["list", "-o", "ndjson"]);

    let lines = run_passes(cmd).ndjson();
    let ids: Vec<_> = lines.iter().map(|l| l["id"].as_str().unwrap()).collect();
    assert_eq!(
        ids,
        ["ai-validation", "admin-dashboard", "student-journey", "revolutionary-system"]
    );
}

// =============================================================================
// PROFILES
// =============================================================================

/// > profiles shows every builtin category with its failure message
#[test]
fn profiles_lists_builtin_categories() {
    let project = Project::empty();
    let mut cmd = project.cmd();
    cmd.arg("profiles");

    run_passes(cmd)
        .stdout_has("tutor")
        .stdout_has("Tutor response timed out")
        .stdout_has("600-1200ms")
        .stdout_has("security");
}

/// > profiles reflects config overrides
#[test]
fn profiles_json_reflects_overrides() {
    let project = Project::with_config(PASSING);
    let mut cmd = project.cmd();
    cmd.args(["profiles", "-o", "json"]);

    let json = run_passes(cmd).json();
    let tutor = &json["tutor"];
    assert_eq!(tutor["latency"]["min_ms"], 5);
    assert_eq!(tutor["latency"]["max_ms"], 10);
    assert_eq!(tutor["failure_rate"], 0.0);
    assert_eq!(tutor["error"], "Tutor response timed out");
    assert!(json.get("explainer").is_some(), "builtins remain");
}

/// > profiles -o ndjson tags each profile with its category
#[test]
fn profiles_ndjson_names_category() {
    let project = Project::empty();
    let mut cmd = project.cmd();
    cmd.args(["profiles", "-o", "ndjson"]);

    let lines = run_passes(cmd).ndjson();
    assert!(lines.iter().any(|l| l["category"] == "predictor"));
    assert!(lines.iter().all(|l| l.get("failure_rate").is_some()));
}
