// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for run output formats and color.

use crate::prelude::*;

// =============================================================================
// JSON
// =============================================================================

/// > run -o json writes one document with summary and final suite state
#[test]
fn json_run_document() {
    let project = Project::with_config(PASSING);
    let json = run_passes(project.run(&["-o", "json"])).json();

    assert_eq!(json["passed"], true);
    assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));

    let summary = &json["summary"];
    assert_eq!(summary["total_tests"], 2);
    assert_eq!(summary["passed"], 2);
    assert_eq!(summary["failed"], 0);
    assert_eq!(summary["pending"], 0);
    assert_eq!(summary["coverage"], 100.0);
    assert!(summary.get("cancelled").is_none());

    let suite = &json["suites"][0];
    assert_eq!(suite["id"], "smoke");
    assert_eq!(suite["total_passed"], 2);
    assert!(suite["execution_time_ms"].is_u64());
    for test in suite["tests"].as_array().unwrap() {
        assert_eq!(test["status"], "passed");
        assert!(test.get("error_message").is_none());
    }
}

/// > A failed run reports passed = false and carries the error message
#[test]
fn json_failed_run() {
    let project = Project::with_config(FAILING);
    let json = run_fails(project.run(&["-o", "json"])).json();

    assert_eq!(json["passed"], false);
    assert_eq!(json["summary"]["failed"], 1);
    assert_eq!(json["summary"]["coverage"], 0.0);
    let test = &json["suites"][0]["tests"][0];
    assert_eq!(test["status"], "failed");
    assert_eq!(test["error_message"], "Tutor response timed out");
    assert!(test.get("confidence").is_none());
}

/// > AI categories report confidence and accuracy on success
#[test]
fn json_reports_metrics_for_ai_categories() {
    let project = Project::with_config(PASSING);
    let json = run_passes(project.run(&["-o", "json"])).json();

    for test in json["suites"][0]["tests"].as_array().unwrap() {
        let confidence = test["confidence"].as_f64().unwrap();
        let accuracy = test["accuracy"].as_f64().unwrap();
        assert!((90.0..=98.0).contains(&confidence), "{confidence}");
        assert!((92.0..=98.0).contains(&accuracy), "{accuracy}");
    }
    let average = json["summary"]["avg_confidence"].as_f64().unwrap();
    assert!((90.0..=98.0).contains(&average), "{average}");
}

// =============================================================================
// NDJSON
// =============================================================================

/// > run -o ndjson streams running and finished events per test, then
/// > a run_completed line
#[test]
fn ndjson_streams_events() {
    let project = Project::with_config(PASSING);
    let lines = run_passes(project.run(&["-o", "ndjson"])).ndjson();

    let transitions: Vec<_> = lines
        .iter()
        .filter(|l| l["event"] == "test_case_updated")
        .map(|l| {
            (
                l["case"]["id"].as_str().unwrap(),
                l["case"]["status"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        transitions,
        [
            ("tutor-basic", "running"),
            ("tutor-basic", "passed"),
            ("tutor-followup", "running"),
            ("tutor-followup", "passed"),
        ]
    );

    let last = lines.last().unwrap();
    assert_eq!(last["event"], "run_completed");
    assert_eq!(last["summary"]["passed"], 2);
    assert!(lines.iter().any(|l| l["event"] == "suite_updated" && l["suite_id"] == "smoke"));
}

/// > A single-suite ndjson run still ends with run_completed
#[test]
fn ndjson_single_suite_completes() {
    let project = Project::with_config(FAILING);
    let lines = run_fails(project.run(&["broken", "-o", "ndjson"])).ndjson();

    let last = lines.last().unwrap();
    assert_eq!(last["event"], "run_completed");
    assert_eq!(last["summary"]["failed"], 1);
    assert_eq!(last["summary"]["suites"][0]["id"], "broken");
}

// =============================================================================
// COLOR
// =============================================================================

/// > NO_COLOR disables escape codes
#[test]
fn no_color_has_no_escapes() {
    let project = Project::with_config(PASSING);
    run_passes(project.run(&[])).stdout_lacks("\x1b[");
}

/// > COLOR=1 forces color even when stdout is not a terminal
#[test]
fn color_env_forces_escapes() {
    let project = Project::with_config(PASSING);
    let mut cmd = project.run(&[]);
    cmd.env_remove("NO_COLOR").env("COLOR", "1");
    run_passes(cmd).stdout_has("\x1b[");
}
