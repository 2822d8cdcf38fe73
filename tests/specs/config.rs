// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for config discovery and validation.

use crate::prelude::*;

// =============================================================================
// DISCOVERY
// =============================================================================

/// > proctor.toml is found in a parent directory below the git root
#[test]
fn config_discovered_from_subdirectory() {
    let project = Project::with_config(PASSING);
    project.file("nested/deeper/.keep", "");

    let mut cmd = project.cmd();
    cmd.current_dir(project.path().join("nested/deeper")).arg("list");
    run_passes(cmd)
        .stdout_has("Smoke (2 tests)")
        .stdout_lacks("AI Validation");
}

/// > -C selects a config file explicitly
#[test]
fn explicit_config_flag() {
    let source = Project::with_config(PASSING);
    let elsewhere = Project::empty();

    let mut cmd = elsewhere.cmd();
    cmd.arg("-C").arg(source.config_path()).arg("list");
    run_passes(cmd).stdout_has("smoke");
}

/// > PROCTOR_CONFIG selects a config file
#[test]
fn config_env_var() {
    let source = Project::with_config(PASSING);
    let elsewhere = Project::empty();

    let mut cmd = elsewhere.cmd();
    cmd.env("PROCTOR_CONFIG", source.config_path()).arg("list");
    run_passes(cmd).stdout_has("smoke");
}

/// > A missing explicit config is a config error (exit 2)
#[test]
fn missing_explicit_config_exits_2() {
    let project = Project::empty();
    let mut cmd = project.cmd();
    cmd.args(["-C", "absent.toml", "list"]);
    run_exits(cmd, 2).stderr_has("config file not found");
}

/// > A config with no suites keeps the builtin suites
#[test]
fn profile_only_config_keeps_builtin_suites() {
    let project = Project::with_config("version = 1\n[profile.tutor]\nfailure_rate = 0\n");
    let mut cmd = project.cmd();
    cmd.arg("list");
    run_passes(cmd).stdout_has("AI Validation (8 tests)");
}

// =============================================================================
// VALIDATION
// =============================================================================

/// > An unsupported config version is rejected (exit 2)
#[test]
fn unsupported_version_exits_2() {
    let project = Project::with_config("version = 9\n");
    let mut cmd = project.cmd();
    cmd.arg("list");
    run_exits(cmd, 2).stderr_has("unsupported config version 9");
}

/// > A config without a version is rejected (exit 2)
#[test]
fn missing_version_exits_2() {
    let project = Project::with_config("[run]\nseed = 1\n");
    run_exits(project.run(&[]), 2).stderr_has("missing required field: version");
}

/// > Duplicate suite ids are rejected before anything runs
#[test]
fn duplicate_suite_ids_exit_2() {
    let project = Project::with_config(
        "version = 1\n[[suite]]\nid = \"a\"\n[[suite]]\nid = \"a\"\n",
    );
    run_exits(project.run(&[]), 2)
        .stderr_has("duplicate suite id `a`")
        .stdout_lacks("PASS");
}

/// > Invalid profile values name the offending profile
#[test]
fn invalid_profile_exits_2() {
    let project = Project::with_config("version = 1\n[profile.tutor]\nfailure_rate = 2\n");
    let mut cmd = project.cmd();
    cmd.arg("profiles");
    run_exits(cmd, 2).stderr_has("profile.tutor");
}

/// > Unknown fields inside a section are rejected
#[test]
fn unknown_run_field_exits_2() {
    let project = Project::with_config("version = 1\n[run]\ntest_dealy = \"1s\"\n");
    run_exits(project.run(&[]), 2).stderr_has("test_dealy");
}

/// > Unknown top-level keys warn but do not fail
#[test]
fn unknown_top_level_key_warns() {
    let project = Project::with_config("version = 1\nextras = true\n");
    let mut cmd = project.cmd();
    cmd.arg("list");
    run_passes(cmd)
        .stderr_has("unrecognized field `extras`")
        .stdout_has("AI Validation");
}
