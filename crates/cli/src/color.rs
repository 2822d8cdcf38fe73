// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Color detection and terminal styling.
//!
//! Detection order:
//! 1. NO_COLOR env var → no color
//! 2. COLOR env var → use color
//! 3. default:
//!    - If not stdout.is_tty() → no color
//!    - If CI or an agent env var is set → no color
//!    - Else → auto

use std::io::IsTerminal;

use termcolor::ColorChoice;

use crate::model::TestStatus;

/// Resolve color choice from environment variables.
///
/// Per [no-color.org](https://no-color.org/), `NO_COLOR` when set to any value
/// (including empty string) disables color.
pub fn resolve_color() -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    if std::env::var_os("COLOR").is_some() {
        return ColorChoice::Always;
    }
    if !std::io::stdout().is_terminal() || is_agent_environment() {
        return ColorChoice::Never;
    }
    ColorChoice::Auto
}

fn is_agent_environment() -> bool {
    ["CLAUDE_CODE", "CODEX", "CURSOR", "CI"]
        .iter()
        .any(|var| std::env::var_os(var).is_some())
}

/// Color scheme for run output.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    use crate::model::TestStatus;

    /// Bold suite name.
    pub fn suite_name() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    /// Green "PASS".
    pub fn pass() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        spec
    }

    /// Red "FAIL".
    pub fn fail() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }

    /// Cyan "RUN".
    pub fn running() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }

    /// Yellow "WAIT" for tests a cancelled run never reached.
    pub fn pending() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow));
        spec
    }

    /// Dimmed durations and metrics.
    pub fn detail() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        spec
    }

    pub fn for_status(status: TestStatus) -> ColorSpec {
        match status {
            TestStatus::Pending => pending(),
            TestStatus::Running => running(),
            TestStatus::Passed => pass(),
            TestStatus::Failed => fail(),
        }
    }
}

/// Fixed-width label for a status.
pub fn status_label(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Pending => "WAIT",
        TestStatus::Running => "RUN ",
        TestStatus::Passed => "PASS",
        TestStatus::Failed => "FAIL",
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
