// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! `json` output is buffered and written once at the end of a command.
//! `ndjson` output is one compact [`Event`] per line, written as events
//! arrive.

use std::io::Write;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::model::{RunSummary, TestSuite};
use crate::profile::ProfileTable;
use crate::reporter::Event;

/// Document written by `proctor run -o json`.
#[derive(Debug, Serialize)]
pub struct RunDocument<'a> {
    pub timestamp: String,
    pub passed: bool,
    pub summary: &'a RunSummary,
    pub suites: &'a [TestSuite],
}

impl<'a> RunDocument<'a> {
    pub fn new(summary: &'a RunSummary, suites: &'a [TestSuite]) -> Self {
        Self {
            timestamp: timestamp(),
            passed: summary.all_passed(),
            summary,
            suites,
        }
    }
}

/// Current time as RFC 3339 with second precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn pretty<T: Serialize + ?Sized>(&mut self, value: &T) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{json}")
    }

    /// Write the complete run document.
    pub fn write_run(&mut self, document: &RunDocument<'_>) -> std::io::Result<()> {
        self.pretty(document)
    }

    /// `proctor list -o json`.
    pub fn write_suites(&mut self, suites: &[TestSuite]) -> std::io::Result<()> {
        self.pretty(suites)
    }

    /// `proctor profiles -o json`.
    pub fn write_profiles(&mut self, profiles: &ProfileTable) -> std::io::Result<()> {
        self.pretty(profiles)
    }

    /// One compact value on its own line, flushed immediately.
    pub fn write_line<T: Serialize + ?Sized>(&mut self, value: &T) -> std::io::Result<()> {
        let json = serde_json::to_string(value).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()
    }

    pub fn write_event(&mut self, event: &Event) -> std::io::Result<()> {
        self.write_line(event)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
