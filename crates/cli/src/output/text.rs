//! Text output formatter.
//!
//! Streams one line per test transition, grouped under suite headers:
//! ```text
//! AI Validation
//!   RUN  ai-tutor-socratic  Socratic tutoring session
//!   FAIL ai-tutor-socratic  Socratic tutoring session  842ms
//!        Tutor response timed out
//!   7 passed, 1 failed in 9.8s (confidence 90.1%, accuracy 92.0%)
//! ```

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use termcolor::{ColorSpec, WriteColor};

use super::format_millis;
use crate::color::{scheme, status_label};
use crate::model::{RunSummary, TestCase, TestStatus, TestSuite};
use crate::profile::{CategoryProfile, ProfileTable};
use crate::reporter::Reporter;

/// Text output formatter with color support.
pub struct TextFormatter<W> {
    out: W,
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn colored(&mut self, spec: &ColorSpec, text: &str) -> io::Result<()> {
        self.out.set_color(spec)?;
        write!(self.out, "{text}")?;
        self.out.reset()
    }

    /// Suite name in bold.
    pub fn write_suite_header(&mut self, name: &str) -> io::Result<()> {
        self.colored(&scheme::suite_name(), name)?;
        writeln!(self.out)
    }

    /// One line for a test transition, plus the error on failure.
    pub fn write_test(&mut self, case: &TestCase) -> io::Result<()> {
        write!(self.out, "  ")?;
        self.colored(&scheme::for_status(case.status), status_label(case.status))?;
        write!(self.out, " {}  {}", case.id, case.name)?;

        if case.status.is_terminal() {
            let mut detail = String::new();
            if let Some(ms) = case.duration_ms {
                detail.push_str(&format!("  {}", format_millis(ms)));
            }
            if let Some(confidence) = case.confidence {
                detail.push_str(&format!("  confidence {confidence:.1}%"));
            }
            if let Some(accuracy) = case.accuracy {
                detail.push_str(&format!("  accuracy {accuracy:.1}%"));
            }
            self.colored(&scheme::detail(), &detail)?;
        }
        writeln!(self.out)?;

        if case.status == TestStatus::Failed
            && let Some(message) = &case.error_message
        {
            writeln!(self.out, "       {message}")?;
        }
        Ok(())
    }

    /// Counters and averages once a suite finished.
    pub fn write_suite_footer(&mut self, suite: &TestSuite) -> io::Result<()> {
        write!(
            self.out,
            "  {} passed, {} failed",
            suite.total_passed, suite.total_failed
        )?;
        let pending = suite.pending_count();
        if pending > 0 {
            write!(self.out, ", {pending} pending")?;
        }
        if let Some(ms) = suite.execution_time_ms {
            write!(self.out, " in {}", format_millis(ms))?;
        }
        if suite.metric_samples() > 0 {
            write!(
                self.out,
                " (confidence {:.1}%, accuracy {:.1}%)",
                suite.avg_confidence, suite.avg_accuracy
            )?;
        }
        writeln!(self.out)?;
        writeln!(self.out)
    }

    /// Final run summary.
    pub fn write_summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        if summary.cancelled {
            self.colored(&scheme::pending(), "Cancelled")?;
        } else if summary.failed > 0 {
            self.colored(&scheme::fail(), "Failed")?;
        } else {
            self.colored(&scheme::pass(), "Passed")?;
        }
        write!(
            self.out,
            ": {} passed, {} failed",
            summary.passed, summary.failed
        )?;
        if summary.pending > 0 {
            write!(self.out, ", {} pending", summary.pending)?;
        }
        writeln!(self.out, " in {}", format_millis(summary.execution_time_ms))?;

        write!(self.out, "  coverage {:.1}%", summary.coverage)?;
        if summary.avg_confidence > 0.0 || summary.avg_accuracy > 0.0 {
            write!(
                self.out,
                "  confidence {:.1}%  accuracy {:.1}%",
                summary.avg_confidence, summary.avg_accuracy
            )?;
        }
        writeln!(self.out)
    }

    /// `proctor list`.
    pub fn write_suites(&mut self, suites: &[TestSuite]) -> io::Result<()> {
        for (index, suite) in suites.iter().enumerate() {
            write!(self.out, "{index}  ")?;
            self.colored(&scheme::suite_name(), &suite.id)?;
            let plural = if suite.tests.len() == 1 { "" } else { "s" };
            writeln!(self.out, "  {} ({} test{plural})", suite.name, suite.tests.len())?;
            for test in &suite.tests {
                writeln!(
                    self.out,
                    "   {:<8} {:<16} {}  {}",
                    test.priority.as_str(),
                    test.category,
                    test.id,
                    test.name
                )?;
            }
        }
        Ok(())
    }

    /// `proctor profiles`.
    pub fn write_profiles(&mut self, profiles: &ProfileTable) -> io::Result<()> {
        let width = profiles.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (category, profile) in profiles.iter() {
            self.colored(&scheme::suite_name(), &format!("{category:<width$}"))?;
            writeln!(self.out, "  {}", describe_profile(profile))?;
            self.colored(&scheme::detail(), &format!("{:<width$}  {}", "", profile.error))?;
            writeln!(self.out)?;
        }
        Ok(())
    }
}

fn describe_profile(profile: &CategoryProfile) -> String {
    let mut line = format!(
        "{}-{}ms  fail {:.0}%",
        profile.latency.min.as_millis(),
        profile.latency.max.as_millis(),
        profile.failure_rate * 100.0
    );
    if let Some(band) = profile.confidence {
        line.push_str(&format!("  confidence {}-{}", band.min, band.max));
    }
    if let Some(band) = profile.accuracy {
        line.push_str(&format!("  accuracy {}-{}", band.min, band.max));
    }
    line
}

/// Reporter that renders progress as it happens.
pub struct TextReporter<W> {
    state: Mutex<ReporterState<W>>,
}

struct ReporterState<W> {
    formatter: TextFormatter<W>,
    /// Display name for each suite id seen so far.
    names: HashMap<String, String>,
    /// Suite whose header was printed last.
    current: Option<String>,
}

impl<W: WriteColor + Send> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            state: Mutex::new(ReporterState {
                formatter: TextFormatter::new(out),
                names: HashMap::new(),
                current: None,
            }),
        }
    }

    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .formatter
            .into_inner()
    }

    /// Write the summary for runs that do not end in `on_run_completed`.
    pub fn write_summary(&self, summary: &RunSummary) {
        self.with_state(|state| state.formatter.write_summary(summary));
    }

    fn with_state(&self, write: impl FnOnce(&mut ReporterState<W>) -> io::Result<()>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = write(&mut *state) {
            tracing::debug!(error = %err, "failed to write progress");
        }
    }
}

impl<W: WriteColor + Send> Reporter for TextReporter<W> {
    fn on_test_case_updated(&self, suite_id: &str, case: &TestCase) {
        self.with_state(|state| {
            if state.current.as_deref() != Some(suite_id) {
                let name = state.names.get(suite_id).map_or(suite_id, String::as_str);
                state.formatter.write_suite_header(name)?;
                state.current = Some(suite_id.to_string());
            }
            state.formatter.write_test(case)
        });
    }

    fn on_suite_updated(&self, suite_id: &str, suite: &TestSuite) {
        self.with_state(|state| {
            let finished = suite.execution_time_ms.is_some();
            let headed = state.current.as_deref() == Some(suite_id);
            state
                .names
                .entry(suite_id.to_string())
                .or_insert_with(|| suite.name.clone());
            if finished && headed {
                state.current = None;
                state.formatter.write_suite_footer(suite)?;
            }
            Ok(())
        });
    }

    fn on_run_completed(&self, summary: &RunSummary) {
        self.write_summary(summary);
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
