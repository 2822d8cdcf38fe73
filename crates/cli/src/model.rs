// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suite and test case state.
//!
//! Definitions (ids, names, categories, order) are fixed at load time.
//! Execution state (status, duration, metrics, counters) is mutated only
//! by the orchestrator; everyone else sees clones.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::executor::{Execution, Verdict};

/// Lifecycle of a single test case within a run.
///
/// `Pending -> Running -> {Passed, Failed}`. A new run moves every case
/// back to `Pending` before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    #[default]
    Pending,
    Running,
    Passed,
    Failed,
}

impl TestStatus {
    /// True for `Passed` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, TestStatus::Passed | TestStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TestStatus::Pending => "pending",
            TestStatus::Running => "running",
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display priority. Never consulted by scheduling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unit of simulated validation work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCase {
    /// Unique within a run.
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Selects the executor profile.
    pub category: String,
    pub priority: Priority,
    pub status: TestStatus,
    /// Milliseconds taken by the last execution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl TestCase {
    /// Create a pending test case.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: category.into(),
            priority: Priority::default(),
            status: TestStatus::Pending,
            duration_ms: None,
            confidence: None,
            accuracy: None,
            error_message: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Back to `Pending` with every execution output cleared.
    pub fn reset(&mut self) {
        self.status = TestStatus::Pending;
        self.duration_ms = None;
        self.confidence = None;
        self.accuracy = None;
        self.error_message = None;
    }

    /// `Pending -> Running`.
    pub(crate) fn begin(&mut self) {
        self.reset();
        self.status = TestStatus::Running;
    }

    /// `Running -> Passed | Failed`, copying the execution record.
    pub(crate) fn finish(&mut self, execution: &Execution) {
        self.duration_ms = Some(execution.duration_ms);
        match execution.verdict {
            Verdict::Passed => {
                self.status = TestStatus::Passed;
                self.confidence = execution.confidence;
                self.accuracy = execution.accuracy;
                self.error_message = None;
            }
            Verdict::Failed => {
                self.status = TestStatus::Failed;
                self.confidence = None;
                self.accuracy = None;
                self.error_message = Some(
                    execution
                        .error_message
                        .clone()
                        .unwrap_or_else(|| "test failed".to_string()),
                );
            }
        }
    }
}

/// A named, ordered group of test cases executed and aggregated together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestSuite {
    /// Stable slug used in notifications and on the command line.
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Declaration order is execution order.
    pub tests: Vec<TestCase>,
    pub total_passed: usize,
    pub total_failed: usize,
    pub avg_confidence: f64,
    pub avg_accuracy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl TestSuite {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            tests: Vec::new(),
            total_passed: 0,
            total_failed: 0,
            avg_confidence: 0.0,
            avg_accuracy: 0.0,
            execution_time_ms: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tests(mut self, tests: Vec<TestCase>) -> Self {
        self.tests = tests;
        self
    }

    /// Clear aggregates and move every test back to `Pending`.
    pub fn reset(&mut self) {
        for test in &mut self.tests {
            test.reset();
        }
        self.total_passed = 0;
        self.total_failed = 0;
        self.avg_confidence = 0.0;
        self.avg_accuracy = 0.0;
        self.execution_time_ms = None;
    }

    /// Count one finished test.
    pub(crate) fn record(&mut self, status: TestStatus) {
        match status {
            TestStatus::Passed => self.total_passed += 1,
            TestStatus::Failed => self.total_failed += 1,
            TestStatus::Pending | TestStatus::Running => {}
        }
    }

    /// Compute averages after the last test of a run.
    pub(crate) fn finalize(&mut self, elapsed: Duration) {
        self.avg_confidence = mean(self.passed_metric(|t| t.confidence));
        self.avg_accuracy = mean(self.passed_metric(|t| t.accuracy));
        self.execution_time_ms = Some(elapsed.as_millis() as u64);
    }

    /// Number of passed tests that produced quality metrics.
    pub fn metric_samples(&self) -> usize {
        self.passed_metric(|t| t.confidence).count()
    }

    pub fn pending_count(&self) -> usize {
        self.tests
            .iter()
            .filter(|t| !t.status.is_terminal())
            .count()
    }

    /// Every test reached a terminal status.
    pub fn is_complete(&self) -> bool {
        self.pending_count() == 0
    }

    fn passed_metric<'a>(
        &'a self,
        metric: impl Fn(&TestCase) -> Option<f64> + 'a,
    ) -> impl Iterator<Item = f64> + 'a {
        self.tests
            .iter()
            .filter(|t| t.status == TestStatus::Passed)
            .filter_map(metric)
    }
}

/// Arithmetic mean, 0 for an empty sequence.
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Per-suite line of a run summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteSummary {
    pub id: String,
    pub name: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub avg_confidence: f64,
    pub avg_accuracy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl From<&TestSuite> for SuiteSummary {
    fn from(suite: &TestSuite) -> Self {
        Self {
            id: suite.id.clone(),
            name: suite.name.clone(),
            total: suite.tests.len(),
            passed: suite.total_passed,
            failed: suite.total_failed,
            avg_confidence: suite.avg_confidence,
            avg_accuracy: suite.avg_accuracy,
            execution_time_ms: suite.execution_time_ms,
        }
    }
}

/// Aggregate over a set of suites after a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Tests that reached a terminal status (`passed + failed`).
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    /// Tests left untouched by a cancelled run.
    pub pending: usize,
    /// Percentage of executed tests that passed.
    pub coverage: f64,
    pub avg_confidence: f64,
    pub avg_accuracy: f64,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,
    pub suites: Vec<SuiteSummary>,
}

impl RunSummary {
    /// Summarize suites after a run.
    ///
    /// Run-level averages are the mean of suite averages, taken over the
    /// suites that had at least one passed test carrying metrics.
    pub fn from_suites(suites: &[TestSuite], elapsed: Duration, cancelled: bool) -> Self {
        let declared: usize = suites.iter().map(|s| s.tests.len()).sum();
        let passed: usize = suites.iter().map(|s| s.total_passed).sum();
        let failed: usize = suites.iter().map(|s| s.total_failed).sum();
        let executed = passed + failed;
        let coverage = if executed == 0 {
            0.0
        } else {
            passed as f64 * 100.0 / executed as f64
        };
        let scored = || suites.iter().filter(|s| s.metric_samples() > 0);

        Self {
            total_tests: executed,
            passed,
            failed,
            pending: declared.saturating_sub(executed),
            coverage,
            avg_confidence: mean(scored().map(|s| s.avg_confidence)),
            avg_accuracy: mean(scored().map(|s| s.avg_accuracy)),
            execution_time_ms: elapsed.as_millis() as u64,
            cancelled,
            suites: suites.iter().map(SuiteSummary::from).collect(),
        }
    }

    /// No failures and nothing left pending.
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.pending == 0 && !self.cancelled
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
