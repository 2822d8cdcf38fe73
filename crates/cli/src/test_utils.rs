//! Shared unit test utilities.
//!
//! Provides stub executors, a recording reporter and fixture builders for
//! unit tests in the cli crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use crate::executor::{ExecuteError, Execution, Executor};
use crate::model::{RunSummary, TestCase, TestStatus, TestSuite};
use crate::reporter::{Event, Reporter};

/// Creates a temp directory with a minimal proctor.toml.
pub fn temp_project() -> TempDir {
    temp_project_with_config("version = 1\n")
}

/// Creates a temp directory with custom config content.
pub fn temp_project_with_config(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("proctor.toml"), config).unwrap();
    dir
}

/// Build a suite whose tests are `(id, category)` pairs.
pub fn suite(id: &str, tests: &[(&str, &str)]) -> TestSuite {
    TestSuite::new(id, id.to_uppercase()).with_tests(
        tests
            .iter()
            .map(|(test_id, category)| TestCase::new(*test_id, *test_id, *category))
            .collect(),
    )
}

type Behavior = Box<dyn Fn(&TestCase) -> Result<Execution, ExecuteError> + Send + Sync>;

/// Executor driven by a closure, with an optional simulated latency.
pub struct StubExecutor {
    behavior: Behavior,
    latency: Duration,
    calls: Mutex<Vec<String>>,
}

impl StubExecutor {
    pub fn new(
        behavior: impl Fn(&TestCase) -> Result<Execution, ExecuteError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            behavior: Box::new(behavior),
            latency: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every test passes in 100ms with no metrics.
    pub fn passing() -> Self {
        Self::new(|_| Ok(Execution::passed(100)))
    }

    /// Sleep this long inside every execution.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Ids of executed tests, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for StubExecutor {
    async fn execute(&self, case: &TestCase) -> Result<Execution, ExecuteError> {
        self.calls.lock().unwrap().push(case.id.clone());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        (self.behavior)(case)
    }
}

/// Reporter that keeps every notification.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Event> {
        self.events.lock().unwrap().last().cloned()
    }

    /// `(test id, status)` for every test case notification, in order.
    pub fn transitions(&self) -> Vec<(String, TestStatus)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::TestCaseUpdated { case, .. } => Some((case.id, case.status)),
                _ => None,
            })
            .collect()
    }

    /// Summaries passed to `on_run_completed`.
    pub fn summaries(&self) -> Vec<RunSummary> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::RunCompleted { summary } => Some(summary),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn on_test_case_updated(&self, suite_id: &str, case: &TestCase) {
        self.events.lock().unwrap().push(Event::TestCaseUpdated {
            suite_id: suite_id.to_string(),
            case: case.clone(),
        });
    }

    fn on_suite_updated(&self, suite_id: &str, suite: &TestSuite) {
        self.events.lock().unwrap().push(Event::SuiteUpdated {
            suite_id: suite_id.to_string(),
            suite: suite.clone(),
        });
    }

    fn on_run_completed(&self, summary: &RunSummary) {
        self.events.lock().unwrap().push(Event::RunCompleted {
            summary: summary.clone(),
        });
    }
}
