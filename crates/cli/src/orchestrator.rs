// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential suite runner.
//!
//! The orchestrator owns every suite and is the only writer of execution
//! state. Tests run strictly one after another in declaration order, and
//! suites likewise. A failed test never stops the run.
//!
//! Each mutation is published to the [`Reporter`] before the next step:
//! `pending -> running` is always observable before the executor is
//! awaited, and the terminal transition before the next test starts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::executor::{Execution, Executor};
use crate::model::{RunSummary, TestCase, TestSuite};
use crate::reporter::Reporter;

/// Delays inserted purely to make progress visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pacing {
    /// After each test except the last of a suite.
    pub test_delay: Duration,
    /// Between suites in `run_all`.
    pub suite_delay: Duration,
}

impl Pacing {
    pub fn new(test_delay: Duration, suite_delay: Duration) -> Self {
        Self {
            test_delay,
            suite_delay,
        }
    }

    /// No pacing at all.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Drives suites through their state machine.
pub struct Orchestrator<E, R> {
    executor: E,
    reporter: R,
    pacing: Pacing,
    suites: Mutex<Vec<TestSuite>>,
    running: AtomicBool,
    shutdown: CancellationToken,
    current: Mutex<Option<CancellationToken>>,
}

/// Holds the run-in-progress flag; clears it on drop.
struct RunGuard<'a> {
    running: &'a AtomicBool,
    current: &'a Mutex<Option<CancellationToken>>,
    token: CancellationToken,
}

impl RunGuard<'_> {
    fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = None;
        self.running.store(false, Ordering::Release);
    }
}

impl<E: Executor, R: Reporter> Orchestrator<E, R> {
    pub fn new(suites: Vec<TestSuite>, executor: E, reporter: R) -> Self {
        Self {
            executor,
            reporter,
            pacing: Pacing::none(),
            suites: Mutex::new(suites),
            running: AtomicBool::new(false),
            shutdown: CancellationToken::new(),
            current: Mutex::new(None),
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Tie every run to an external token (e.g. process shutdown).
    ///
    /// Cancelling `token` cancels the in-flight run and every later one.
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Snapshot of every suite.
    pub fn list_suites(&self) -> Vec<TestSuite> {
        self.state().clone()
    }

    /// Snapshot of one suite.
    pub fn suite(&self, index: usize) -> Option<TestSuite> {
        self.state().get(index).cloned()
    }

    pub fn suite_count(&self) -> usize {
        self.state().len()
    }

    /// Resolve a suite by id, falling back to a zero-based index.
    pub fn find_suite(&self, selector: &str) -> Result<usize> {
        let suites = self.state();
        if let Some(index) = suites.iter().position(|s| s.id == selector) {
            return Ok(index);
        }
        match selector.parse::<usize>() {
            Ok(index) if index < suites.len() => Ok(index),
            _ => Err(Error::SuiteNotFound(selector.to_string())),
        }
    }

    /// Whether a run is in flight.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Cancel the in-flight run, if any.
    ///
    /// The test currently executing finishes; remaining tests stay pending.
    pub fn cancel(&self) {
        if let Some(token) = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            token.cancel();
        }
    }

    /// Run one suite, test by test.
    ///
    /// Returns the suite snapshot after its last executed test. Fails only
    /// when another run is in progress or the index is out of range.
    pub async fn run_suite(&self, index: usize) -> Result<TestSuite> {
        let guard = self.acquire()?;
        if index >= self.suite_count() {
            return Err(Error::SuiteNotFound(index.to_string()));
        }
        self.execute_suite(index, guard.token()).await;
        self.suite(index)
            .ok_or_else(|| Error::Internal(format!("suite {index} vanished during run")))
    }

    /// Run every suite in declaration order, then summarize.
    pub async fn run_all(&self) -> Result<RunSummary> {
        let guard = self.acquire()?;
        let token = guard.token();
        let started = Instant::now();

        // A fresh run starts from pristine state everywhere, so suites the
        // run never reaches do not report stale results.
        let snapshots = self.reset_in_scope(None);
        for snapshot in &snapshots {
            self.reporter.on_suite_updated(&snapshot.id, snapshot);
        }

        let count = snapshots.len();
        tracing::debug!(suites = count, "run started");

        let mut cancelled = false;
        for (index, snapshot) in snapshots.into_iter().enumerate() {
            if !self.run_tests(index, snapshot, token).await {
                cancelled = true;
                break;
            }
            if index + 1 < count && !pause(self.pacing.suite_delay, token).await {
                cancelled = true;
                break;
            }
        }

        let summary = RunSummary::from_suites(&self.list_suites(), started.elapsed(), cancelled);
        tracing::debug!(
            passed = summary.passed,
            failed = summary.failed,
            pending = summary.pending,
            cancelled,
            "run finished"
        );
        self.reporter.on_run_completed(&summary);
        Ok(summary)
    }

    /// Return tests in scope to `pending` and clear suite aggregates.
    ///
    /// `None` resets every suite. Membership and order are untouched.
    pub fn reset(&self, index: Option<usize>) -> Result<()> {
        let _guard = self.acquire()?;
        if let Some(index) = index
            && index >= self.suite_count()
        {
            return Err(Error::SuiteNotFound(index.to_string()));
        }
        for snapshot in self.reset_in_scope(index) {
            self.reporter.on_suite_updated(&snapshot.id, &snapshot);
        }
        Ok(())
    }

    fn state(&self) -> MutexGuard<'_, Vec<TestSuite>> {
        self.suites.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn acquire(&self) -> Result<RunGuard<'_>> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("rejected overlapping run request");
            return Err(Error::RunInProgress);
        }
        let token = self.shutdown.child_token();
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(RunGuard {
            running: &self.running,
            current: &self.current,
            token,
        })
    }

    fn reset_in_scope(&self, index: Option<usize>) -> Vec<TestSuite> {
        let mut suites = self.state();
        suites
            .iter_mut()
            .enumerate()
            .filter(|(i, _)| index.is_none_or(|only| only == *i))
            .map(|(_, suite)| {
                suite.reset();
                suite.clone()
            })
            .collect()
    }

    /// Apply `update` to one suite and return snapshots of it and, when
    /// `position` is given, of that test.
    fn update(
        &self,
        index: usize,
        position: Option<usize>,
        update: impl FnOnce(&mut TestSuite),
    ) -> Option<(TestSuite, Option<TestCase>)> {
        let mut suites = self.state();
        let suite = suites.get_mut(index)?;
        update(suite);
        let case = position.and_then(|p| suite.tests.get(p).cloned());
        Some((suite.clone(), case))
    }

    /// Reset one suite, announce it, then run its tests.
    async fn execute_suite(&self, index: usize, token: &CancellationToken) -> bool {
        let Some((suite, _)) = self.update(index, None, TestSuite::reset) else {
            return true;
        };
        self.reporter.on_suite_updated(&suite.id, &suite);
        self.run_tests(index, suite, token).await
    }

    /// Run the tests of an already reset and announced suite.
    ///
    /// Returns false when cancelled before every test ran.
    async fn run_tests(&self, index: usize, suite: TestSuite, token: &CancellationToken) -> bool {
        let suite_id = suite.id;
        let count = suite.tests.len();
        tracing::debug!(suite = %suite_id, tests = count, "suite started");

        let started = Instant::now();
        let mut completed = true;

        for position in 0..count {
            if token.is_cancelled() {
                completed = false;
                break;
            }

            let Some((_, Some(case))) =
                self.update(index, Some(position), |s| s.tests[position].begin())
            else {
                break;
            };
            self.reporter.on_test_case_updated(&suite_id, &case);

            let execution = self.execute_case(&case).await;

            let Some((suite, Some(case))) = self.update(index, Some(position), |s| {
                s.tests[position].finish(&execution);
                let status = s.tests[position].status;
                s.record(status);
            }) else {
                break;
            };
            tracing::trace!(suite = %suite_id, test = %case.id, status = %case.status, "test finished");
            self.reporter.on_test_case_updated(&suite_id, &case);
            self.reporter.on_suite_updated(&suite_id, &suite);

            if position + 1 < count && !pause(self.pacing.test_delay, token).await {
                completed = false;
                break;
            }
        }

        let elapsed = started.elapsed();
        if let Some((suite, _)) = self.update(index, None, |s| s.finalize(elapsed)) {
            tracing::debug!(
                suite = %suite_id,
                passed = suite.total_passed,
                failed = suite.total_failed,
                elapsed_ms = elapsed.as_millis() as u64,
                "suite finished"
            );
            self.reporter.on_suite_updated(&suite_id, &suite);
        }
        completed
    }

    /// Executor errors become failed executions.
    async fn execute_case(&self, case: &TestCase) -> Execution {
        let started = Instant::now();
        match self.executor.execute(case).await {
            Ok(execution) => execution,
            Err(err) => {
                tracing::debug!(test = %case.id, error = %err, "executor error");
                Execution::failed(started.elapsed().as_millis() as u64, err.to_string())
            }
        }
    }
}

/// Sleep for `delay` unless cancelled first. Returns false on cancellation.
async fn pause(delay: Duration, token: &CancellationToken) -> bool {
    if delay.is_zero() {
        return !token.is_cancelled();
    }
    tokio::select! {
        _ = tokio::time::sleep(delay) => true,
        _ = token.cancelled() => false,
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
