// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Progress notifications.
//!
//! The orchestrator calls a [`Reporter`] after every state change and
//! before it moves on, one call per transition. Snapshots passed to the
//! reporter are borrowed from a clone, never from live state.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;

use crate::model::{RunSummary, TestCase, TestSuite};

/// Observer of orchestrator state changes.
pub trait Reporter: Send + Sync {
    /// A test case changed status.
    fn on_test_case_updated(&self, suite_id: &str, case: &TestCase);

    /// A suite's counters, averages or membership state changed.
    fn on_suite_updated(&self, suite_id: &str, suite: &TestSuite);

    /// `run_all` finished (completed or cancelled).
    fn on_run_completed(&self, summary: &RunSummary);
}

impl<R: Reporter + ?Sized> Reporter for Arc<R> {
    fn on_test_case_updated(&self, suite_id: &str, case: &TestCase) {
        (**self).on_test_case_updated(suite_id, case);
    }

    fn on_suite_updated(&self, suite_id: &str, suite: &TestSuite) {
        (**self).on_suite_updated(suite_id, suite);
    }

    fn on_run_completed(&self, summary: &RunSummary) {
        (**self).on_run_completed(summary);
    }
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn on_test_case_updated(&self, _suite_id: &str, _case: &TestCase) {}
    fn on_suite_updated(&self, _suite_id: &str, _suite: &TestSuite) {}
    fn on_run_completed(&self, _summary: &RunSummary) {}
}

/// Owned copy of a notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    TestCaseUpdated { suite_id: String, case: TestCase },
    SuiteUpdated { suite_id: String, suite: TestSuite },
    RunCompleted { summary: RunSummary },
}

/// Forwards notifications over an unbounded channel.
///
/// Sending never blocks the orchestrator. Once the receiver is dropped,
/// events are discarded.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    tx: mpsc::UnboundedSender<Event>,
}

impl ChannelReporter {
    /// Create a reporter and the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: Event) {
        if self.tx.send(event).is_err() {
            tracing::trace!("event receiver dropped");
        }
    }
}

impl Reporter for ChannelReporter {
    fn on_test_case_updated(&self, suite_id: &str, case: &TestCase) {
        self.send(Event::TestCaseUpdated {
            suite_id: suite_id.to_string(),
            case: case.clone(),
        });
    }

    fn on_suite_updated(&self, suite_id: &str, suite: &TestSuite) {
        self.send(Event::SuiteUpdated {
            suite_id: suite_id.to_string(),
            suite: suite.clone(),
        });
    }

    fn on_run_completed(&self, summary: &RunSummary) {
        self.send(Event::RunCompleted {
            summary: summary.clone(),
        });
    }
}

#[cfg(test)]
#[path = "reporter_tests.rs"]
mod tests;
