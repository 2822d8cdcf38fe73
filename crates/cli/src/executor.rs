// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Simulated test execution.
//!
//! An [`Executor`] turns one test case into an [`Execution`] record. It
//! never touches the test case itself; the orchestrator copies the record
//! onto the case.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::model::TestCase;
use crate::profile::{CategoryProfile, ProfileTable};
use crate::random::{RandomSource, SeededRandom, uniform_f64, uniform_u64};

/// Outcome of one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Passed,
    Failed,
}

/// Result record returned by an executor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Execution {
    pub verdict: Verdict,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Execution {
    /// Create a passing record without metrics.
    pub fn passed(duration_ms: u64) -> Self {
        Self {
            verdict: Verdict::Passed,
            duration_ms,
            confidence: None,
            accuracy: None,
            error_message: None,
        }
    }

    /// Create a failing record.
    pub fn failed(duration_ms: u64, message: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Failed,
            duration_ms,
            confidence: None,
            accuracy: None,
            error_message: Some(message.into()),
        }
    }

    /// Attach quality metrics.
    pub fn with_metrics(mut self, confidence: Option<f64>, accuracy: Option<f64>) -> Self {
        self.confidence = confidence;
        self.accuracy = accuracy;
        self
    }

    pub fn is_passed(&self) -> bool {
        self.verdict == Verdict::Passed
    }
}

/// Errors an executor reports instead of a record.
///
/// The orchestrator records these as failed test cases.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExecuteError {
    /// No profile exists for the test's category.
    #[error("unknown category: {category} (test {test_id})")]
    UnknownCategory { category: String, test_id: String },

    /// The executor could not produce a result.
    #[error("execution error: {0}")]
    Internal(String),
}

/// Performs the work for a single test case.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, case: &TestCase) -> Result<Execution, ExecuteError>;
}

#[async_trait]
impl<E: Executor + ?Sized> Executor for std::sync::Arc<E> {
    async fn execute(&self, case: &TestCase) -> Result<Execution, ExecuteError> {
        (**self).execute(case).await
    }
}

/// Pre-drawn values for one execution.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Draw {
    latency: Duration,
    failed: bool,
    confidence: Option<f64>,
    accuracy: Option<f64>,
}

/// Executor that sleeps for a profile-driven latency and injects failures
/// and metrics from a random source.
///
/// Draw order per execution: latency, failure roll, then (on success)
/// confidence and accuracy for categories that report them.
pub struct SimulatedExecutor {
    profiles: ProfileTable,
    rng: Mutex<Box<dyn RandomSource>>,
    wait: bool,
}

impl SimulatedExecutor {
    /// Create an executor seeded from entropy.
    pub fn new(profiles: ProfileTable) -> Self {
        Self::with_random(profiles, SeededRandom::from_entropy())
    }

    /// Create an executor drawing from `rng`.
    pub fn with_random(profiles: ProfileTable, rng: impl RandomSource + 'static) -> Self {
        Self {
            profiles,
            rng: Mutex::new(Box::new(rng)),
            wait: true,
        }
    }

    /// Skip the latency wait. Durations are still drawn and reported.
    pub fn instant(mut self) -> Self {
        self.wait = false;
        self
    }

    pub fn profiles(&self) -> &ProfileTable {
        &self.profiles
    }

    fn draw(&self, profile: &CategoryProfile) -> Draw {
        let mut guard = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let rng: &mut dyn RandomSource = guard.as_mut();

        let min = profile.latency.min.as_millis() as u64;
        let max = profile.latency.max.as_millis() as u64;
        let latency = Duration::from_millis(uniform_u64(rng, min, max));
        let failed = rng.next_unit() < profile.failure_rate;

        let (confidence, accuracy) = if failed {
            (None, None)
        } else {
            let confidence = profile
                .confidence
                .map(|band| uniform_f64(rng, band.min, band.max));
            let accuracy = profile
                .accuracy
                .map(|band| uniform_f64(rng, band.min, band.max));
            (confidence, accuracy)
        };

        Draw {
            latency,
            failed,
            confidence,
            accuracy,
        }
    }
}

#[async_trait]
impl Executor for SimulatedExecutor {
    async fn execute(&self, case: &TestCase) -> Result<Execution, ExecuteError> {
        let profile =
            self.profiles
                .get(&case.category)
                .ok_or_else(|| ExecuteError::UnknownCategory {
                    category: case.category.clone(),
                    test_id: case.id.clone(),
                })?;

        let draw = self.draw(profile);
        tracing::trace!(
            test = %case.id,
            latency_ms = draw.latency.as_millis() as u64,
            failed = draw.failed,
            "simulating"
        );

        if self.wait {
            tokio::time::sleep(draw.latency).await;
        }

        let duration_ms = draw.latency.as_millis() as u64;
        if draw.failed {
            Ok(Execution::failed(duration_ms, profile.error.clone()))
        } else {
            Ok(Execution::passed(duration_ms).with_metrics(draw.confidence, draw.accuracy))
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
