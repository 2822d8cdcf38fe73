// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Proctor: a sequential, observable test orchestrator for simulated
//! validation suites.
//!
//! An [`Orchestrator`] owns a list of [`TestSuite`]s and runs their test
//! cases one at a time through an [`Executor`], publishing every status
//! change to a [`Reporter`]. The bundled [`SimulatedExecutor`] draws
//! latency, failures and quality metrics from per-category profiles.

pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod fixtures;
pub mod model;
pub mod orchestrator;
pub mod output;
pub mod profile;
pub mod random;
pub mod reporter;

pub use error::{Error, ExitCode, Result};
pub use executor::{ExecuteError, Execution, Executor, SimulatedExecutor, Verdict};
pub use model::{Priority, RunSummary, SuiteSummary, TestCase, TestStatus, TestSuite};
pub use orchestrator::{Orchestrator, Pacing};
pub use profile::{CategoryProfile, LatencyRange, MetricBand, ProfileTable};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use reporter::{ChannelReporter, Event, NullReporter, Reporter};

#[cfg(test)]
pub mod test_utils;
