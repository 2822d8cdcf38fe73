// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

const EXAMPLES: &str = "\
Examples:
  proctor list                      Show suites and their tests
  proctor run                       Run every suite in order
  proctor run ai-validation         Run one suite by id
  proctor run 2 --seed 7            Run the third suite reproducibly
  proctor run -o json --instant     Machine-readable run without waiting";

/// Runs simulated validation suites and narrates their progress
#[derive(Parser)]
#[command(name = "proctor")]
#[command(version, about, long_about = None, after_help = EXAMPLES)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "PROCTOR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List suites and their tests
    List(ListArgs),
    /// Run one suite or all of them
    Run(RunArgs),
    /// Show the effective category profiles
    Profiles(ListArgs),
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Suite id or zero-based index (default: every suite)
    #[arg(value_name = "SUITE")]
    pub suite: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Seed the simulated executor (overrides [run].seed)
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Drop the pauses between tests and between suites
    #[arg(long)]
    pub no_delay: bool,

    /// Skip simulated latency as well (implies --no-delay)
    #[arg(long)]
    pub instant: bool,
}

impl RunArgs {
    /// Whether pacing delays apply.
    pub fn paced(&self) -> bool {
        !(self.no_delay || self.instant)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    /// One JSON event per line, as they happen
    Ndjson,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
