// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles proctor.toml parsing with version validation and unknown key warnings.

mod duration;
mod profiles;
mod suites;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

pub use duration::{format_duration, parse_duration};
pub use profiles::ProfileConfig;
pub use suites::{SuiteConfig, TestConfig};

use crate::error::{Error, Result};
use crate::model::TestSuite;
use crate::orchestrator::Pacing;
use crate::profile::ProfileTable;

/// The only config version this build understands.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "run", "profile", "suite"];

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Full configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Pacing and randomness.
    #[serde(default)]
    pub run: RunConfig,

    /// Category profile overrides, keyed by category.
    #[serde(default, rename = "profile")]
    pub profiles: BTreeMap<String, ProfileConfig>,

    /// Suite definitions. Empty means the builtin suites.
    #[serde(default, rename = "suite")]
    pub suites: Vec<SuiteConfig>,

    /// File this config was read from, for error messages.
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

/// `[run]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Pause after each test (default 200ms).
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub test_delay: Option<Duration>,

    /// Pause between suites (default 500ms).
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub suite_delay: Option<Duration>,

    /// Seed for the simulated executor; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RunConfig {
    pub(crate) const DEFAULT_TEST_DELAY: Duration = Duration::from_millis(200);
    pub(crate) const DEFAULT_SUITE_DELAY: Duration = Duration::from_millis(500);

    pub fn pacing(&self) -> Pacing {
        Pacing::new(
            self.test_delay.unwrap_or(Self::DEFAULT_TEST_DELAY),
            self.suite_delay.unwrap_or(Self::DEFAULT_SUITE_DELAY),
        )
    }
}

impl Config {
    /// Builtin profiles with the configured overrides applied.
    pub fn profile_table(&self) -> Result<ProfileTable> {
        profiles::merge(ProfileTable::builtin(), &self.profiles).map_err(|message| self.error(message))
    }

    /// Configured suites, or the builtin ones when none are declared.
    pub fn test_suites(&self) -> Result<Vec<TestSuite>> {
        suites::build(&self.suites).map_err(|message| self.error(message))
    }

    fn error(&self, message: String) -> Error {
        Error::Config {
            message,
            path: self.path.clone(),
        }
    }
}

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    parse(&read(path)?, path)
}

/// Load config with warnings for unknown keys.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    parse_with_warnings(&read(path)?, path)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse config from string content, silently ignoring unknown keys.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    parse_checked(content, path, |_| {})
}

/// Parse config, warning on unknown top-level keys.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<Config> {
    parse_checked(content, path, |key| warn_unknown_key(path, key))
}

fn parse_checked(content: &str, path: &Path, mut on_unknown: impl FnMut(&str)) -> Result<Config> {
    let config_error = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    let table: toml::Table = toml::from_str(content).map_err(|e| config_error(e.to_string()))?;

    let version_check: VersionOnly = toml::Value::Table(table.clone())
        .try_into()
        .map_err(|e: toml::de::Error| config_error(e.to_string()))?;
    let version = version_check
        .version
        .ok_or_else(|| config_error("missing required field: version".to_string()))?;
    if version != SUPPORTED_VERSION {
        return Err(config_error(format!(
            "unsupported config version {version} (supported: {SUPPORTED_VERSION})\n  Upgrade proctor to use this config."
        )));
    }

    for key in table.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            on_unknown(key);
        }
    }

    let mut config: Config = toml::Value::Table(table)
        .try_into()
        .map_err(|e: toml::de::Error| config_error(e.to_string()))?;
    config.path = Some(path.to_path_buf());
    Ok(config)
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "proctor: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

/// Warn about tests whose category has no profile.
///
/// Such tests still run and fail with `unknown category`; this only makes
/// the misconfiguration visible before the run starts.
pub fn warn_unprofiled(suites: &[TestSuite], profiles: &ProfileTable) -> usize {
    let mut count = 0;
    for suite in suites {
        for test in suite.tests.iter().filter(|t| !profiles.contains(&t.category)) {
            tracing::warn!(suite = %suite.id, test = %test.id, category = %test.category, "no profile for category");
            eprintln!(
                "proctor: warning: test `{}` in suite `{}` uses unknown category `{}`",
                test.id, suite.id, test.category
            );
            count += 1;
        }
    }
    count
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
