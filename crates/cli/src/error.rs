// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// Proctor error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A run or reset was requested while another run is in flight.
    #[error("a run is already in progress")]
    RunInProgress,

    /// Suite selector did not match any suite.
    #[error("no such suite: {0}")]
    SuiteNotFound(String),

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type using proctor Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Every executed test passed
    Success = 0,
    /// One or more tests failed
    RunFailed = 1,
    /// Configuration or selection error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
    /// Run was cancelled (Ctrl-C)
    Interrupted = 130,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::SuiteNotFound(_) => ExitCode::ConfigError,
            Error::Io { .. } => ExitCode::InternalError,
            Error::RunInProgress => ExitCode::InternalError,
            Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
