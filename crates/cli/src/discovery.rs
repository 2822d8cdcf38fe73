//! Config file discovery.
//!
//! Walks from the current directory up to the git root looking for proctor.toml.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name of the config file.
pub const CONFIG_FILE: &str = "proctor.toml";

/// Find proctor.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Resolve config path from CLI arg, env var, or discovery.
///
/// Priority:
/// 1. CLI flag `-C`/`--config` (handled by clap with env = "PROCTOR_CONFIG")
/// 2. Discovery from current directory up to git root
/// 3. None (builtin suites and profiles)
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path.to_path_buf()),
        }),
        None => Ok(find_config(cwd)),
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
