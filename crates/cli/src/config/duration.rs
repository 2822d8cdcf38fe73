// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Duration strings used for pacing delays and latency ranges.
//!
//! Accepts `"500ms"`, `"2s"`, `"1.5s"` and `"1m"`.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::profile::LatencyRange;

/// Parse a duration string.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }
    let invalid = || format!("invalid duration: {s}");

    // "ms" before "s" and "m".
    if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms.trim().parse().map_err(|_| invalid())?;
        return Ok(Duration::from_millis(n));
    }
    if let Some(secs) = s.strip_suffix('s') {
        let n: f64 = secs.trim().parse().map_err(|_| invalid())?;
        return Duration::try_from_secs_f64(n).map_err(|_| invalid());
    }
    if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins.trim().parse().map_err(|_| invalid())?;
        return Ok(Duration::from_secs(n.saturating_mul(60)));
    }

    Err(format!("invalid duration format: {s} (use 500ms, 2s, or 1m)"))
}

/// Render a duration the way it would be written in proctor.toml.
pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms == 0 {
        "0ms".to_string()
    } else if ms % 60_000 == 0 {
        format!("{}m", ms / 60_000)
    } else if ms % 1000 == 0 {
        format!("{}s", ms / 1000)
    } else {
        format!("{ms}ms")
    }
}

/// Deserialize an optional duration string.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    opt.map(|s| parse_duration(&s))
        .transpose()
        .map_err(serde::de::Error::custom)
}

/// Deserialize an optional `["min", "max"]` latency range.
///
/// Ordering is checked later, with the rest of the profile.
pub fn deserialize_range<'de, D>(deserializer: D) -> Result<Option<LatencyRange>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<[String; 2]> = Option::deserialize(deserializer)?;
    let Some([min, max]) = opt else {
        return Ok(None);
    };
    let min = parse_duration(&min).map_err(serde::de::Error::custom)?;
    let max = parse_duration(&max).map_err(serde::de::Error::custom)?;
    Ok(Some(LatencyRange { min, max }))
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
