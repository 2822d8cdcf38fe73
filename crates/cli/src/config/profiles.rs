// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `[profile.<category>]` overrides.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::duration;
use crate::profile::{CategoryProfile, LatencyRange, MetricBand, ProfileTable};

/// One `[profile.<category>]` table. Every field is optional when the
/// category already has a builtin profile.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    /// `["300ms", "2s"]`.
    #[serde(default, deserialize_with = "duration::deserialize_range")]
    pub latency: Option<LatencyRange>,

    #[serde(default)]
    pub failure_rate: Option<f64>,

    /// `[min, max]` in percent.
    #[serde(default)]
    pub confidence: Option<[f64; 2]>,

    #[serde(default)]
    pub accuracy: Option<[f64; 2]>,

    /// Message recorded on injected failures.
    #[serde(default)]
    pub error: Option<String>,
}

impl ProfileConfig {
    /// Layer this table over `base`, which is `None` for a new category.
    fn apply(&self, category: &str, base: Option<&CategoryProfile>) -> Result<CategoryProfile, String> {
        let latency = self
            .latency
            .or(base.map(|b| b.latency))
            .ok_or_else(|| "latency is required for a new category".to_string())?;
        let failure_rate = self
            .failure_rate
            .or(base.map(|b| b.failure_rate))
            .ok_or_else(|| "failure_rate is required for a new category".to_string())?;
        let error = self
            .error
            .clone()
            .or_else(|| base.map(|b| b.error.clone()))
            .unwrap_or_else(|| format!("{category} check failed"));

        let band = |[min, max]: [f64; 2]| MetricBand::new(min, max);
        let mut profile = CategoryProfile::new(latency, failure_rate, error);
        profile.confidence = self.confidence.map(band).or(base.and_then(|b| b.confidence));
        profile.accuracy = self.accuracy.map(band).or(base.and_then(|b| b.accuracy));

        profile.validate()?;
        Ok(profile)
    }
}

/// Apply every override to `table`.
pub(super) fn merge(
    mut table: ProfileTable,
    overrides: &BTreeMap<String, ProfileConfig>,
) -> Result<ProfileTable, String> {
    for (category, config) in overrides {
        let profile = config
            .apply(category, table.get(category))
            .map_err(|message| format!("profile.{category}: {message}"))?;
        table.insert(category.clone(), profile);
    }
    Ok(table)
}
