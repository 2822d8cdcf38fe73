// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-category execution profiles.
//!
//! A profile says how long a simulated test of that category takes, how
//! often it fails, and which quality metrics it reports on success. The
//! builtin table covers every category used by the builtin suites;
//! `[profile.<category>]` entries in proctor.toml override or extend it.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

/// Inclusive latency range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LatencyRange {
    #[serde(rename = "min_ms", serialize_with = "as_millis")]
    pub min: Duration,
    #[serde(rename = "max_ms", serialize_with = "as_millis")]
    pub max: Duration,
}

impl LatencyRange {
    pub const fn from_millis(min: u64, max: u64) -> Self {
        Self {
            min: Duration::from_millis(min),
            max: Duration::from_millis(max),
        }
    }
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Inclusive band for a synthetic quality score, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricBand {
    pub min: f64,
    pub max: f64,
}

impl MetricBand {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// How the simulated executor behaves for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryProfile {
    pub latency: LatencyRange,
    /// Probability in `[0, 1]` that an execution fails.
    pub failure_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<MetricBand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<MetricBand>,
    /// Message attached to injected failures.
    pub error: String,
}

impl CategoryProfile {
    pub fn new(latency: LatencyRange, failure_rate: f64, error: impl Into<String>) -> Self {
        Self {
            latency,
            failure_rate,
            confidence: None,
            accuracy: None,
            error: error.into(),
        }
    }

    /// Attach confidence and accuracy bands (AI-validation categories).
    pub fn with_metrics(mut self, confidence: MetricBand, accuracy: MetricBand) -> Self {
        self.confidence = Some(confidence);
        self.accuracy = Some(accuracy);
        self
    }

    /// Check ranges, returning a description of the first problem.
    pub fn validate(&self) -> Result<(), String> {
        if self.latency.min > self.latency.max {
            return Err(format!(
                "latency minimum {}ms exceeds maximum {}ms",
                self.latency.min.as_millis(),
                self.latency.max.as_millis()
            ));
        }
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(format!(
                "failure_rate {} is outside 0..=1",
                self.failure_rate
            ));
        }
        for (label, band) in [("confidence", self.confidence), ("accuracy", self.accuracy)] {
            let Some(band) = band else { continue };
            // Range checks also reject NaN bounds.
            if !(0.0..=100.0).contains(&band.min) || !(0.0..=100.0).contains(&band.max) {
                return Err(format!(
                    "{label} band {}..{} is outside 0..=100",
                    band.min, band.max
                ));
            }
            if band.min > band.max {
                return Err(format!(
                    "{label} minimum {} exceeds maximum {}",
                    band.min, band.max
                ));
            }
        }
        Ok(())
    }
}

/// Category name -> profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProfileTable {
    profiles: BTreeMap<String, CategoryProfile>,
}

impl ProfileTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Profiles for every builtin category.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (category, profile) in builtin_profiles() {
            table.insert(category, profile);
        }
        table
    }

    pub fn insert(&mut self, category: impl Into<String>, profile: CategoryProfile) {
        self.profiles.insert(category.into(), profile);
    }

    pub fn get(&self, category: &str) -> Option<&CategoryProfile> {
        self.profiles.get(category)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.profiles.contains_key(category)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profiles in category-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryProfile)> {
        self.profiles.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn builtin_profiles() -> Vec<(&'static str, CategoryProfile)> {
    let ai = |min, max, rate, error, confidence, accuracy| {
        CategoryProfile::new(LatencyRange::from_millis(min, max), rate, error)
            .with_metrics(confidence, accuracy)
    };
    let ui = |min, max, rate, error| {
        CategoryProfile::new(LatencyRange::from_millis(min, max), rate, error)
    };

    vec![
        // AI validation
        (
            "explainer",
            ai(
                800,
                1500,
                0.05,
                "Explanation generation failed",
                MetricBand::new(85.0, 95.0),
                MetricBand::new(88.0, 96.0),
            ),
        ),
        (
            "tutor",
            ai(
                600,
                1200,
                0.03,
                "Tutor response timed out",
                MetricBand::new(90.0, 98.0),
                MetricBand::new(92.0, 98.0),
            ),
        ),
        (
            "analyzer",
            ai(
                1200,
                2000,
                0.06,
                "Performance analysis incomplete",
                MetricBand::new(80.0, 92.0),
                MetricBand::new(82.0, 94.0),
            ),
        ),
        (
            "generator",
            ai(
                1000,
                2000,
                0.07,
                "Question generation produced an invalid item",
                MetricBand::new(78.0, 90.0),
                MetricBand::new(80.0, 92.0),
            ),
        ),
        (
            "predictor",
            ai(
                900,
                1800,
                0.10,
                "Score prediction diverged from baseline",
                MetricBand::new(70.0, 88.0),
                MetricBand::new(72.0, 90.0),
            ),
        ),
        // Student journey
        (
            "transition",
            ui(400, 800, 0.05, "Page transition did not complete"),
        ),
        (
            "realtime",
            ui(500, 1000, 0.08, "Realtime update was not received"),
        ),
        (
            "notification",
            ui(300, 600, 0.04, "Notification bell did not update"),
        ),
        (
            "performance",
            ui(800, 1500, 0.06, "Render budget exceeded"),
        ),
        // Admin dashboard
        (
            "security",
            ui(700, 1400, 0.05, "Access control check failed"),
        ),
        (
            "user_management",
            ui(500, 1000, 0.04, "User record update failed"),
        ),
        (
            "analytics",
            ui(800, 1600, 0.05, "Analytics aggregation mismatch"),
        ),
        ("content", ui(600, 1200, 0.04, "Content publish failed")),
        ("system", ui(700, 1300, 0.03, "System health probe failed")),
    ]
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
