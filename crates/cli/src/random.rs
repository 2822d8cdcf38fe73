// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Injectable randomness for latency, failure and metric draws.
//!
//! Production runs use [`SeededRandom`] (seeded from entropy unless a seed
//! is configured). Tests script exact draws with [`ScriptedRandom`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send {
    fn next_unit(&mut self) -> f64;
}

/// `StdRng`-backed source. Two sources built from the same seed yield
/// identical sequences.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Values are clamped into `[0, 1)`. An empty script always yields `0.0`.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().map(clamp_unit).collect(),
            cursor: 0,
        }
    }

    /// Every draw returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new([value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Uniform integer in `[min, max]` (inclusive).
pub fn uniform_u64(rng: &mut dyn RandomSource, min: u64, max: u64) -> u64 {
    if max <= min {
        return min;
    }
    let span = (max - min) as f64 + 1.0;
    let offset = (rng.next_unit() * span).floor() as u64;
    min + offset.min(max - min)
}

/// Uniform float in `[min, max]`.
pub fn uniform_f64(rng: &mut dyn RandomSource, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    min + rng.next_unit() * (max - min)
}

#[cfg(test)]
#[path = "random_tests.rs"]
mod tests;
