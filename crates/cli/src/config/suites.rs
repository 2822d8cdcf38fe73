// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `[[suite]]` and `[[suite.test]]` definitions.

use std::collections::HashSet;

use serde::Deserialize;

use crate::fixtures::builtin_suites;
use crate::model::{Priority, TestCase, TestSuite};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    pub id: String,

    /// Display name (defaults to the id).
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: String,

    /// Tests in execution order.
    #[serde(default, rename = "test")]
    pub tests: Vec<TestConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestConfig {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: String,

    /// Selects the executor profile.
    pub category: String,

    #[serde(default)]
    pub priority: Priority,
}

impl TestConfig {
    fn to_case(&self) -> TestCase {
        TestCase::new(
            &self.id,
            self.name.as_deref().unwrap_or(&self.id),
            &self.category,
        )
        .with_description(&self.description)
        .with_priority(self.priority)
    }
}

impl SuiteConfig {
    fn to_suite(&self) -> TestSuite {
        TestSuite::new(&self.id, self.name.as_deref().unwrap_or(&self.id))
            .with_description(&self.description)
            .with_tests(self.tests.iter().map(TestConfig::to_case).collect())
    }
}

/// Build suites, checking that ids are present and unique.
pub(super) fn build(configs: &[SuiteConfig]) -> Result<Vec<TestSuite>, String> {
    if configs.is_empty() {
        return Ok(builtin_suites());
    }

    let mut suite_ids = HashSet::new();
    let mut test_ids = HashSet::new();
    for suite in configs {
        if suite.id.trim().is_empty() {
            return Err("suite id must not be empty".to_string());
        }
        if !suite_ids.insert(suite.id.as_str()) {
            return Err(format!("duplicate suite id `{}`", suite.id));
        }
        for test in &suite.tests {
            if test.id.trim().is_empty() {
                return Err(format!("suite `{}`: test id must not be empty", suite.id));
            }
            if test.category.trim().is_empty() {
                return Err(format!("test `{}`: category must not be empty", test.id));
            }
            if !test_ids.insert(test.id.as_str()) {
                return Err(format!("duplicate test id `{}`", test.id));
            }
        }
    }

    Ok(configs.iter().map(SuiteConfig::to_suite).collect())
}
