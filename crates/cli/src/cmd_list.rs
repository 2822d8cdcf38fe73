// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `list` and `profiles` command implementations.

use serde::Serialize;
use termcolor::StandardStream;

use proctor::cli::{Cli, ListArgs, OutputFormat};
use proctor::color::resolve_color;
use proctor::error::ExitCode;
use proctor::output::json::JsonFormatter;
use proctor::output::text::TextFormatter;
use proctor::profile::CategoryProfile;

/// Profile line for `profiles -o ndjson`.
#[derive(Serialize)]
struct ProfileLine<'a> {
    category: &'a str,
    #[serde(flatten)]
    profile: &'a CategoryProfile,
}

/// Print the configured (or builtin) suites.
pub fn suites(cli: &Cli, args: &ListArgs) -> anyhow::Result<ExitCode> {
    let config = crate::load_config(cli)?;
    let suites = config.test_suites()?;

    match args.output {
        OutputFormat::Text => {
            TextFormatter::new(StandardStream::stdout(resolve_color())).write_suites(&suites)?;
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout().lock()).write_suites(&suites)?;
        }
        OutputFormat::Ndjson => {
            let mut formatter = JsonFormatter::new(std::io::stdout().lock());
            for suite in &suites {
                formatter.write_line(suite)?;
            }
        }
    }
    Ok(ExitCode::Success)
}

/// Print the effective category profiles.
pub fn profiles(cli: &Cli, args: &ListArgs) -> anyhow::Result<ExitCode> {
    let config = crate::load_config(cli)?;
    let profiles = config.profile_table()?;

    match args.output {
        OutputFormat::Text => {
            TextFormatter::new(StandardStream::stdout(resolve_color())).write_profiles(&profiles)?;
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout().lock()).write_profiles(&profiles)?;
        }
        OutputFormat::Ndjson => {
            let mut formatter = JsonFormatter::new(std::io::stdout().lock());
            for (category, profile) in profiles.iter() {
                formatter.write_line(&ProfileLine { category, profile })?;
            }
        }
    }
    Ok(ExitCode::Success)
}
