// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Proctor CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use proctor::cli::{Cli, Command};
use proctor::config::{self, Config};
use proctor::discovery;
use proctor::error::ExitCode;

mod cmd_list;
mod cmd_run;

fn init_logging() {
    let filter = EnvFilter::try_from_env("PROCTOR_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("proctor: {}", e);
            match e.downcast_ref::<proctor::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::List(args)) => cmd_list::suites(&cli, args),
        Some(Command::Profiles(args)) => cmd_list::profiles(&cli, args),
        Some(Command::Run(args)) => cmd_run::run(&cli, args),
    }
}

/// Load the explicit or discovered proctor.toml, or fall back to builtins.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let cwd = std::env::current_dir()?;
    match discovery::resolve_config(cli.config.as_deref(), &cwd)? {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            Ok(config::load_with_warnings(&path)?)
        }
        None => {
            tracing::debug!("no config found, using builtin suites");
            Ok(Config::default())
        }
    }
}
