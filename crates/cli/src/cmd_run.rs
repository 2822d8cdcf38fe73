// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run command implementation.

use std::sync::Arc;

use termcolor::StandardStream;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use proctor::cli::{Cli, OutputFormat, RunArgs};
use proctor::color::resolve_color;
use proctor::config::warn_unprofiled;
use proctor::error::ExitCode;
use proctor::output::json::{JsonFormatter, RunDocument};
use proctor::output::text::TextReporter;
use proctor::{
    ChannelReporter, Event, Executor, NullReporter, Orchestrator, Pacing, Reporter, RunSummary,
    SeededRandom, SimulatedExecutor, TestSuite,
};

/// Run the run command.
pub fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<ExitCode> {
    let config = crate::load_config(cli)?;
    let profiles = config.profile_table()?;
    let suites = config.test_suites()?;
    warn_unprofiled(&suites, &profiles);

    let random = match args.seed.or(config.run.seed) {
        Some(seed) => {
            tracing::debug!(seed, "seeded run");
            SeededRandom::from_seed(seed)
        }
        None => SeededRandom::from_entropy(),
    };
    let mut executor = SimulatedExecutor::with_random(profiles, random);
    if args.instant {
        executor = executor.instant();
    }
    let pacing = if args.paced() {
        config.run.pacing()
    } else {
        Pacing::none()
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let shutdown = CancellationToken::new();
    let plan = Plan {
        suites,
        executor,
        pacing,
        shutdown: shutdown.clone(),
        selector: args.suite.as_deref(),
    };

    let summary = runtime.block_on(async {
        let token = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::debug!("interrupt received, cancelling run");
                token.cancel();
            }
        });
        drive(plan, args.output).await
    })?;

    Ok(if shutdown.is_cancelled() {
        ExitCode::Interrupted
    } else if summary.failed > 0 {
        ExitCode::RunFailed
    } else {
        ExitCode::Success
    })
}

/// Everything a run needs except its reporter.
struct Plan<'a> {
    suites: Vec<TestSuite>,
    executor: SimulatedExecutor,
    pacing: Pacing,
    shutdown: CancellationToken,
    selector: Option<&'a str>,
}

impl Plan<'_> {
    fn orchestrator<R: Reporter>(self, reporter: R) -> Orchestrator<SimulatedExecutor, R> {
        Orchestrator::new(self.suites, self.executor, reporter)
            .with_pacing(self.pacing)
            .with_shutdown(self.shutdown)
    }
}

/// Run with the reporter and output `format` calls for.
async fn drive(plan: Plan<'_>, format: OutputFormat) -> anyhow::Result<RunSummary> {
    let selector = plan.selector;
    match format {
        OutputFormat::Text => {
            let reporter = Arc::new(TextReporter::new(StandardStream::stdout(resolve_color())));
            let orchestrator = plan.orchestrator(Arc::clone(&reporter));
            let summary = execute(&orchestrator, selector).await?;
            // run_all already reported its summary
            if selector.is_some() {
                reporter.write_summary(&summary);
            }
            Ok(summary)
        }
        OutputFormat::Json => {
            let orchestrator = plan.orchestrator(NullReporter);
            let summary = execute(&orchestrator, selector).await?;
            let suites = orchestrator.list_suites();
            JsonFormatter::new(std::io::stdout().lock())
                .write_run(&RunDocument::new(&summary, &suites))?;
            Ok(summary)
        }
        OutputFormat::Ndjson => {
            let (reporter, mut events) = ChannelReporter::channel();
            let orchestrator = plan.orchestrator(reporter);

            // Dropping the orchestrator closes the channel and ends the printer.
            let run = async move {
                let result = execute(&orchestrator, selector).await;
                drop(orchestrator);
                result
            };
            let print = async {
                let mut formatter = JsonFormatter::new(std::io::stdout().lock());
                while let Some(event) = events.recv().await {
                    formatter.write_event(&event)?;
                }
                Ok::<_, std::io::Error>(formatter)
            };
            let (result, printed) = tokio::join!(run, print);
            let mut formatter = printed?;
            let summary = result?;
            if selector.is_some() {
                formatter.write_event(&Event::RunCompleted {
                    summary: summary.clone(),
                })?;
            }
            Ok(summary)
        }
    }
}

/// Run every suite, or the one `selector` names, and summarize.
async fn execute<E: Executor, R: Reporter>(
    orchestrator: &Orchestrator<E, R>,
    selector: Option<&str>,
) -> proctor::Result<RunSummary> {
    let Some(selector) = selector else {
        return orchestrator.run_all().await;
    };
    let index = orchestrator.find_suite(selector)?;
    let started = Instant::now();
    let suite = orchestrator.run_suite(index).await?;
    let cancelled = !suite.is_complete();
    Ok(RunSummary::from_suites(
        std::slice::from_ref(&suite),
        started.elapsed(),
        cancelled,
    ))
}
