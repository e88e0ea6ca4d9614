//! Repeating mirror command
//!
//! Runs a pass, sleeps for the interval, and repeats until Ctrl-C. Passes
//! run on the blocking pool; an interrupt that arrives mid-pass lets the
//! pass finish and stops before the next one.

use std::time::Duration;

use colored::Colorize;
use mirror_core::{MirrorSettings, PassResult, run_once};
use tokio::task::JoinHandle;

use super::{prepare_replica, resolve_settings};
use crate::cli::SessionArgs;
use crate::error::{CliError, Result};
use crate::interactive::Needs;
use crate::logging;
use crate::render::{self, ConsoleSink};

/// Mirror on an interval until interrupted.
pub fn run_watch(session: &SessionArgs, interval: Option<Duration>, verbose: bool) -> Result<()> {
    let settings = resolve_settings(
        session,
        interval,
        Needs {
            interval: true,
            log_file: true,
        },
    )?;
    let interval = settings.require_interval()?;

    logging::init(settings.log_file.as_deref(), verbose)?;
    tracing::info!("Synchronization application started.");
    tracing::info!(
        "Synchronization interval was set to {} seconds.",
        interval.as_secs()
    );
    prepare_replica(&settings, false)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let cycles = runtime.block_on(watch_loop(&settings, interval))?;

    println!("{}", "Goodbye!".bold());
    tracing::info!(cycles, "Synchronization application stopped.");
    Ok(())
}

/// Returns the number of passes run.
async fn watch_loop(settings: &MirrorSettings, interval: Duration) -> Result<u64> {
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut stopping = false;
    let mut cycles = 0u64;

    loop {
        println!(
            "{} {}",
            "Starting synchronization...".cyan(),
            format!("[{}]", render::timestamp()).dimmed()
        );

        let mut pass = spawn_pass(settings);
        let joined = tokio::select! {
            joined = &mut pass => joined,
            _ = &mut ctrl_c, if !stopping => {
                stopping = true;
                tracing::info!("Interrupt received, finishing the current pass");
                pass.await
            }
        };
        let result =
            joined.map_err(|e| CliError::user(format!("Synchronization pass aborted: {e}")))?;
        cycles += 1;

        render::print_pass_report(&result);
        if let Some(failure) = &result.failure {
            tracing::error!(cycle = cycles, "Synchronization pass failed: {failure}");
        }
        if stopping {
            break;
        }

        println!(
            "{} {}",
            "Synchronization complete.".cyan(),
            format!("[{}]", render::timestamp()).dimmed()
        );
        println!(
            "Repeat in {} seconds. {}",
            interval.as_secs(),
            "(press CTRL+C to end)".dimmed()
        );

        tokio::select! {
            _ = &mut ctrl_c => break,
            () = tokio::time::sleep(interval) => {}
        }
    }

    Ok(cycles)
}

fn spawn_pass(settings: &MirrorSettings) -> JoinHandle<PassResult> {
    let source = settings.source.clone();
    let replica = settings.replica.clone();
    tokio::task::spawn_blocking(move || run_once(&source, &replica, &mut ConsoleSink::new()))
}
