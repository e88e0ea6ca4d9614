//! Command implementations for the mirror CLI

pub mod once;
pub mod run;

pub use once::run_single;
pub use run::run_watch;

use std::time::Duration;

use colored::Colorize;
use mirror_core::{MirrorSettings, PartialSettings};

use crate::cli::SessionArgs;
use crate::error::Result;
use crate::interactive::{self, Needs};
use crate::render;

/// Layer command-line options over the settings file, prompt for the rest.
pub fn resolve_settings(
    session: &SessionArgs,
    interval: Option<Duration>,
    needs: Needs,
) -> Result<MirrorSettings> {
    let from_cli = PartialSettings {
        source: session.source.clone(),
        replica: session.replica.clone(),
        interval,
        log_file: session.log_file.clone(),
    };
    let from_file = match &session.config {
        Some(path) => PartialSettings::load(path)?,
        None => PartialSettings::default(),
    };

    let mut merged = from_cli.or(from_file);
    if interactive::can_prompt(session.no_prompt) {
        interactive::fill_missing(&mut merged, needs)?;
    }

    let settings = merged.resolve()?;
    if needs.interval {
        settings.require_interval()?;
    }
    Ok(settings)
}

/// Create the replica root if it does not exist yet.
///
/// `quiet` suppresses the console line (the log entry is always written).
pub fn prepare_replica(settings: &MirrorSettings, quiet: bool) -> Result<()> {
    if settings.replica.exists() {
        return Ok(());
    }
    mirror_fs::io::create_dir_all(&settings.replica)?;
    tracing::info!(replica = %settings.replica.display(), "created replica root");
    if quiet {
        return Ok(());
    }
    println!(
        "{} {}",
        format!(" > Created directory: '{}'", settings.replica.display()).green(),
        format!("[{}]", render::timestamp()).dimmed()
    );
    Ok(())
}
