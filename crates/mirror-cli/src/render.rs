//! Console and log rendering of pass events

use colored::Colorize;
use mirror_core::{EventSink, MirrorEvent, PassResult};

/// Wall-clock stamp printed after console lines.
pub fn timestamp() -> String {
    chrono::Local::now().format("%d/%m/%Y %H:%M:%S").to_string()
}

/// One-line description of an event, without timestamp.
pub fn describe(event: &MirrorEvent) -> String {
    match event {
        MirrorEvent::Copied { name, dest_dir } => format!(
            " > Copied file: '{}' to directory: '{}'",
            name.to_string_lossy(),
            dest_dir.display()
        ),
        MirrorEvent::Overwritten { name, dest_dir } => format!(
            " > Overwritten file: '{}' (didn't match source), directory: '{}'",
            name.to_string_lossy(),
            dest_dir.display()
        ),
        MirrorEvent::DirectoryCreated { path } => {
            format!(" > Created directory: '{}'", path.display())
        }
        MirrorEvent::Removed { name, dir } => format!(
            " > Removed item: '{}' in directory: '{}'",
            name.to_string_lossy(),
            dir.display()
        ),
        MirrorEvent::DirectoryRemoved { path } => {
            format!(" > Removed directory: '{}'", path.display())
        }
        MirrorEvent::PathError { path, reason } => {
            format!(" ! Cannot use '{}': {}", path.display(), reason)
        }
    }
}

/// Sink that prints each event with a timestamp and logs it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink {
    /// Log only, print nothing (used with `--json`).
    quiet: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl EventSink for ConsoleSink {
    fn record(&mut self, event: MirrorEvent) {
        let line = describe(&event);
        match &event {
            MirrorEvent::PathError { .. } => tracing::error!("{}", line.trim_start()),
            _ => tracing::info!("{}", line.trim_start()),
        }
        if self.quiet {
            return;
        }

        let stamp = format!("[{}]", timestamp()).dimmed();
        let line = match &event {
            MirrorEvent::Copied { .. } | MirrorEvent::DirectoryCreated { .. } => line.green(),
            MirrorEvent::Overwritten { .. } => line.yellow(),
            MirrorEvent::Removed { .. } | MirrorEvent::DirectoryRemoved { .. } => line.normal(),
            MirrorEvent::PathError { .. } => line.red(),
        };
        println!("{line} {stamp}");
    }
}

/// Human summary of a finished pass.
pub fn summarize(result: &PassResult) -> String {
    let c = &result.counts;
    if c.total_changes() == 0 {
        return "No changes needed.".to_string();
    }
    let parts: Vec<String> = [
        (c.copied, "copied"),
        (c.overwritten, "overwritten"),
        (c.directories_created, "directories created"),
        (c.removed, "removed"),
        (c.directories_removed, "directories removed"),
    ]
    .into_iter()
    .filter(|(n, _)| *n > 0)
    .map(|(n, label)| format!("{n} {label}"))
    .collect();
    parts.join(", ")
}

/// Print the summary line, plus the failure if the pass stopped early.
pub fn print_pass_report(result: &PassResult) {
    if let Some(failure) = &result.failure {
        println!(
            "{} Synchronization stopped: {}",
            "ERROR".red().bold(),
            failure
        );
        if result.counts.total_changes() > 0 {
            println!("   Completed before the failure: {}", summarize(result));
        }
    } else {
        println!("{} {}", "OK".green().bold(), summarize(result));
    }
}
