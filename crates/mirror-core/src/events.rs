//! Events emitted while a pass runs
//!
//! The reconciliation code reports every side effect through an
//! [`EventSink`] handed to it by the caller. Rendering, timestamps and log
//! routing belong to the sink, not to the core.

use std::ffi::OsString;
use std::path::PathBuf;

/// A single observable outcome of a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorEvent {
    /// A file new to the replica was copied into `dest_dir`.
    Copied { name: OsString, dest_dir: PathBuf },
    /// An existing replica file with stale content was replaced.
    Overwritten { name: OsString, dest_dir: PathBuf },
    /// An empty directory was created in the replica.
    DirectoryCreated { path: PathBuf },
    /// A replica file was deleted from `dir`.
    Removed { name: OsString, dir: PathBuf },
    /// A replica directory and everything below it was deleted.
    DirectoryRemoved { path: PathBuf },
    /// A path could not be used; the branch below it was abandoned.
    PathError { path: PathBuf, reason: String },
}

impl MirrorEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Copied { .. } => EventKind::Copied,
            Self::Overwritten { .. } => EventKind::Overwritten,
            Self::DirectoryCreated { .. } => EventKind::DirectoryCreated,
            Self::Removed { .. } => EventKind::Removed,
            Self::DirectoryRemoved { .. } => EventKind::DirectoryRemoved,
            Self::PathError { .. } => EventKind::PathError,
        }
    }
}

/// Discriminant of [`MirrorEvent`], used for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Copied,
    Overwritten,
    DirectoryCreated,
    Removed,
    DirectoryRemoved,
    PathError,
}

/// Receiver of pass events.
pub trait EventSink {
    fn record(&mut self, event: MirrorEvent);
}

/// Sink that keeps every event in memory, in order.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<MirrorEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[MirrorEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<MirrorEvent> {
        self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for EventLog {
    fn record(&mut self, event: MirrorEvent) {
        self.events.push(event);
    }
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: MirrorEvent) {}
}
