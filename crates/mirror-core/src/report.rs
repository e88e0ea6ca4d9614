//! Per-pass outcome reporting

use std::time::Duration;

use serde::Serialize;

use crate::Error;
use crate::events::{EventKind, EventSink, MirrorEvent};

/// How many events of each kind a pass produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventCounts {
    pub copied: usize,
    pub overwritten: usize,
    pub directories_created: usize,
    pub removed: usize,
    pub directories_removed: usize,
    pub path_errors: usize,
}

impl EventCounts {
    pub fn add(&mut self, kind: EventKind) {
        match kind {
            EventKind::Copied => self.copied += 1,
            EventKind::Overwritten => self.overwritten += 1,
            EventKind::DirectoryCreated => self.directories_created += 1,
            EventKind::Removed => self.removed += 1,
            EventKind::DirectoryRemoved => self.directories_removed += 1,
            EventKind::PathError => self.path_errors += 1,
        }
    }

    /// Number of filesystem changes made (errors excluded).
    pub fn total_changes(&self) -> usize {
        self.copied
            + self.overwritten
            + self.directories_created
            + self.removed
            + self.directories_removed
    }
}

/// Result of one prune-then-synchronize pass.
///
/// A pass that stopped early still carries the counts of everything it did
/// before the failure.
#[derive(Debug)]
pub struct PassResult {
    pub counts: EventCounts,
    /// First error hit; the pass stopped there.
    pub failure: Option<Error>,
    pub elapsed: Duration,
}

impl PassResult {
    pub fn success(&self) -> bool {
        self.failure.is_none()
    }

    /// True when the pass completed and changed nothing.
    pub fn is_noop(&self) -> bool {
        self.success() && self.counts.total_changes() == 0
    }

    /// Serializable view for scripting output.
    pub fn summary(&self) -> PassSummary {
        PassSummary {
            success: self.success(),
            counts: self.counts,
            failure: self.failure.as_ref().map(ToString::to_string),
            elapsed_ms: u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Plain-data form of a [`PassResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    pub success: bool,
    #[serde(flatten)]
    pub counts: EventCounts,
    pub failure: Option<String>,
    pub elapsed_ms: u64,
}

/// Forwards events to another sink while tallying them.
pub(crate) struct CountingSink<'a> {
    inner: &'a mut dyn EventSink,
    counts: EventCounts,
}

impl<'a> CountingSink<'a> {
    pub(crate) fn new(inner: &'a mut dyn EventSink) -> Self {
        Self {
            inner,
            counts: EventCounts::default(),
        }
    }

    pub(crate) fn counts(&self) -> EventCounts {
        self.counts
    }
}

impl EventSink for CountingSink<'_> {
    fn record(&mut self, event: MirrorEvent) {
        self.counts.add(event.kind());
        self.inner.record(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventLog;
    use std::path::PathBuf;

    #[test]
    fn counting_sink_forwards_and_counts() {
        let mut log = EventLog::new();
        let mut counting = CountingSink::new(&mut log);

        counting.record(MirrorEvent::DirectoryCreated {
            path: PathBuf::from("r/sub"),
        });
        counting.record(MirrorEvent::Copied {
            name: "a".into(),
            dest_dir: PathBuf::from("r"),
        });
        counting.record(MirrorEvent::PathError {
            path: PathBuf::from("r/x"),
            reason: "gone".into(),
        });
        let counts = counting.counts();

        assert_eq!(counts.directories_created, 1);
        assert_eq!(counts.copied, 1);
        assert_eq!(counts.path_errors, 1);
        assert_eq!(counts.total_changes(), 2);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn summary_flattens_counts() {
        let result = PassResult {
            counts: EventCounts {
                copied: 2,
                ..EventCounts::default()
            },
            failure: None,
            elapsed: Duration::from_millis(5),
        };

        let json = serde_json::to_value(result.summary()).unwrap();
        assert_eq!(json["copied"], 2);
        assert_eq!(json["success"], true);
        assert!(json["failure"].is_null());
    }
}
