//! A single mirror pass

use std::path::Path;
use std::time::Instant;

use mirror_fs::{ensure_directory, ensure_disjoint};

use super::{prune, synchronize};
use crate::Result;
use crate::events::{EventSink, MirrorEvent};
use crate::report::{CountingSink, PassResult};

/// Run one full pass: validate the roots, prune the replica, then
/// synchronize it from the source.
///
/// Never panics and never returns early with an error: the first failure is
/// stored in [`PassResult::failure`] together with the counts of everything
/// done before it, so a long-running caller can log it and try again on the
/// next cycle.
pub fn run_once(source_root: &Path, replica_root: &Path, sink: &mut dyn EventSink) -> PassResult {
    let _span = tracing::info_span!(
        "pass",
        source = %source_root.display(),
        replica = %replica_root.display()
    )
    .entered();
    let started = Instant::now();
    let mut counting = CountingSink::new(sink);

    let outcome = validate_roots(source_root, replica_root, &mut counting)
        .and_then(|()| prune(source_root, replica_root, &mut counting))
        .and_then(|()| synchronize(source_root, replica_root, &mut counting));

    let counts = counting.counts();
    let elapsed = started.elapsed();
    match &outcome {
        Ok(()) => tracing::info!(changes = counts.total_changes(), ?elapsed, "pass complete"),
        Err(e) => tracing::error!(error = %e, changes = counts.total_changes(), "pass failed"),
    }

    PassResult {
        counts,
        failure: outcome.err(),
        elapsed,
    }
}

fn validate_roots(source_root: &Path, replica_root: &Path, sink: &mut dyn EventSink) -> Result<()> {
    let checks = ensure_directory(source_root)
        .and_then(|()| ensure_directory(replica_root))
        .and_then(|()| ensure_disjoint(source_root, replica_root));

    checks.map_err(|e| {
        let path = e.path().unwrap_or(replica_root).to_path_buf();
        sink.record(MirrorEvent::PathError {
            path,
            reason: e.to_string(),
        });
        e.into()
    })
}
