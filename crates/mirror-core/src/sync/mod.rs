//! One-way tree reconciliation
//!
//! This module provides:
//! - **prune**: delete replica entries that have no matching source entry
//! - **synchronize**: create and update replica entries from the source
//! - **run_once**: one full pass, prune then synchronize
//!
//! Both walks are depth-first over an explicit stack of
//! `(source_dir, replica_dir)` pairs, so tree depth does not grow the call
//! stack. Every directory is listed afresh when it is visited.
//!
//! Source links are followed. Replica links are never followed: a link in
//! the replica is an entry to remove, so a pass cannot reach outside the
//! replica root.

mod pass;
mod prune;
mod push;

pub use pass::run_once;
pub use prune::prune;
pub use push::synchronize;

use std::path::{Path, PathBuf};

use mirror_fs::{DirectorySnapshot, LinkPolicy};

use crate::Result;
use crate::events::{EventSink, MirrorEvent};

/// Pending directory pairs, popped in name order.
type WorkStack = Vec<(PathBuf, PathBuf)>;

/// List both sides of a pair.
fn snapshot_pair(
    source_dir: &Path,
    replica_dir: &Path,
    sink: &mut dyn EventSink,
) -> Result<(DirectorySnapshot, DirectorySnapshot)> {
    let source = snapshot(source_dir, LinkPolicy::Follow, sink)?;
    let replica = snapshot(replica_dir, LinkPolicy::Preserve, sink)?;
    Ok((source, replica))
}

/// List `dir`, reporting a [`MirrorEvent::PathError`] if it cannot be used.
fn snapshot(dir: &Path, links: LinkPolicy, sink: &mut dyn EventSink) -> Result<DirectorySnapshot> {
    DirectorySnapshot::read_with(dir, links).map_err(|e| {
        sink.record(MirrorEvent::PathError {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        });
        e.into()
    })
}

/// Queue child pairs so the first-named child is visited first.
fn schedule(stack: &mut WorkStack, children: Vec<(PathBuf, PathBuf)>) {
    stack.extend(children.into_iter().rev());
}
