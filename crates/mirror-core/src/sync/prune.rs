//! Mirror-delete: remove replica entries the source no longer backs

use std::path::Path;

use mirror_fs::{EntryKind, files_match, io};

use super::{WorkStack, schedule, snapshot_pair};
use crate::Result;
use crate::events::{EventSink, MirrorEvent};

/// Remove from `replica` every entry without a matching source entry.
///
/// A replica file is removed when the source has no entry of that name,
/// has a directory of that name, or has a file with different content.
/// A replica directory is removed whole when the source has no directory
/// of that name; otherwise it is descended into. A replica link is removed
/// as an entry and never followed.
///
/// Must run before [`synchronize`](super::synchronize) in a pass: files
/// removed here for stale content are recreated there.
///
/// # Errors
///
/// Stops at the first directory that cannot be listed or entry that cannot
/// be compared or deleted.
pub fn prune(source: &Path, replica: &Path, sink: &mut dyn EventSink) -> Result<()> {
    let mut stack: WorkStack = vec![(source.to_path_buf(), replica.to_path_buf())];

    while let Some((source_dir, replica_dir)) = stack.pop() {
        let (source_snapshot, replica_snapshot) = snapshot_pair(&source_dir, &replica_dir, sink)?;
        let mut descend = Vec::new();

        for entry in &replica_snapshot {
            let counterpart = source_snapshot.lookup(entry.name());

            match (entry.kind(), counterpart.map(|c| c.kind())) {
                (EntryKind::File, Some(EntryKind::File)) => {
                    let source_file = source_dir.join(entry.name());
                    if files_match(&source_file, entry.path())? {
                        continue;
                    }
                    tracing::debug!(path = ?entry.path(), "content differs from source");
                    io::remove_file(entry.path())?;
                }
                (EntryKind::File, other) => {
                    if other.is_some() {
                        tracing::warn!(path = ?entry.path(), "replica file shadows a source directory");
                    }
                    io::remove_file(entry.path())?;
                }
                (EntryKind::Symlink, _) => {
                    tracing::debug!(path = ?entry.path(), "removing link from replica");
                    io::remove_link(entry.path())?;
                }
                (EntryKind::Directory, Some(EntryKind::Directory)) => {
                    descend.push((source_dir.join(entry.name()), entry.path().to_path_buf()));
                    continue;
                }
                (EntryKind::Directory, other) => {
                    if other.is_some() {
                        tracing::warn!(path = ?entry.path(), "replica directory shadows a source file");
                    }
                    io::remove_tree(entry.path())?;
                    sink.record(MirrorEvent::DirectoryRemoved {
                        path: entry.path().to_path_buf(),
                    });
                    continue;
                }
            }

            sink.record(MirrorEvent::Removed {
                name: entry.name().to_owned(),
                dir: replica_dir.clone(),
            });
        }

        schedule(&mut stack, descend);
    }

    Ok(())
}
