//! Mirror-push: create and update replica entries from the source

use std::path::Path;

use mirror_fs::{EntryKind, files_match, io};

use super::{WorkStack, schedule, snapshot_pair};
use crate::Result;
use crate::events::{EventSink, MirrorEvent};

/// Make every source entry exist in `replica` with the same kind and bytes.
///
/// New files are copied, files whose content differs are overwritten, and
/// missing directories are created empty and then filled. A replica entry
/// of the wrong kind, or a link, is removed and replaced. Copies keep the
/// source modification time.
///
/// # Errors
///
/// Stops at the first directory that cannot be listed or entry that cannot
/// be compared, copied, created or removed.
pub fn synchronize(source: &Path, replica: &Path, sink: &mut dyn EventSink) -> Result<()> {
    let mut stack: WorkStack = vec![(source.to_path_buf(), replica.to_path_buf())];

    while let Some((source_dir, replica_dir)) = stack.pop() {
        let (source_snapshot, replica_snapshot) = snapshot_pair(&source_dir, &replica_dir, sink)?;
        let mut descend = Vec::new();

        for entry in &source_snapshot {
            let target = replica_dir.join(entry.name());
            let mut existing = replica_snapshot.lookup(entry.name()).map(|e| e.kind());
            if existing == Some(EntryKind::Symlink) {
                tracing::warn!(path = ?target, "replacing replica link");
                io::remove_link(&target)?;
                sink.record(MirrorEvent::Removed {
                    name: entry.name().to_owned(),
                    dir: replica_dir.clone(),
                });
                existing = None;
            }

            match (entry.kind(), existing) {
                // source snapshots follow links
                (EntryKind::Symlink, _) => continue,
                (EntryKind::File, Some(EntryKind::File)) => {
                    if files_match(entry.path(), &target)? {
                        continue;
                    }
                    io::copy_file(entry.path(), &target)?;
                    sink.record(MirrorEvent::Overwritten {
                        name: entry.name().to_owned(),
                        dest_dir: replica_dir.clone(),
                    });
                }
                (EntryKind::File, existing) => {
                    if existing == Some(EntryKind::Directory) {
                        tracing::warn!(path = ?target, "replacing replica directory with source file");
                        io::remove_tree(&target)?;
                        sink.record(MirrorEvent::DirectoryRemoved {
                            path: target.clone(),
                        });
                    }
                    io::copy_file(entry.path(), &target)?;
                    sink.record(MirrorEvent::Copied {
                        name: entry.name().to_owned(),
                        dest_dir: replica_dir.clone(),
                    });
                }
                (EntryKind::Directory, existing) => {
                    if existing == Some(EntryKind::File) {
                        tracing::warn!(path = ?target, "replacing replica file with source directory");
                        io::remove_file(&target)?;
                        sink.record(MirrorEvent::Removed {
                            name: entry.name().to_owned(),
                            dir: replica_dir.clone(),
                        });
                    }
                    if existing != Some(EntryKind::Directory) {
                        io::create_dir(&target)?;
                        sink.record(MirrorEvent::DirectoryCreated {
                            path: target.clone(),
                        });
                    }
                    descend.push((entry.path().to_path_buf(), target));
                }
            }
        }

        schedule(&mut stack, descend);
    }

    Ok(())
}
