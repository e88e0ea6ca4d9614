//! Directory snapshots and name lookup
//!
//! A [`DirectorySnapshot`] lists the immediate children of one directory at
//! one instant. It is built once per directory visit and answers
//! "is there a child called `name`?" in constant time.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::{Error, Result, checksum};

/// Kind of node an entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
    /// A link seen without following it ([`LinkPolicy::Preserve`] only).
    Symlink,
}

/// How a snapshot treats symbolic links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkPolicy {
    /// Classify a link by its target. Dangling links are skipped.
    #[default]
    Follow,
    /// Report every link as [`EntryKind::Symlink`] and never look through it.
    Preserve,
}

impl EntryKind {
    /// Classify a directory entry. `None` for anything that is neither a
    /// regular file, a directory, nor (when preserved) a link.
    fn of(item: &fs::DirEntry, links: LinkPolicy) -> Result<Option<Self>> {
        let path = item.path();
        let mut file_type = item.file_type().map_err(|e| Error::io(&path, e))?;

        if file_type.is_symlink() {
            if links == LinkPolicy::Preserve {
                return Ok(Some(Self::Symlink));
            }
            file_type = match fs::metadata(&path) {
                Ok(meta) => meta.file_type(),
                // dangling link
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(Error::io(&path, e)),
            };
        }

        Ok(if file_type.is_dir() {
            Some(Self::Directory)
        } else if file_type.is_file() {
            Some(Self::File)
        } else {
            None
        })
    }
}

/// One filesystem node seen during a traversal.
///
/// Size, modification time and digest are read from disk on request and
/// never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystemEntry {
    name: OsString,
    path: PathBuf,
    kind: EntryKind,
}

impl FileSystemEntry {
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }

    pub fn size(&self) -> Result<u64> {
        fs::metadata(&self.path)
            .map(|m| m.len())
            .map_err(|e| Error::io(&self.path, e))
    }

    pub fn modified(&self) -> Result<SystemTime> {
        fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .map_err(|e| Error::io(&self.path, e))
    }

    /// Content digest in `sha256:<hex>` form. Only valid for files.
    pub fn digest(&self) -> Result<String> {
        checksum::compute_file_checksum(&self.path)
    }
}

/// The children of one directory, keyed by exact name.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    dir: PathBuf,
    entries: Vec<FileSystemEntry>,
    by_name: HashMap<OsString, usize>,
}

impl DirectorySnapshot {
    /// List `dir`, following links.
    ///
    /// Fails with [`Error::NotADirectory`] if `dir` is missing or not a
    /// directory. Entries come back sorted by name so that traversal order
    /// does not depend on the filesystem.
    pub fn read(dir: &Path) -> Result<Self> {
        Self::read_with(dir, LinkPolicy::Follow)
    }

    /// List `dir`, treating links according to `links`.
    pub fn read_with(dir: &Path, links: LinkPolicy) -> Result<Self> {
        ensure_directory(dir)?;

        let mut entries = Vec::new();
        for item in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
            let item = item.map_err(|e| Error::io(dir, e))?;
            match EntryKind::of(&item, links)? {
                Some(kind) => entries.push(FileSystemEntry {
                    name: item.file_name(),
                    path: item.path(),
                    kind,
                }),
                None => tracing::debug!(path = ?item.path(), "skipping entry that is neither file nor directory"),
            }
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let by_name = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.name.clone(), idx))
            .collect();

        Ok(Self {
            dir: dir.to_path_buf(),
            entries,
            by_name,
        })
    }

    /// The directory this snapshot was taken of.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Find the child called exactly `name`.
    pub fn lookup(&self, name: &OsStr) -> Option<&FileSystemEntry> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn entries(&self) -> &[FileSystemEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a DirectorySnapshot {
    type Item = &'a FileSystemEntry;
    type IntoIter = std::slice::Iter<'a, FileSystemEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Fail with [`Error::NotADirectory`] unless `path` is an existing directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::NotADirectory {
            path: path.to_path_buf(),
        })
    }
}

/// Reject root pairs where one tree contains the other.
///
/// Both roots must exist. Paths are canonicalized first so that `.`/`..`
/// and links cannot hide the overlap.
pub fn ensure_disjoint(source: &Path, replica: &Path) -> Result<()> {
    let source_real = dunce::canonicalize(source).map_err(|e| Error::io(source, e))?;
    let replica_real = dunce::canonicalize(replica).map_err(|e| Error::io(replica, e))?;

    if source_real.starts_with(&replica_real) || replica_real.starts_with(&source_real) {
        return Err(Error::NestedReplica {
            source_root: source.to_path_buf(),
            replica: replica.to_path_buf(),
        });
    }
    Ok(())
}
