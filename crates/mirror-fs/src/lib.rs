//! Filesystem layer for Folder Mirror
//!
//! Directory snapshots with exact-name lookup, streaming content digests,
//! and the copy/create/delete primitives a mirror pass is built from.

pub mod checksum;
pub mod config;
pub mod error;
pub mod index;
pub mod io;

pub use checksum::{compute_file_checksum, files_match};
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use index::{
    DirectorySnapshot, EntryKind, FileSystemEntry, LinkPolicy, ensure_directory, ensure_disjoint,
};
