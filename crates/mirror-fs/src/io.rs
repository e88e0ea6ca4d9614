//! Copy, create and delete primitives used by a mirror pass

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use filetime::FileTime;
use fs2::FileExt;

use crate::{Error, Result};

/// Copy `source` to `dest`, replacing `dest` if it exists.
///
/// The bytes are streamed into a temporary sibling of `dest` which holds an
/// exclusive advisory lock while it is written, then renamed into place, so
/// `dest` is never observed half-written. Permissions and the modification
/// time of `source` are carried over. The temporary file is removed if any
/// step fails.
pub fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    let temp_path = temp_sibling(dest);

    let result = copy_via_temp(source, dest, &temp_path);
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn copy_via_temp(source: &Path, dest: &Path, temp_path: &Path) -> Result<()> {
    let mut reader = File::open(source).map_err(|e| Error::io(source, e))?;
    let metadata = reader.metadata().map_err(|e| Error::io(source, e))?;

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: dest.to_path_buf(),
    })?;

    io::copy(&mut reader, &mut temp_file).map_err(|e| Error::io(temp_path, e))?;
    temp_file.flush().map_err(|e| Error::io(temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: dest.to_path_buf(),
    })?;
    drop(temp_file);

    fs::set_permissions(temp_path, metadata.permissions()).map_err(|e| Error::io(temp_path, e))?;
    fs::rename(temp_path, dest).map_err(|e| Error::io(dest, e))?;

    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_mtime(dest, mtime).map_err(|e| Error::io(dest, e))?;

    Ok(())
}

/// Temporary name in the same directory as `dest` (same filesystem, so the
/// final rename is atomic).
///
/// The name has a fixed length regardless of `dest`, so a destination whose
/// name is already at the filesystem limit can still be written.
fn temp_sibling(dest: &Path) -> PathBuf {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    let temp_name = format!(
        ".mirror-{}-{}.tmp",
        std::process::id(),
        NEXT.fetch_add(1, Ordering::Relaxed)
    );
    dest.with_file_name(temp_name)
}

/// Create a single empty directory. The parent must exist.
pub fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir(path).map_err(|e| Error::io(path, e))
}

/// Create a directory and any missing parents.
pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Delete one file.
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| Error::io(path, e))
}

/// Delete a directory and everything below it.
pub fn remove_tree(path: &Path) -> Result<()> {
    fs::remove_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Delete a symbolic link itself, never what it points to.
pub fn remove_link(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        // directory links on Windows are removed as directories
        Err(e) if cfg!(windows) => fs::remove_dir(path).map_err(|_| Error::io(path, e)),
        other => other.map_err(|e| Error::io(path, e)),
    }
}
