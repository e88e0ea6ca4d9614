//! Content digests and file equality
//!
//! Two files are the same when their SHA-256 digests match. Digests are
//! computed by streaming the file in fixed-size chunks, so memory use does
//! not depend on file size. A size mismatch short-circuits to "different"
//! before any content is read.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::{Error, Result};

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Bytes read per chunk while digesting.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Compute the SHA-256 checksum of in-memory content.
///
/// Returns a string in the canonical format `"sha256:<hex>"`.
pub fn compute_content_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the SHA-256 checksum of a file's contents without loading it whole.
///
/// Returns a string in the canonical format `"sha256:<hex>"`.
pub fn compute_file_checksum(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let read = match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::io(path, e)),
        };
        hasher.update(&buf[..read]);
    }

    Ok(format!("{}{:x}", PREFIX, hasher.finalize()))
}

/// Decide whether `replica` already holds the same bytes as `source`.
///
/// Both paths must name existing regular files. Timestamps, permissions and
/// ownership are ignored.
pub fn files_match(source: &Path, replica: &Path) -> Result<bool> {
    let source_len = std::fs::metadata(source)
        .map_err(|e| Error::io(source, e))?
        .len();
    let replica_len = std::fs::metadata(replica)
        .map_err(|e| Error::io(replica, e))?
        .len();

    if source_len != replica_len {
        tracing::trace!(?source, ?replica, "size differs, skipping digest");
        return Ok(false);
    }

    Ok(compute_file_checksum(source)? == compute_file_checksum(replica)?)
}

/// Compare size and modification time only.
///
/// Unsound as an equality test: equal metadata does not imply equal bytes,
/// and a touched file with unchanged bytes reports a mismatch. Only suitable
/// for reporting, never for deciding whether to copy.
pub fn metadata_matches(source: &Path, replica: &Path) -> Result<bool> {
    let a = std::fs::metadata(source).map_err(|e| Error::io(source, e))?;
    let b = std::fs::metadata(replica).map_err(|e| Error::io(replica, e))?;
    let a_mtime = a.modified().map_err(|e| Error::io(source, e))?;
    let b_mtime = b.modified().map_err(|e| Error::io(replica, e))?;
    Ok(a.len() == b.len() && a_mtime == b_mtime)
}
