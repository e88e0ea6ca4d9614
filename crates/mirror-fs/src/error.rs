//! Error types for mirror-fs

use std::path::PathBuf;

/// Result type for mirror-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not an existing directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Replica {replica} and source {source_root} overlap; one lies inside the other")]
    NestedReplica {
        source_root: PathBuf,
        replica: PathBuf,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The path the error is about, when it has one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. }
            | Self::NotADirectory { path }
            | Self::ConfigParse { path, .. }
            | Self::LockFailed { path } => Some(path),
            Self::NestedReplica { replica, .. } => Some(replica),
            Self::UnsupportedFormat { .. } => None,
        }
    }
}
