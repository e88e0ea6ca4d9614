//! Error types for mirror-core

/// Result type for mirror-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Interval string could not be understood
    #[error("Invalid interval '{value}': {reason}")]
    InvalidInterval { value: String, reason: String },

    /// A required setting was given neither on the command line nor in config
    #[error("Missing setting: {name}")]
    MissingSetting { name: String },

    /// Filesystem error from mirror-fs
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),
}
