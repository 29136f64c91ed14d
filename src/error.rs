use std::path::PathBuf;

use thiserror::Error;

/// Shared `Result` alias for the crate.
pub type Result<T> = std::result::Result<T, LogStripError>;

/// Error types for reading, rewriting and configuring a sweep
#[derive(Debug, Error)]
pub enum LogStripError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid UTF-8 in file: {}", path.display())]
    InvalidUtf8 { path: PathBuf },

    #[error("File changed on disk since it was read: {} (expected {expected}, got {actual})", path.display())]
    ChangedOnDisk {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("Failed to parse config {}: {details}", path.display())]
    ConfigParse { path: PathBuf, details: String },
}

impl LogStripError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LogStripError::Io {
            path: path.into(),
            source,
        }
    }
}
