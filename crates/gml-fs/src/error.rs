//! Error types for gml-fs

use std::path::PathBuf;

/// Result type for gml-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Filesystem and configuration-document errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    /// Configuration documents must be YAML, TOML or JSON
    #[error("Unsupported config format: .{extension}")]
    UnsupportedFormat { extension: String },

    /// Advisory lock on a temp file could not be taken or released
    #[error("Could not lock {path} for writing")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the error is an I/O error caused by a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
