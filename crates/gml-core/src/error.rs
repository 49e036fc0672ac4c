//! Error types for gml-core

use std::path::PathBuf;

/// Result type for gml-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a reconciliation before or during mutation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The content file named by the operation does not exist
    #[error("Script content file not found: {path}")]
    ContentMissing { path: PathBuf },

    /// The metadata sibling of a content file does not exist
    #[error("Cannot proceed without metadata file {path}")]
    MissingMetadata { path: PathBuf, content: PathBuf },

    /// A move target is already taken and overwriting was not allowed
    #[error("Destination exists: {path} (use --force to overwrite)")]
    DestinationExists { path: PathBuf },

    #[error("Manifest not found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// A JSON document could not be read or has the wrong shape
    #[error("Failed to read/parse JSON {path}: {message}")]
    MalformedDocument { path: PathBuf, message: String },

    /// A path cannot be expressed relative to the manifest directory
    #[error("{path} is outside the project directory {project}")]
    OutsideProject { path: PathBuf, project: PathBuf },

    #[error("Invalid resource name '{name}': expected [A-Za-z_][A-Za-z0-9_]*")]
    InvalidName { name: String },

    #[error("Invalid source of truth '{value}': expected fs, metadata or manifest")]
    InvalidTruth { value: String },

    #[error("Invalid script glob '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    #[error("Failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },

    /// Filesystem error from gml-fs
    #[error(transparent)]
    Fs(#[from] gml_fs::Error),

    /// Configuration error from gml-meta
    #[error(transparent)]
    Meta(#[from] gml_meta::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
