//! Error types for gml-git

use std::path::PathBuf;

/// Result type for gml-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gml-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] gml_fs::Error),

    #[error("Not inside a git work tree: {path}")]
    NotARepository { path: PathBuf },

    #[error("Not tracked by git: {path}")]
    NotTracked { path: PathBuf },

    #[error("Path is outside the git work tree: {path}")]
    OutsideWorkdir { path: PathBuf },

    /// The file was renamed on disk but the index update failed.
    #[error("Moved {path} but could not update the git index: {source}")]
    StageFailed {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },
}

impl Error {
    /// True when the file already sits at its destination.
    pub fn file_was_moved(&self) -> bool {
        matches!(self, Self::StageFailed { .. })
    }
}
