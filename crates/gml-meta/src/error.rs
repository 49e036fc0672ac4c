//! Errors raised while locating and reading rule documents

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] gml_fs::Error),

    /// Neither an explicit path nor any default location held a document
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Rules in {path} are not usable: {message}")]
    InvalidConfig { path: PathBuf, message: String },
}
