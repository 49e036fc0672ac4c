//! Top-level error for both binaries

pub type Result<T> = std::result::Result<T, CliError>;

/// Anything a command can fail with; every variant keeps its inner message.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] gml_core::Error),

    #[error(transparent)]
    Lint(#[from] gml_lint::Error),

    #[error(transparent)]
    Meta(#[from] gml_meta::Error),

    #[error(transparent)]
    Fs(#[from] gml_fs::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Missing or unreadable rule documents, reported with exit code 2.
    pub fn is_config_problem(&self) -> bool {
        use gml_meta::Error as MetaError;
        matches!(
            self,
            Self::Meta(MetaError::ConfigNotFound { .. } | MetaError::InvalidConfig { .. })
        )
    }
}
