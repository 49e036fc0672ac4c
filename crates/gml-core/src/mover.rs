//! File move backends
//!
//! Moves prefer recording the rename in the git index so history follows the
//! script. Untracked files, or projects outside a work tree, are renamed on
//! disk only.

use std::fmt;
use std::time::Duration;

use crate::Result;
use gml_fs::{NormalizedPath, RobustnessConfig};

/// How a file ended up at its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMethod {
    /// Renamed on disk and in the git index
    Git,
    /// Renamed on disk only
    Plain,
}

impl fmt::Display for MoveMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Git => f.write_str("git mv"),
            Self::Plain => f.write_str("mv"),
        }
    }
}

/// Trait for moving one file to a destination whose directory exists.
///
/// An existing destination file is replaced.
pub trait FileMover: Send + Sync {
    fn move_file(&self, src: &NormalizedPath, dst: &NormalizedPath) -> Result<MoveMethod>;
}

/// Plain rename, retried briefly on transient failures.
#[derive(Debug, Clone)]
pub struct PlainMover {
    retry_budget: Duration,
}

impl PlainMover {
    pub fn new(robustness: RobustnessConfig) -> Self {
        Self {
            retry_budget: robustness.rename_retry,
        }
    }
}

impl Default for PlainMover {
    fn default() -> Self {
        Self::new(RobustnessConfig::default())
    }
}

impl FileMover for PlainMover {
    fn move_file(&self, src: &NormalizedPath, dst: &NormalizedPath) -> Result<MoveMethod> {
        gml_fs::io::rename_with_retry(&src.to_native(), &dst.to_native(), self.retry_budget)?;
        Ok(MoveMethod::Plain)
    }
}

/// Index-aware move with a plain-rename fallback.
#[derive(Debug, Clone, Default)]
pub struct VcsAwareMover {
    fallback: PlainMover,
}

impl FileMover for VcsAwareMover {
    fn move_file(&self, src: &NormalizedPath, dst: &NormalizedPath) -> Result<MoveMethod> {
        match gml_git::stage_move(&src.to_native(), &dst.to_native()) {
            Ok(()) => Ok(MoveMethod::Git),
            Err(e) if e.file_was_moved() => {
                tracing::warn!(src = %src, dst = %dst, "moved on disk only: {e}");
                Ok(MoveMethod::Plain)
            }
            Err(e) => {
                tracing::debug!(src = %src, "git move unavailable ({e}), renaming");
                self.fallback.move_file(src, dst)
            }
        }
    }
}
