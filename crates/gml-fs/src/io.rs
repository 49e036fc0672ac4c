//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Tuning knobs for writes on slow or contended filesystems.
#[derive(Debug, Clone, Copy)]
pub struct RobustnessConfig {
    /// Flush the temp file to disk before renaming it into place.
    pub enable_fsync: bool,
    /// Total time spent retrying the final rename (antivirus and editors on
    /// Windows briefly hold handles on freshly written project files).
    pub rename_retry: Duration,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            enable_fsync: true,
            rename_retry: Duration::from_millis(500),
        }
    }
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Acquires an advisory lock on the temp file while writing.
pub fn write_atomic(
    path: &NormalizedPath,
    content: &[u8],
    robustness: RobustnessConfig,
) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: native_path.clone(),
        })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;

    if robustness.enable_fsync {
        temp_file
            .sync_all()
            .map_err(|e| Error::io(&temp_path, e))?;
    }

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;
    drop(temp_file);

    if let Err(e) = rename_with_retry(&temp_path, &native_path, robustness.rename_retry) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}

/// Rename `from` to `to`, retrying transient failures for up to `budget`.
pub fn rename_with_retry(from: &Path, to: &Path, budget: Duration) -> Result<()> {
    let policy = ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_millis(20))
        .with_max_elapsed_time(Some(budget))
        .build();

    backoff::retry(policy, || {
        fs::rename(from, to).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => backoff::Error::permanent(e),
            _ => {
                tracing::debug!(from = %from.display(), error = %e, "rename failed, retrying");
                backoff::Error::transient(e)
            }
        })
    })
    .map_err(|e| match e {
        backoff::Error::Permanent(err) => Error::io(to, err),
        backoff::Error::Transient { err, .. } => Error::io(to, err),
    })
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically with default robustness settings.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes(), RobustnessConfig::default())
}
