//! Timestamped sibling backups taken before a document is rewritten
//!
//! A backup of `GOAP/GOAP.yyp` written at 14:03:07 on 2026-10-18 is
//! `GOAP/GOAP.yyp.bak.20261018-140307`. A second backup of the same file in
//! the same second gets a numeric suffix (`.1`, `.2`, ...) so an earlier
//! backup is never overwritten.

use std::fs;

use crate::{Error, NormalizedPath, Result};

/// Stamp format used in backup file names.
pub fn backup_stamp() -> String {
    chrono::Local::now().format("%Y%m%d-%H%M%S").to_string()
}

/// First free backup path for `path` with the given stamp.
pub fn next_backup_path(path: &NormalizedPath, stamp: &str) -> NormalizedPath {
    let file_name = path.file_name().unwrap_or_default();
    let base = path.with_file_name(&format!("{file_name}.bak.{stamp}"));
    if !base.exists() {
        return base;
    }
    (1..)
        .map(|n| path.with_file_name(&format!("{file_name}.bak.{stamp}.{n}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(base)
}

/// Copy `path` to its next free backup location and return that location.
pub fn create_backup(path: &NormalizedPath, stamp: &str) -> Result<NormalizedPath> {
    let backup = next_backup_path(path, stamp);
    fs::copy(path.to_native(), backup.to_native()).map_err(|e| Error::io(path.to_native(), e))?;
    tracing::debug!(source = %path, backup = %backup, "backup created");
    Ok(backup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_shape() {
        let stamp = backup_stamp();
        assert_eq!(stamp.len(), 15);
        assert_eq!(&stamp[8..9], "-");
    }

    #[test]
    fn backup_copies_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("GOAP.yyp"));
        fs::write(path.to_native(), "{}\n").unwrap();

        let backup = create_backup(&path, "20260101-000000").unwrap();

        assert!(backup.as_str().ends_with("GOAP.yyp.bak.20260101-000000"));
        assert_eq!(fs::read_to_string(backup.to_native()).unwrap(), "{}\n");
    }

    #[test]
    fn same_second_backups_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("Foo.yy"));
        fs::write(path.to_native(), "first").unwrap();
        let first = create_backup(&path, "20260101-000000").unwrap();

        fs::write(path.to_native(), "second").unwrap();
        let second = create_backup(&path, "20260101-000000").unwrap();

        assert_ne!(first, second);
        assert!(second.as_str().ends_with(".bak.20260101-000000.1"));
        assert_eq!(fs::read_to_string(first.to_native()).unwrap(), "first");
        assert_eq!(fs::read_to_string(second.to_native()).unwrap(), "second");
    }
}
