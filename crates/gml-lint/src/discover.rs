//! Script discovery under a project root.

use globset::GlobSet;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use gml_fs::NormalizedPath;

/// Every file with `extension` under `root`, as sorted project-relative
/// paths. `.git` directories are skipped.
pub fn discover_scripts(root: &NormalizedPath, extension: &str) -> Result<Vec<NormalizedPath>> {
    let native_root = root.to_native();
    let mut files = Vec::new();

    let walker = WalkDir::new(&native_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git");

    for entry in walker {
        let entry = entry.map_err(|source| Error::Walk {
            path: native_root.clone(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let has_extension = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if !has_extension {
            continue;
        }
        let path = NormalizedPath::new(entry.path());
        if let Some(relative) = path.relative_to(root) {
            files.push(relative);
        }
    }

    tracing::debug!(root = %root, count = files.len(), "discovered scripts");
    Ok(files)
}

/// Scripts whose project-relative path matches `globs`.
pub fn discover_matching(
    root: &NormalizedPath,
    extension: &str,
    globs: &GlobSet,
) -> Result<Vec<NormalizedPath>> {
    Ok(discover_scripts(root, extension)?
        .into_iter()
        .filter(|p| globs.is_match(p.as_str()))
        .collect())
}
