//! Project file discovery shared by the audit and the inventory.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::{Error, Result};
use gml_fs::NormalizedPath;

/// Every file under `root` as sorted root-relative paths, `.git` skipped.
pub fn project_files(root: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
    let native = root.to_native();
    let mut files = Vec::new();
    for entry in WalkDir::new(&native)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
    {
        let entry = entry.map_err(|e| Error::Walk {
            path: native.clone(),
            message: e.to_string(),
        })?;
        if entry.file_type().is_file()
            && let Some(rel) = NormalizedPath::new(entry.path()).relative_to(root)
        {
            files.push(rel);
        }
    }
    Ok(files)
}

/// Compile root-relative globs; `*` does not cross `/`.
pub fn glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| Error::InvalidGlob {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| Error::InvalidGlob {
        pattern: patterns.join(", "),
        message: e.to_string(),
    })
}

/// True when `path` has `extension`, compared case-insensitively.
pub fn has_extension(path: &NormalizedPath, extension: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
