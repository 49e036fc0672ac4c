//! Git fixtures for tests that exercise index-aware moves.

use std::path::Path;

/// Initialise a real repository with `git2`. No commit, no config.
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Add every file under the work tree to the index.
///
/// # Panics
/// Panics if the index cannot be updated.
pub fn stage_all(repo: &git2::Repository) {
    let mut index = repo
        .index()
        .unwrap_or_else(|e| panic!("stage_all: failed to open index: {e}"));
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .unwrap_or_else(|e| panic!("stage_all: add_all failed: {e}"));
    index
        .write()
        .unwrap_or_else(|e| panic!("stage_all: failed to write index: {e}"));
}

/// True when `relative` has an entry in the repository's index.
///
/// # Panics
/// Panics if the index cannot be read.
pub fn in_index(repo: &git2::Repository, relative: &str) -> bool {
    let mut index = repo
        .index()
        .unwrap_or_else(|e| panic!("in_index: failed to open index: {e}"));
    index
        .read(true)
        .unwrap_or_else(|e| panic!("in_index: failed to reload index: {e}"));
    index.get_path(Path::new(relative), 0).is_some()
}
