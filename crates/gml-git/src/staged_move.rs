//! `git mv` equivalent built on libgit2

use std::fs;
use std::path::{Path, PathBuf};

use git2::Repository;

use crate::{Error, Result};

/// Repository that owns `path`, with its canonical work tree root.
fn open_for(path: &Path) -> Result<(Repository, PathBuf)> {
    let start = path.parent().unwrap_or(path);
    let repo = Repository::discover(start).map_err(|_| Error::NotARepository {
        path: path.to_path_buf(),
    })?;
    let workdir = repo.workdir().ok_or_else(|| Error::NotARepository {
        path: path.to_path_buf(),
    })?;
    let workdir = dunce::canonicalize(workdir).map_err(|e| gml_fs::Error::io(workdir, e))?;
    Ok((repo, workdir))
}

/// Canonical form of a path whose final component may not exist yet.
fn canonical_in_parent(path: &Path) -> Result<PathBuf> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let parent = dunce::canonicalize(parent).map_err(|e| gml_fs::Error::io(parent, e))?;
    let name = path.file_name().ok_or_else(|| Error::OutsideWorkdir {
        path: path.to_path_buf(),
    })?;
    Ok(parent.join(name))
}

fn workdir_relative(path: &Path, workdir: &Path) -> Result<PathBuf> {
    let absolute = canonical_in_parent(path)?;
    absolute
        .strip_prefix(workdir)
        .map(Path::to_path_buf)
        .map_err(|_| Error::OutsideWorkdir {
            path: path.to_path_buf(),
        })
}

/// True when `path` has an entry in the index of its enclosing repository.
pub fn is_tracked(path: &Path) -> bool {
    let Ok((repo, workdir)) = open_for(path) else {
        return false;
    };
    let Ok(relative) = workdir_relative(path, &workdir) else {
        return false;
    };
    repo.index()
        .map(|index| index.get_path(&relative, 0).is_some())
        .unwrap_or(false)
}

/// Move a tracked file and record the rename in the index.
///
/// Fails without touching the disk when `src` is not inside a work tree or is
/// not tracked, so callers can fall back to a plain rename. The destination
/// directory must already exist. An existing destination file is replaced.
pub fn stage_move(src: &Path, dst: &Path) -> Result<()> {
    let (repo, workdir) = open_for(src)?;
    let rel_src = workdir_relative(src, &workdir)?;
    let rel_dst = workdir_relative(dst, &workdir)?;

    let mut index = repo.index()?;
    if index.get_path(&rel_src, 0).is_none() {
        return Err(Error::NotTracked {
            path: src.to_path_buf(),
        });
    }

    fs::rename(src, dst).map_err(|e| gml_fs::Error::io(src, e))?;

    let staged = index
        .remove_path(&rel_src)
        .and_then(|()| index.add_path(&rel_dst))
        .and_then(|()| index.write());
    if let Err(source) = staged {
        return Err(Error::StageFailed {
            path: dst.to_path_buf(),
            source,
        });
    }

    tracing::debug!(from = %rel_src.display(), to = %rel_dst.display(), "staged move");
    Ok(())
}
