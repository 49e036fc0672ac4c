//! Tests for index-aware moves

use std::fs;
use std::path::Path;

use git2::Repository;
use gml_git::{Error, is_tracked, stage_move};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn repo_with_tracked_file(rel: &str, content: &str) -> (TempDir, Repository) {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path()).unwrap();
    let file = temp.path().join(rel);
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(&file, content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(rel)).unwrap();
    index.write().unwrap();
    (temp, repo)
}

#[test]
fn tracked_file_is_moved_and_staged() {
    let (temp, repo) = repo_with_tracked_file("scripts/Foo/Foo.gml", "function Foo() {}\n");
    let src = temp.path().join("scripts/Foo/Foo.gml");
    let dst = temp.path().join("scripts/Foo/Bar.gml");

    stage_move(&src, &dst).unwrap();

    assert!(!src.exists());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "function Foo() {}\n");

    let mut index = repo.index().unwrap();
    index.read(true).unwrap();
    assert!(index.get_path(Path::new("scripts/Foo/Foo.gml"), 0).is_none());
    assert!(index.get_path(Path::new("scripts/Foo/Bar.gml"), 0).is_some());
}

#[test]
fn untracked_file_is_left_in_place() {
    let (temp, _repo) = repo_with_tracked_file("tracked.gml", "");
    let src = temp.path().join("untracked.gml");
    fs::write(&src, "x").unwrap();
    let dst = temp.path().join("moved.gml");

    let err = stage_move(&src, &dst).unwrap_err();

    assert!(matches!(err, Error::NotTracked { .. }));
    assert!(!err.file_was_moved());
    assert!(src.exists());
    assert!(!dst.exists());
}

#[test]
fn is_tracked_reports_index_membership() {
    let (temp, _repo) = repo_with_tracked_file("scripts/A.gml", "a");
    fs::write(temp.path().join("scripts/B.gml"), "b").unwrap();

    assert!(is_tracked(&temp.path().join("scripts/A.gml")));
    assert!(!is_tracked(&temp.path().join("scripts/B.gml")));
}
