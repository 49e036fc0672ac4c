//! End-to-end tests for the `yyfix` binary.

use assert_cmd::Command;
use gml_test_utils::project::{MANIFEST, TestProject};
use predicates::prelude::*;
use pretty_assertions::assert_eq;

fn yyfix(project: &TestProject) -> Command {
    let mut cmd = Command::cargo_bin("yyfix").unwrap();
    cmd.current_dir(project.root());
    cmd
}

fn foo_project() -> TestProject {
    TestProject::new()
        .with_script("Foo", "Foo", Some("Foo"))
        .with_manifest(&[("Foo", "scripts/Foo/Foo.yy")])
        .with_order(&["scripts/Foo/Foo.yy"])
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("yyfix")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rename"))
        .stdout(predicate::str::contains("repair"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_rename_defaults_to_dry_run() {
    let project = foo_project();
    let before = project.snapshot();

    yyfix(&project)
        .args(["rename", "--script", "GOAP/scripts/Foo/Foo.gml", "--new-name", "Bar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== PLAN ==="))
        .stdout(predicate::str::contains(
            "(dry-run) Would move GOAP/scripts/Foo/Foo.gml -> GOAP/scripts/Foo/Bar.gml",
        ))
        .stdout(predicate::str::contains("--apply"));

    assert_eq!(project.snapshot(), before);
}

#[test]
fn test_rename_apply() {
    let project = foo_project();

    yyfix(&project)
        .args([
            "rename",
            "--script",
            "GOAP/scripts/Foo/Foo.gml",
            "--new-name",
            "Bar",
            "--apply",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added to resource order: scripts/Foo/Bar.yy"));

    project.assert_file_exists("GOAP/scripts/Foo/Bar.gml");
    project.assert_file_not_exists("GOAP/scripts/Foo/Foo.gml");
    let manifest = project.read_json(MANIFEST);
    assert_eq!(manifest["resources"][0]["id"]["name"], "Bar");
    assert_eq!(manifest["resources"][0]["id"]["path"], "scripts/Foo/Bar.yy");
}

#[test]
fn test_repair_accepts_legacy_truth_names() {
    let project = TestProject::new()
        .with_script("Foo", "Foo", Some("Renamed"))
        .with_manifest(&[("Foo", "scripts/Foo/Foo.yy")]);

    yyfix(&project)
        .args(["repair", "--script", "GOAP/scripts/Foo/Foo.gml", "--truth", "yy", "--apply"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== PLAN (repair) ==="))
        .stdout(predicate::str::contains("Rename file stems to 'Renamed'"));

    project.assert_file_exists("GOAP/scripts/Foo/Renamed.gml");
    assert_eq!(project.read_json("GOAP/scripts/Foo/Renamed.yy")["name"], "Renamed");
}

#[test]
fn test_repair_aligned_is_noop() {
    let project = foo_project();
    let before = project.snapshot();

    yyfix(&project)
        .args(["repair", "--script", "GOAP/scripts/Foo/Foo.gml", "--apply"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to repair"));

    assert_eq!(project.snapshot(), before);
}

#[test]
fn test_missing_metadata_fails_with_warning() {
    let project = TestProject::new()
        .with_script("Foo", "Foo", None)
        .with_manifest(&[]);

    yyfix(&project)
        .args(["rename", "--script", "GOAP/scripts/Foo/Foo.gml", "--new-name", "Bar"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[WARN]"))
        .stderr(predicate::str::contains("Script metadata is missing beside"))
        .stderr(predicate::str::contains("[FAIL]"))
        .stderr(predicate::str::contains("Cannot proceed without metadata file"));
}

#[test]
fn test_destination_exists_fails() {
    let project = foo_project().with_script("Foo", "Bar", Some("Bar"));

    yyfix(&project)
        .args([
            "rename",
            "--script",
            "GOAP/scripts/Foo/Foo.gml",
            "--new-name",
            "Bar",
            "--apply",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Destination exists"));

    project.assert_file_exists("GOAP/scripts/Foo/Foo.gml");
}

#[test]
fn test_invalid_truth_is_usage_error() {
    let project = foo_project();
    yyfix(&project)
        .args(["repair", "--script", "GOAP/scripts/Foo/Foo.gml", "--truth", "disk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("disk"));
}

#[test]
fn test_check_reports_issues() {
    let project = foo_project().with_script("Orphan", "Orphan", None);

    yyfix(&project)
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[ISSUE]"))
        .stdout(predicate::str::contains("Missing metadata for script: GOAP/scripts/Orphan/Orphan.gml"));
}

#[test]
fn test_check_clean_project() {
    let project = foo_project();
    yyfix(&project)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project integrity OK."));
}

#[test]
fn test_check_uses_project_config() {
    let project = foo_project().with_script("Orphan", "Orphan", None);
    project.write("tools/yy_rules.yaml", "require_script_yy: false\n");

    yyfix(&project).arg("check").assert().success();
}

#[test]
fn test_explicit_config_must_exist() {
    let project = foo_project();
    yyfix(&project)
        .args(["--config", "nope.yaml", "check"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration not found"));
}

#[test]
fn test_inventory_prints_json() {
    let project = foo_project();

    let output = yyfix(&project).arg("inventory").output().unwrap();

    assert!(output.status.success());
    let inventory: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(inventory["Foo"]["files"][0], "GOAP/scripts/Foo/Foo.gml");
    assert_eq!(inventory["Foo"]["resources"][0], "GOAP/scripts/Foo/Foo.yy");
}
