//! Integrity audit and module inventory.

use gml_core::{IntegrityIssue, ReconcileEngine, build_inventory};
use gml_fs::NormalizedPath;
use gml_meta::ProjectConfig;
use gml_test_utils::project::TestProject;
use pretty_assertions::assert_eq;

fn check(project: &TestProject, config: ProjectConfig) -> gml_core::IntegrityReport {
    ReconcileEngine::new(NormalizedPath::new(project.root()), config)
        .check()
        .unwrap()
}

#[test]
fn consistent_project_passes() {
    let project = TestProject::new()
        .with_script("Foo", "Foo", Some("Foo"))
        .with_script("Planner", "Planner", Some("Planner"))
        .with_manifest(&[
            ("Foo", "scripts/Foo/Foo.yy"),
            ("Planner", "scripts/Planner/Planner.yy"),
        ])
        .with_order(&["scripts/Foo/Foo.yy", "scripts/Planner/Planner.yy"]);

    let report = check(&project, ProjectConfig::default());

    assert!(report.is_ok(), "{:?}", report.issues);
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
}

#[test]
fn every_drift_is_reported() {
    let project = TestProject::new()
        .with_script("Orphan", "Orphan", None)
        .with_script("Named", "Named", Some("Other"))
        .with_script("Loose", "Loose", Some("Loose"))
        .with_script("Drift", "Drift", Some("Drift"))
        .with_manifest(&[
            ("Named", "scripts/Named/Named.yy"),
            ("Drifted", "scripts/Drift/Drift.yy"),
            ("Gone", "scripts/Gone/Gone.yy"),
        ])
        .with_order(&["scripts/Named/Named.yy", "scripts/Drift/Drift.yy"]);

    let report = check(&project, ProjectConfig::default());

    assert_eq!(
        report.issues,
        vec![
            IntegrityIssue::DeclaredNameMismatch {
                path: "scripts/Drift/Drift.yy".to_string(),
                declared: "Drifted".to_string(),
                actual: "Drift".to_string(),
            },
            IntegrityIssue::Undeclared {
                path: "scripts/Loose/Loose.yy".to_string(),
            },
            IntegrityIssue::NameMismatch {
                metadata: "GOAP/scripts/Named/Named.yy".to_string(),
                name: "Other".to_string(),
                stem: "Named".to_string(),
            },
            IntegrityIssue::DeclaredNameMismatch {
                path: "scripts/Named/Named.yy".to_string(),
                declared: "Named".to_string(),
                actual: "Other".to_string(),
            },
            IntegrityIssue::MissingMetadata {
                content: "GOAP/scripts/Orphan/Orphan.gml".to_string(),
            },
            IntegrityIssue::MissingResource {
                path: "scripts/Gone/Gone.yy".to_string(),
            },
        ]
    );
    assert_eq!(
        report.warnings,
        vec![IntegrityIssue::NotInOrder {
            path: "scripts/Loose/Loose.yy".to_string(),
        }]
    );
}

#[test]
fn relaxed_config_downgrades_missing_resources() {
    let project = TestProject::new()
        .with_script("Orphan", "Orphan", None)
        .with_manifest(&[("Gone", "scripts/Gone/Gone.yy")]);
    let config = ProjectConfig {
        require_script_yy: false,
        fail_on_missing_resource: false,
        ..ProjectConfig::default()
    };

    let report = check(&project, config);

    assert!(report.is_ok(), "{:?}", report.issues);
    assert_eq!(
        report.warnings,
        vec![IntegrityIssue::MissingResource {
            path: "scripts/Gone/Gone.yy".to_string(),
        }]
    );
}

#[test]
fn script_metadata_without_content_is_reported() {
    let project = TestProject::new()
        .with_script("Foo", "Foo", Some("Foo"))
        .with_manifest(&[("Foo", "scripts/Foo/Foo.yy")]);
    std::fs::remove_file(project.path("GOAP/scripts/Foo/Foo.gml")).unwrap();

    let report = check(&project, ProjectConfig::default());

    assert_eq!(
        report.issues,
        vec![IntegrityIssue::MissingContent {
            metadata: "scripts/Foo/Foo.yy".to_string(),
            expected: "Foo.gml".to_string(),
        }]
    );
}

#[test]
fn malformed_entries_are_warnings() {
    let project = TestProject::new();
    project.write(
        "GOAP/GOAP.yyp",
        r#"{"resources": [{"id": {"name": "NoPath"}}, {"order": 3}]}"#,
    );

    let report = check(&project, ProjectConfig::default());

    assert!(report.is_ok());
    assert_eq!(
        report.warnings,
        vec![IntegrityIssue::MalformedEntries { count: 2 }]
    );
}

#[test]
fn inventory_groups_by_stem() {
    let project = TestProject::new()
        .with_script("Planner", "Planner", Some("Planner"))
        .with_script("Agent", "Agent", Some("Agent"));
    project.write(
        "GOAP/scripts/Agent/Agent.gml",
        "function agent_tick(agent) {\n}\n\n  function agent_reset (agent) {}\n",
    );
    project.write("Main.gml", "function main() {}\n");
    project.write(".hidden.gml", "function hidden() {}\n");
    project.write("notes/Elsewhere.gml", "function elsewhere() {}\n");

    let inventory = build_inventory(
        &NormalizedPath::new(project.root()),
        &ProjectConfig::default(),
    )
    .unwrap();

    assert_eq!(
        inventory.keys().map(String::as_str).collect::<Vec<_>>(),
        ["Agent", "Main", "Planner"]
    );
    let agent = &inventory["Agent"];
    assert_eq!(agent.files, ["GOAP/scripts/Agent/Agent.gml"]);
    assert_eq!(agent.functions, ["agent_tick", "agent_reset"]);
    assert_eq!(agent.resources, ["GOAP/scripts/Agent/Agent.yy"]);
    assert_eq!(inventory["Main"].functions, ["main"]);
    assert!(inventory["Main"].resources.is_empty());
}

#[test]
fn inventory_json_shape() {
    let project = TestProject::new().with_script("Foo", "Foo", Some("Foo"));
    let inventory = build_inventory(
        &NormalizedPath::new(project.root()),
        &ProjectConfig::default(),
    )
    .unwrap();

    let json = gml_core::inventory::to_json(&inventory).unwrap();

    assert_eq!(
        json,
        r#"{
  "Foo": {
    "files": [
      "GOAP/scripts/Foo/Foo.gml"
    ],
    "functions": [
      "Foo"
    ],
    "resources": [
      "GOAP/scripts/Foo/Foo.yy"
    ]
  }
}
"#
    );
}
