//! Strategy enforcement over a project tree.

use std::fs;

use gml_fs::NormalizedPath;
use gml_lint::{FileVerdict, PatchStatus, StrategyEnforcer, StrategyOptions};
use gml_meta::{StrategyRules, TemplateKind};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

const RULES: &str = r#"
strategy_file_globs: ["scripts/**/Act_*.gml"]
template_namespace_regex: "\\bAnimus_StrategyTemplates\\."
timed_heuristics: ["elapsed\\s*\\+="]
move_heuristics: ["move_towards_point"]
template_scaffolds:
  timed: "return Animus_StrategyTemplates.timed({ duration: 1 });"
  move: "return Animus_StrategyTemplates.move({ speed: 2 });"
"#;

const LEGACY_MOVE: &str = "function Act_Go() constructor {\n    build_strategy = function(agent) {\n        move_towards_point(x, y, 2);\n    };\n}\n";
const TEMPLATED: &str = "function Act_Wait() constructor {\n    build_strategy = function(agent) {\n        return Animus_StrategyTemplates.timed({});\n    };\n}\n";

fn setup() -> (TempDir, NormalizedPath, StrategyEnforcer) {
    let dir = TempDir::new().unwrap();
    for (rel, text) in [
        ("scripts/Act_Go/Act_Go.gml", LEGACY_MOVE),
        ("scripts/Act_Wait/Act_Wait.gml", TEMPLATED),
        ("scripts/Util/Util.gml", LEGACY_MOVE),
    ] {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }
    let rules: StrategyRules = serde_yaml::from_str(RULES).unwrap();
    let enforcer = StrategyEnforcer::new(rules);
    assert!(enforcer.config_errors().is_empty());
    let root = NormalizedPath::new(dir.path());
    (dir, root, enforcer)
}

#[test]
fn test_report_only_counts_issues() {
    let (dir, root, enforcer) = setup();
    let report = enforcer.run(&root, StrategyOptions::default()).unwrap();

    assert_eq!(report.files.len(), 2);
    assert_eq!(report.issues, 1);
    let legacy: Vec<_> = report.non_templated().collect();
    assert_eq!(legacy.len(), 1);
    assert_eq!(legacy[0].path.as_str(), "scripts/Act_Go/Act_Go.gml");
    let FileVerdict::NonTemplated { classification, patch } = &legacy[0].verdict else {
        panic!("expected non-templated");
    };
    assert_eq!(classification.kind, TemplateKind::Move);
    assert_eq!(*patch, None);

    let text = fs::read_to_string(dir.path().join("scripts/Act_Go/Act_Go.gml")).unwrap();
    assert_eq!(text, LEGACY_MOVE);
}

#[rstest]
#[case(false, 0)]
#[case(true, 1)]
fn test_patch_injects_once(#[case] strict: bool, #[case] issues: usize) {
    let (dir, root, enforcer) = setup();
    let options = StrategyOptions { patch: true, strict };

    let first = enforcer.run(&root, options).unwrap();
    assert_eq!(first.patched, 1);
    assert_eq!(first.issues, issues);

    let path = dir.path().join("scripts/Act_Go/Act_Go.gml");
    let patched = fs::read_to_string(&path).unwrap();
    assert!(patched.contains(
        "function(agent) /* ANIMUS SUGGESTION */\n// return Animus_StrategyTemplates.move({ speed: 2 });\n/* END */\n{"
    ));

    let second = enforcer.run(&root, options).unwrap();
    assert_eq!(second.patched, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), patched);
}

#[test]
fn test_existing_banner_is_left_alone() {
    let (dir, root, enforcer) = setup();
    let path = dir.path().join("scripts/Act_Go/Act_Go.gml");
    let bannered = format!("/* ANIMUS SUGGESTION */\n/* END */\n{LEGACY_MOVE}");
    fs::write(&path, &bannered).unwrap();

    let options = StrategyOptions {
        patch: true,
        strict: true,
    };
    let report = enforcer.run(&root, options).unwrap();
    let FileVerdict::NonTemplated { patch, .. } = &report.non_templated().next().unwrap().verdict else {
        panic!("expected non-templated");
    };
    assert_eq!(*patch, Some(PatchStatus::AlreadyPresent));
    assert_eq!(report.issues, 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), bannered);
}

#[test]
fn test_invalid_namespace_is_config_error() {
    let mut rules: StrategyRules = serde_yaml::from_str(RULES).unwrap();
    rules.template_namespace_regex = Some("(".to_string());
    let enforcer = StrategyEnforcer::new(rules);
    assert_eq!(enforcer.config_errors().len(), 1);
    assert_eq!(enforcer.config_errors()[0].key, "template_namespace_regex");
}
