use gml_fs::{ConfigFormat, ConfigStore, Error, NormalizedPath};
use rstest::rstest;
use serde::Deserialize;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
struct Rules {
    ban_tabs: Option<String>,
    allowed_globals: Vec<String>,
}

#[rstest]
#[case("rules.yaml", "ban_tabs: \"\\t\"\nallowed_globals: [global.debug]\n")]
#[case("rules.yml", "ban_tabs: \"\\t\"\nallowed_globals:\n  - global.debug\n")]
#[case("rules.json", r#"{"ban_tabs": "\t", "allowed_globals": ["global.debug"]}"#)]
#[case("rules.toml", "ban_tabs = \"\\t\"\nallowed_globals = [\"global.debug\"]\n")]
fn test_load_by_extension(#[case] name: &str, #[case] body: &str) {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join(name);
    fs::write(&file_path, body).unwrap();

    let rules: Rules = ConfigStore::new().load(&NormalizedPath::new(&file_path)).unwrap();

    assert_eq!(rules.ban_tabs.as_deref(), Some("\t"));
    assert_eq!(rules.allowed_globals, vec!["global.debug".to_string()]);
}

#[test]
fn test_empty_yaml_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("rules.yaml");
    fs::write(&file_path, "").unwrap();

    let rules: Rules = ConfigStore::new().load(&NormalizedPath::new(&file_path)).unwrap();
    assert_eq!(rules, Rules::default());
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("rules.yaml");
    fs::write(&file_path, "allowed_globals: [unterminated\n").unwrap();

    let result: Result<Rules, _> = ConfigStore::new().load(&NormalizedPath::new(&file_path));
    assert!(matches!(result, Err(Error::ConfigParse { .. })));
}

#[test]
fn test_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("rules.ini");
    fs::write(&file_path, "x=1").unwrap();

    let result: Result<Rules, _> = ConfigStore::new().load(&NormalizedPath::new(&file_path));
    assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
}

#[rstest]
#[case("rules.YAML", Some(ConfigFormat::Yaml))]
#[case("rules.yml", Some(ConfigFormat::Yaml))]
#[case("yy_rules.toml", Some(ConfigFormat::Toml))]
#[case(".strategy_suggestions.json", Some(ConfigFormat::Json))]
#[case("rules", None)]
fn test_format_from_extension(#[case] name: &str, #[case] expected: Option<ConfigFormat>) {
    assert_eq!(ConfigFormat::from_path(&NormalizedPath::new(name)), expected);
}
