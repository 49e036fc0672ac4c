//! Linter driving all scanners over a project.

use crate::discover::discover_scripts;
use crate::error::{Error, Result};
use crate::finding::Finding;
use crate::rules::{CompiledRules, PatternError};
use crate::scan::{self, SourceFile};
use gml_fs::NormalizedPath;
use gml_meta::LintRules;

/// Totals of one lint run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintSummary {
    pub files_scanned: usize,
    pub findings: usize,
    pub config_errors: usize,
}

impl LintSummary {
    /// `2` when the configuration had invalid patterns, `1` when anything
    /// was found, `0` otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.config_errors > 0 {
            2
        } else if self.findings > 0 {
            1
        } else {
            0
        }
    }
}

/// Compiled rule set ready to scan scripts.
#[derive(Debug)]
pub struct Linter {
    rules: CompiledRules,
    config_errors: Vec<PatternError>,
}

impl Linter {
    pub fn new(rules: &LintRules) -> Self {
        let (rules, config_errors) = CompiledRules::compile(rules);
        Self { rules, config_errors }
    }

    /// Patterns that failed to compile. Their rules are disabled.
    pub fn config_errors(&self) -> &[PatternError] {
        &self.config_errors
    }

    /// Every finding for one file, in scanner order.
    pub fn lint<'a>(&'a self, src: &'a SourceFile) -> impl Iterator<Item = Finding> + 'a {
        let rules = &self.rules;
        scan::line_rules(src, rules)
            .chain(scan::silent_returns(src, rules))
            .chain(scan::globals(src, rules))
            .chain(scan::bans(src, rules))
            .chain(scan::planner_calls(src, rules))
            .chain(scan::strategy_interfaces(src, rules))
            .chain(scan::snapshots(src, rules))
            .chain(scan::core_contracts(src, rules))
    }

    /// Scan every script under `root`, handing each finding to `sink` as it
    /// is produced.
    pub fn run(
        &self,
        root: &NormalizedPath,
        extension: &str,
        mut sink: impl FnMut(&Finding),
    ) -> Result<LintSummary> {
        let mut summary = LintSummary {
            config_errors: self.config_errors.len(),
            ..LintSummary::default()
        };

        for relative in discover_scripts(root, extension)? {
            let src = load_source(root, &relative)?;
            for finding in self.lint(&src) {
                sink(&finding);
                summary.findings += 1;
            }
            summary.files_scanned += 1;
        }

        tracing::info!(
            files = summary.files_scanned,
            findings = summary.findings,
            "lint finished"
        );
        Ok(summary)
    }
}

/// Read a script, dropping bytes that are not valid UTF-8.
pub fn load_source(root: &NormalizedPath, relative: &NormalizedPath) -> Result<SourceFile> {
    let native = root.join(relative.as_str()).to_native();
    let bytes = std::fs::read(&native).map_err(|e| Error::Fs(gml_fs::Error::io(&native, e)))?;
    Ok(SourceFile::new(relative.as_str(), decode_dropping_invalid(&bytes)))
}

/// Keep every valid UTF-8 sequence, U+FFFD included, and skip the rest.
fn decode_dropping_invalid(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 0)]
    #[case(0, 3, 1)]
    #[case(1, 0, 2)]
    #[case(1, 3, 2)]
    fn test_exit_code(#[case] config_errors: usize, #[case] findings: usize, #[case] expected: u8) {
        let summary = LintSummary {
            files_scanned: 1,
            findings,
            config_errors,
        };
        assert_eq!(summary.exit_code(), expected);
    }

    #[test]
    fn test_invalid_pattern_reported() {
        let rules = LintRules {
            ban_globals: Some("[unclosed".to_string()),
            ..LintRules::builtin()
        };
        let linter = Linter::new(&rules);
        assert_eq!(linter.config_errors().len(), 1);
        assert_eq!(linter.config_errors()[0].key, "ban_globals");
    }

    #[test]
    fn test_load_source_drops_only_invalid_bytes() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut bytes = b"x = 1;\xff\xfe y = 2;".to_vec();
        bytes.extend_from_slice("// \u{FFFD} kept\n".as_bytes());
        std::fs::write(temp.path().join("a.gml"), &bytes).unwrap();

        let src = load_source(&NormalizedPath::new(temp.path()), &NormalizedPath::new("a.gml")).unwrap();

        assert_eq!(src.text, "x = 1; y = 2;// \u{FFFD} kept\n");
    }

    #[test]
    fn test_builtin_rules_on_clean_file() {
        let linter = Linter::new(&LintRules::builtin());
        let src = SourceFile::new("a.gml", "function f() {\n    return 1;\n}\n");
        assert_eq!(linter.lint(&src).count(), 0);
    }
}
