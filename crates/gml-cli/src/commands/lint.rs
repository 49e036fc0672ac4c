//! gmlint commands: lint, strategy and apply-suggestions.

use std::path::Path;
use std::process::ExitCode;

use colored::Colorize;

use gml_fs::NormalizedPath;
use gml_lint::{
    FileVerdict, Linter, PatchStatus, StrategyEnforcer, StrategyOptions, SuggestionOutcome,
    apply_suggestions,
};
use gml_meta::{ConfigFile, LintRules, RulesLoader};

use super::resolve;
use crate::error::Result;
use crate::output;

const SCRIPT_EXTENSION: &str = "gml";

/// Run the lint command
///
/// Exit code 2 when any configured pattern is invalid, 1 when anything was
/// found, 0 otherwise.
pub fn run_lint(cwd: &Path, config: Option<&Path>, builtin: bool, json: bool) -> Result<ExitCode> {
    let root = NormalizedPath::new(cwd);
    let rules = if builtin {
        LintRules::builtin()
    } else {
        let config = config.map(NormalizedPath::new);
        RulesLoader::new().load_lint_rules(&root, config.as_ref())?
    };

    let linter = Linter::new(&rules);
    for error in linter.config_errors() {
        output::warn(format!("{error}; rule disabled"));
    }

    let mut findings = Vec::new();
    let summary = linter.run(&root, SCRIPT_EXTENSION, |finding| {
        if json {
            findings.push(finding.clone());
        } else {
            println!("{finding}");
        }
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    } else if summary.findings == 0 {
        output::info(format!(
            "{} file(s) scanned, no findings.",
            summary.files_scanned
        ));
    } else {
        output::info(format!(
            "{} finding(s) in {} file(s).",
            summary.findings, summary.files_scanned
        ));
    }

    Ok(ExitCode::from(summary.exit_code()))
}

/// Run the strategy command
pub fn run_strategy(cwd: &Path, patch: bool, strict: bool, config: Option<&Path>) -> Result<ExitCode> {
    let root = NormalizedPath::new(cwd);
    let config = config.map(NormalizedPath::new);
    let rules = RulesLoader::new().load_strategy_rules(&root, config.as_ref())?;

    let enforcer = StrategyEnforcer::new(rules);
    for error in enforcer.config_errors() {
        output::warn(format!("{error}; skipped"));
    }

    let report = enforcer.run(&root, StrategyOptions { patch, strict })?;
    for file in report.non_templated() {
        let FileVerdict::NonTemplated {
            classification,
            patch,
        } = &file.verdict
        else {
            continue;
        };
        println!(
            "{}: non-templated strategy detected -> suggest `{}` template (scores: {})",
            file.path.as_str().cyan(),
            classification.kind,
            classification.scores
        );
        match patch {
            Some(PatchStatus::Injected) => output::info(format!("Injected scaffold in {}", file.path)),
            Some(PatchStatus::NoAnchor) => {
                output::warn(format!("No build_strategy anchor in {}; not patched", file.path))
            }
            Some(PatchStatus::AlreadyPresent) | None => {}
        }
    }

    if report.patched > 0 {
        output::info(format!("Scaffolds injected in {} file(s).", report.patched));
    }
    if !enforcer.config_errors().is_empty() {
        return Ok(ExitCode::from(2));
    }
    if report.issues > 0 {
        return Ok(ExitCode::FAILURE);
    }
    output::info("All strategies templated (or scaffolds present).");
    Ok(ExitCode::SUCCESS)
}

/// Run the apply-suggestions command
///
/// A missing suggestions document is skipped, not an error.
pub fn run_apply_suggestions(cwd: &Path, input: Option<&Path>) -> Result<ExitCode> {
    let root = NormalizedPath::new(cwd);
    let input = match input {
        Some(path) => resolve(&root, path),
        None => root.join(ConfigFile::StrategySuggestions.as_str()),
    };
    let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let Some(outcomes) = apply_suggestions(&root, &input, &stamp)? else {
        output::info("Suggestions file not found; skipping.");
        return Ok(ExitCode::SUCCESS);
    };

    for (file, outcome) in outcomes {
        match outcome {
            SuggestionOutcome::Inserted => {
                output::info(format!("Inserted suggestion block in {file}"))
            }
            SuggestionOutcome::AlreadyPresent => {
                output::info(format!("Suggestion already present in {file}"))
            }
            SuggestionOutcome::AnchorOutOfRange => {
                output::warn(format!("Anchor lies outside {file}; skipped"))
            }
            SuggestionOutcome::MissingFile | SuggestionOutcome::NoAnchor => {
                tracing::debug!(file = %file, ?outcome, "suggestion skipped");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
