//! yyfix commands: rename, repair, check and inventory.

use std::path::Path;
use std::process::ExitCode;

use colored::Colorize;

use gml_core::{
    Outcome, ReconcileEngine, ReconcileOptions, ReconcileReport, SourceOfTruth, build_inventory,
};
use gml_fs::NormalizedPath;
use gml_meta::RulesLoader;

use crate::error::Result;
use crate::output;

fn engine(cwd: &Path, config: Option<&Path>) -> Result<ReconcileEngine> {
    let root = NormalizedPath::new(cwd);
    let config = config.map(NormalizedPath::new);
    let project = RulesLoader::new().load_project_config(&root, config.as_ref())?;
    Ok(ReconcileEngine::new(root, project))
}

fn print_report(title: &str, report: &ReconcileReport) {
    if report.outcome == Outcome::AlreadyAligned {
        output::info("Nothing to repair; names and paths are aligned.");
        return;
    }

    output::header(title);
    for line in &report.plan {
        println!("{line}");
    }
    println!();
    for line in report.change_lines() {
        let marker = if report.applied() { "+".green() } else { "~".yellow() };
        println!("   {marker} {line}");
    }
    for warning in &report.warnings {
        output::warn(warning);
    }
    if report.outcome == Outcome::Planned {
        output::info(format!(
            "Dry run; re-run with {} to make these changes.",
            "--apply".cyan()
        ));
    }
}

/// Run the rename command
pub fn run_rename(
    cwd: &Path,
    config: Option<&Path>,
    script: &str,
    new_name: &str,
    new_folder: Option<&str>,
    options: ReconcileOptions,
) -> Result<ExitCode> {
    let report = engine(cwd, config)?.rename(script, new_name, new_folder, options)?;
    print_report("PLAN", &report);
    Ok(ExitCode::SUCCESS)
}

/// Run the repair command
pub fn run_repair(
    cwd: &Path,
    config: Option<&Path>,
    script: &str,
    truth: SourceOfTruth,
    options: ReconcileOptions,
) -> Result<ExitCode> {
    let report = engine(cwd, config)?.repair(script, truth, options)?;
    print_report("PLAN (repair)", &report);
    Ok(ExitCode::SUCCESS)
}

/// Run the check command
///
/// Exits with failure when any issue is found. Warnings alone pass.
pub fn run_check(cwd: &Path, config: Option<&Path>) -> Result<ExitCode> {
    let report = engine(cwd, config)?.check()?;

    for warning in &report.warnings {
        output::warn(warning);
    }
    for issue in &report.issues {
        println!("{} {}", "[ISSUE]".red().bold(), issue);
    }

    if report.is_ok() {
        output::info("Project integrity OK.");
        Ok(ExitCode::SUCCESS)
    } else {
        output::info(format!("{} issue(s) found.", report.issues.len()));
        Ok(ExitCode::FAILURE)
    }
}

/// Run the inventory command
pub fn run_inventory(cwd: &Path, config: Option<&Path>) -> Result<ExitCode> {
    let engine = engine(cwd, config)?;
    let inventory = build_inventory(engine.root(), engine.config())?;
    print!("{}", gml_core::inventory::to_json(&inventory)?);
    Ok(ExitCode::SUCCESS)
}
