//! gmlint: rule scanning and strategy template enforcement for GML scripts.

use std::process::ExitCode;

use clap::Parser;

use gml_cli::cli::{GmlintCli, GmlintCommand};
use gml_cli::commands;
use gml_cli::error::Result;
use gml_cli::output;

fn main() -> ExitCode {
    let cli = GmlintCli::parse();
    output::init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            output::fail(&e);
            if e.is_config_problem() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(command: GmlintCommand) -> Result<ExitCode> {
    let cwd = std::env::current_dir()?;

    match command {
        GmlintCommand::Lint {
            config,
            builtin,
            json,
        } => commands::run_lint(&cwd, config.as_deref(), builtin, json),
        GmlintCommand::Strategy {
            patch,
            strict,
            config,
        } => commands::run_strategy(&cwd, patch, strict, config.as_deref()),
        GmlintCommand::ApplySuggestions { input } => {
            commands::run_apply_suggestions(&cwd, input.as_deref())
        }
    }
}
