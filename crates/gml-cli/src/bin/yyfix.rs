//! yyfix: rename, repair and audit script resources of a GML project.

use std::process::ExitCode;

use clap::Parser;

use gml_cli::cli::{YyfixCli, YyfixCommand};
use gml_cli::commands;
use gml_cli::error::{CliError, Result};
use gml_cli::output;
use gml_core::ReconcileOptions;

fn main() -> ExitCode {
    let cli = YyfixCli::parse();
    output::init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            if let CliError::Core(gml_core::Error::MissingMetadata { content, .. }) = &e {
                output::warn(format!(
                    "Script metadata is missing beside {}",
                    content.display()
                ));
            }
            output::fail(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: YyfixCli) -> Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let config = cli.config.as_deref();

    match cli.command {
        YyfixCommand::Rename {
            script,
            new_name,
            new_folder,
            apply,
            force,
        } => commands::run_rename(
            &cwd,
            config,
            &script,
            &new_name,
            new_folder.as_deref(),
            ReconcileOptions {
                dry_run: !apply,
                force,
            },
        ),
        YyfixCommand::Repair {
            script,
            truth,
            apply,
            force,
        } => commands::run_repair(
            &cwd,
            config,
            &script,
            truth,
            ReconcileOptions {
                dry_run: !apply,
                force,
            },
        ),
        YyfixCommand::Check => commands::run_check(&cwd, config),
        YyfixCommand::Inventory => commands::run_inventory(&cwd, config),
    }
}
