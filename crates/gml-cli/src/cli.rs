//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gml_core::SourceOfTruth;

/// yyfix - Keep script files, metadata and the project manifest in sync
#[derive(Parser, Debug)]
#[command(name = "yyfix")]
#[command(author, version, about, long_about = None)]
pub struct YyfixCli {
    /// Project configuration (defaults to tools/yy_rules.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: YyfixCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum YyfixCommand {
    /// Move and/or rename a script
    ///
    /// Examples:
    ///   yyfix rename --script GOAP/scripts/Foo/Foo.gml --new-name Bar
    ///   yyfix rename --script GOAP/scripts/Foo/Foo.gml --new-name Bar --apply
    Rename {
        /// Path to the content file
        #[arg(long)]
        script: String,

        /// New stem, without extension
        #[arg(long)]
        new_name: String,

        /// Folder to move the script into
        #[arg(long)]
        new_folder: Option<String>,

        /// Make the changes (default is a dry run)
        #[arg(long)]
        apply: bool,

        /// Overwrite existing destination files
        #[arg(long)]
        force: bool,
    },

    /// Repair mismatched names and paths
    Repair {
        /// Path to the content file
        #[arg(long)]
        script: String,

        /// Name to align to: fs, metadata (yy) or manifest (yyp)
        #[arg(long, default_value = "fs")]
        truth: SourceOfTruth,

        /// Make the changes (default is a dry run)
        #[arg(long)]
        apply: bool,

        /// Overwrite existing destination files
        #[arg(long)]
        force: bool,
    },

    /// Audit every script against its metadata and the manifest
    Check,

    /// Print the module inventory as JSON
    Inventory,
}

/// gmlint - Rule scanning and strategy template enforcement for GML scripts
#[derive(Parser, Debug)]
#[command(name = "gmlint")]
#[command(author, version, about, long_about = None)]
pub struct GmlintCli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: GmlintCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum GmlintCommand {
    /// Scan every script for rule violations
    Lint {
        /// Rule document (defaults to tools/animus_rules.yaml)
        #[arg(long, conflicts_with = "builtin")]
        config: Option<PathBuf>,

        /// Use the built-in sanity rules instead of a rule document
        #[arg(long)]
        builtin: bool,

        /// Output findings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find strategies that bypass the templates
    Strategy {
        /// Inject a commented scaffold into each non-templated strategy
        #[arg(long)]
        patch: bool,

        /// Count non-templated strategies as issues even when patched
        #[arg(long)]
        strict: bool,

        /// Strategy rule document (defaults to tools/animus_strategy_rules.yaml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Insert saved template suggestions into their scripts
    ApplySuggestions {
        /// Suggestions document (defaults to tools/.strategy_suggestions.json)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}
