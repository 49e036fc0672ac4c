//! Rule scanning for GML scripts.
//!
//! Three tools share this crate:
//!
//! - the **linter** runs pattern rules and structural contracts over every
//!   script and reports [`Finding`]s (`linter`, `scan`, `rules`),
//! - the **strategy enforcer** classifies hand-rolled strategies into
//!   template kinds and can inject commented scaffolds (`classify`,
//!   `strategy`),
//! - **suggestion application** inserts previously saved template code
//!   (`suggestions`).
//!
//! Scanning is heuristic text matching. Nothing here parses GML.

pub mod classify;
pub mod discover;
pub mod error;
pub mod finding;
pub mod linter;
pub mod rules;
pub mod scan;
pub mod strategy;
pub mod suggestions;
pub mod text;

pub use classify::{Classification, Scores, TemplateClassifier};
pub use discover::{discover_matching, discover_scripts};
pub use error::{Error, Result};
pub use finding::{Category, Finding, RuleId};
pub use linter::{LintSummary, Linter};
pub use rules::{CompiledRules, PatternError};
pub use scan::SourceFile;
pub use strategy::{
    FileOutcome, FileVerdict, PatchStatus, StrategyEnforcer, StrategyOptions, StrategyReport,
};
pub use suggestions::{SuggestionOutcome, apply_suggestions};
