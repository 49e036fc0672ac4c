//! Rule and project configuration for the GML project tools.
//!
//! All documents are plain data: the linter, the strategy enforcer and the
//! reconciliation engine interpret them. Every key is optional unless noted
//! on the field.

pub mod constants;
pub mod error;
pub mod loader;
pub mod schema;

pub use constants::ConfigFile;
pub use error::{Error, Result};
pub use loader::RulesLoader;
pub use schema::{
    CoreFiles, LintRules, ProjectConfig, SnapshotPreference, StrategyRules, TemplateKind,
    TickLimits,
};
