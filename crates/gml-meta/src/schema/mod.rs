//! Configuration document schemas

mod lint;
mod project;
mod strategy;

pub use lint::{CoreFiles, LintRules, SnapshotPreference, TickLimits};
pub use project::ProjectConfig;
pub use strategy::{StrategyRules, TemplateKind};
