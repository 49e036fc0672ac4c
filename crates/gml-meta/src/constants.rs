//! Default locations of the configuration documents, relative to the
//! working root.

use std::path::Path;

/// Well-known configuration documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFile {
    /// Lint rule set
    LintRules,
    /// Strategy template heuristics and scaffolds
    StrategyRules,
    /// Project layout and integrity switches
    ProjectRules,
    /// Suggestions consumed by `apply-suggestions`
    StrategySuggestions,
}

impl ConfigFile {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LintRules => "tools/animus_rules.yaml",
            Self::StrategyRules => "tools/animus_strategy_rules.yaml",
            Self::ProjectRules => "tools/yy_rules.yaml",
            Self::StrategySuggestions => "tools/.strategy_suggestions.json",
        }
    }
}

impl AsRef<Path> for ConfigFile {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ConfigFile {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ConfigFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
