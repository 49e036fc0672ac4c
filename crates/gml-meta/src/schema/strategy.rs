//! Strategy template rules - loaded from tools/animus_strategy_rules.yaml
//!
//! # Example YAML
//!
//! ```yaml
//! strategy_file_globs: ["GOAP/scripts/**/*Action*.gml"]
//! template_namespace_regex: "\\bAnimus_StrategyTemplates\\."
//! instant_heuristics: ["return\\s+Animus_Outcome\\.SUCCESS"]
//! timed_heuristics: ["elapsed\\s*\\+=", "duration"]
//! move_heuristics: ["move_towards_point", "point_distance"]
//! template_scaffolds:
//!   instant: "return Animus_StrategyTemplates.instant(...);"
//!   timed: "return Animus_StrategyTemplates.timed(...);"
//!   move: "return Animus_StrategyTemplates.move(...);"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Legacy strategy shapes recognized by the template classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// Completes within a single update
    Instant,
    /// Runs for a duration
    Timed,
    /// Travels towards a target
    Move,
}

impl TemplateKind {
    /// Tie-break priority, highest first.
    pub const PRIORITY: [TemplateKind; 3] = [Self::Timed, Self::Move, Self::Instant];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instant => "instant",
            Self::Timed => "timed",
            Self::Move => "move",
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strategy enforcement configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyRules {
    /// Files to inspect (required)
    pub strategy_file_globs: Vec<String>,
    /// A file matching this is already templated
    #[serde(default)]
    pub template_namespace_regex: Option<String>,
    #[serde(default = "default_banner_start")]
    pub patch_banner_start: String,
    #[serde(default = "default_banner_end")]
    pub patch_banner_end: String,
    #[serde(default)]
    pub instant_heuristics: Vec<String>,
    #[serde(default)]
    pub timed_heuristics: Vec<String>,
    #[serde(default)]
    pub move_heuristics: Vec<String>,
    #[serde(default)]
    pub template_scaffolds: BTreeMap<TemplateKind, String>,
}

fn default_banner_start() -> String {
    "/* ANIMUS SUGGESTION */".to_string()
}

fn default_banner_end() -> String {
    "/* END */".to_string()
}

impl StrategyRules {
    /// Heuristic patterns configured for `kind`.
    pub fn heuristics(&self, kind: TemplateKind) -> &[String] {
        match kind {
            TemplateKind::Instant => &self.instant_heuristics,
            TemplateKind::Timed => &self.timed_heuristics,
            TemplateKind::Move => &self.move_heuristics,
        }
    }

    /// Scaffold text for `kind`, empty when none is configured.
    pub fn scaffold(&self, kind: TemplateKind) -> &str {
        self.template_scaffolds
            .get(&kind)
            .map(String::as_str)
            .unwrap_or("")
    }
}
