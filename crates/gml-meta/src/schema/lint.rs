//! Lint rule set - loaded from tools/animus_rules.yaml
//!
//! # Example YAML
//!
//! ```yaml
//! ban_tabs: "\t"
//! ban_trailing_ws: "[ \t]+$"
//! ban_silent_return: "^\\s*return\\s*;\\s*$"
//! ban_globals: "\\bglobal\\.\\w+"
//! allowed_globals: ["global.debug_enabled"]
//! ban_legacy: ["\\bGOAP_Node\\b", "\\bGOAP_ActionPlan\\b"]
//! ban_random: ["\\birandom\\(", "\\brandom_range\\("]
//! planner_call_regex: "\\bplanner\\.plan\\s*\\("
//! required_arg_count: 4
//! strategy_required_methods: [start, update, stop, invariant_check]
//! prefer_snapshot_false:
//!   enabled: true
//!   pattern: "\\.snapshot\\(([^)]*)\\)"
//! core_files:
//!   planner: ["GOAP/scripts/Animus_Planner/*.gml"]
//!   agent: ["GOAP/scripts/Animus_Agent/*.gml"]
//! ```

use serde::{Deserialize, Serialize};

/// Complete lint rule set.
///
/// Patterns are regular expressions. An absent or empty pattern disables its
/// rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LintRules {
    /// Matched per line
    pub ban_tabs: Option<String>,
    /// Matched per line
    pub ban_trailing_ws: Option<String>,
    /// Matched over the whole text in multi-line mode
    pub ban_silent_return: Option<String>,
    pub ban_globals: Option<String>,
    /// Exact tokens exempt from `ban_globals`
    pub allowed_globals: Vec<String>,
    /// Alternatives joined into one pattern
    pub ban_legacy: Vec<String>,
    pub ban_random: Vec<String>,
    pub ban_wallclock: Vec<String>,
    /// Must end right after the opening parenthesis of the call
    pub planner_call_regex: Option<String>,
    /// When unset, argument counts are not checked
    pub required_arg_count: Option<usize>,
    pub planner_call_hint: String,
    /// Call expected shortly after every planner call
    pub plan_shape_assertion: String,
    /// Characters after the closing parenthesis searched for the assertion
    pub assertion_window: usize,
    pub strategy_required_methods: Vec<String>,
    pub prefer_snapshot_false: SnapshotPreference,
    pub core_files: CoreFiles,
    pub agent_tick_limits: TickLimits,
}

impl Default for LintRules {
    fn default() -> Self {
        Self {
            ban_tabs: None,
            ban_trailing_ws: None,
            ban_silent_return: None,
            ban_globals: None,
            allowed_globals: Vec::new(),
            ban_legacy: Vec::new(),
            ban_random: Vec::new(),
            ban_wallclock: Vec::new(),
            planner_call_regex: None,
            required_arg_count: None,
            planner_call_hint: "Use: plan(agent, goals_to_check, last_goal, memory)".to_string(),
            plan_shape_assertion: "assert_plan_shape".to_string(),
            assertion_window: 200,
            strategy_required_methods: Vec::new(),
            prefer_snapshot_false: SnapshotPreference::default(),
            core_files: CoreFiles::default(),
            agent_tick_limits: TickLimits::default(),
        }
    }
}

impl LintRules {
    /// Fixed sanity rules usable without any configuration document.
    pub fn builtin() -> Self {
        Self {
            ban_tabs: Some(r"\t".to_string()),
            ban_trailing_ws: Some(r"[ \t]+$".to_string()),
            ban_silent_return: Some(r"^\s*return\s*;\s*$".to_string()),
            ban_globals: Some(r"\bglobal\.\w+".to_string()),
            ban_legacy: vec![r"\bGOAP_Node\b".to_string(), r"\bGOAP_ActionPlan\b".to_string()],
            strategy_required_methods: ["start", "update", "stop", "invariant_check"]
                .into_iter()
                .map(String::from)
                .collect(),
            ..Self::default()
        }
    }
}

/// Prefer `memory.snapshot(false)` before planning.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SnapshotPreference {
    pub enabled: bool,
    /// First capture group holds the call argument
    pub pattern: String,
}

/// Glob patterns selecting files with stricter architectural contracts.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CoreFiles {
    pub planner: Vec<String>,
    pub agent: Vec<String>,
}

/// Thresholds above which an `agent.tick` body counts as too heavy.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct TickLimits {
    pub max_assignments: usize,
    pub max_branches: usize,
}

impl Default for TickLimits {
    fn default() -> Self {
        Self {
            max_assignments: 40,
            max_branches: 12,
        }
    }
}
