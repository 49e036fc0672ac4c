//! Findings reported by the scanners.

use std::fmt;

use serde::Serialize;

/// Broad family a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Style,
    Logic,
    Architecture,
    Contract,
    Nondeterminism,
    Performance,
}

/// Identifier of every rule the linter can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleId {
    Tabs,
    TrailingWhitespace,
    SilentReturn,
    GlobalState,
    Legacy,
    Random,
    WallClock,
    PlannerArgs,
    PlanShapeAssertion,
    StrategyInterface,
    Snapshot,
    LegacyInPlanner,
    AgentTooHeavy,
}

impl RuleId {
    /// Stable dotted id used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tabs => "style.tabs",
            Self::TrailingWhitespace => "style.trailing_ws",
            Self::SilentReturn => "logic.silent_return",
            Self::GlobalState => "arch.global_state",
            Self::Legacy => "arch.legacy",
            Self::Random => "nondeterminism.random",
            Self::WallClock => "nondeterminism.wallclock",
            Self::PlannerArgs => "contract.planner_args",
            Self::PlanShapeAssertion => "contract.plan_shape.assertion",
            Self::StrategyInterface => "contract.strategy_iface",
            Self::Snapshot => "perf.snapshot",
            Self::LegacyInPlanner => "arch.legacy_in_planner",
            Self::AgentTooHeavy => "arch.agent_too_heavy",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Tabs | Self::TrailingWhitespace => Category::Style,
            Self::SilentReturn => Category::Logic,
            Self::GlobalState | Self::Legacy | Self::LegacyInPlanner | Self::AgentTooHeavy => {
                Category::Architecture
            }
            Self::Random | Self::WallClock => Category::Nondeterminism,
            Self::PlannerArgs | Self::PlanShapeAssertion | Self::StrategyInterface => {
                Category::Contract
            }
            Self::Snapshot => Category::Performance,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RuleId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One rule violation at a file and line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Project-relative POSIX path
    pub path: String,
    /// 1-based
    pub line: usize,
    pub category: Category,
    pub id: RuleId,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Finding {
    pub fn new(path: impl Into<String>, line: usize, id: RuleId, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line,
            category: id.category(),
            id,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: [{}] {}", self.path, self.line, self.id, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  ↳ {hint}")?;
        }
        Ok(())
    }
}
