//! Per-file scanners.
//!
//! Every scanner borrows one [`SourceFile`] and the compiled rules and yields
//! findings lazily.

use regex::{Match, Regex};
use std::sync::LazyLock;

use crate::finding::{Finding, RuleId};
use crate::rules::{CompiledRules, PlannerContract};
use crate::text::{LineIndex, char_window, count_args, matching_close};

static STRATEGY_STRUCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\bbuild_strategy\b.*?\{").expect("Invalid strategy struct regex"));

static AGENT_TICK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bagent(?:\.|)?tick\s*\([^)]*\)\s*\{").expect("Invalid agent tick regex")
});

static BRANCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bif\b|\bswitch\b").expect("Invalid branch regex"));

/// One script loaded for scanning.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Project-relative POSIX path
    pub path: String,
    pub text: String,
    lines: LineIndex,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = LineIndex::new(&text);
        Self {
            path: path.into(),
            text,
            lines,
        }
    }

    pub fn line_of(&self, offset: usize) -> usize {
        self.lines.line_of(offset)
    }

    fn at(&self, offset: usize, id: RuleId, message: impl Into<String>) -> Finding {
        Finding::new(self.path.clone(), self.line_of(offset), id, message)
    }
}

/// Tab and trailing-whitespace checks, one line at a time.
pub fn line_rules<'a>(src: &'a SourceFile, rules: &'a CompiledRules) -> impl Iterator<Item = Finding> + 'a {
    src.text.lines().enumerate().flat_map(move |(idx, line)| {
        let line_no = idx + 1;
        let tab = rules
            .tabs
            .as_ref()
            .filter(|re| re.is_match(line))
            .map(|_| Finding::new(src.path.clone(), line_no, RuleId::Tabs, "Tab character"));
        let trailing = rules
            .trailing_ws
            .as_ref()
            .filter(|re| re.is_match(line))
            .map(|_| {
                Finding::new(src.path.clone(), line_no, RuleId::TrailingWhitespace, "Trailing whitespace")
            });
        tab.into_iter().chain(trailing)
    })
}

/// Bare `return;` statements.
pub fn silent_returns<'a>(src: &'a SourceFile, rules: &'a CompiledRules) -> impl Iterator<Item = Finding> + 'a {
    rules
        .silent_return
        .iter()
        .flat_map(move |re| re.find_iter(&src.text))
        .map(move |m| src.at(m.start(), RuleId::SilentReturn, "Silent 'return;' (return an explicit value)"))
}

/// Global state not on the allow list.
pub fn globals<'a>(src: &'a SourceFile, rules: &'a CompiledRules) -> impl Iterator<Item = Finding> + 'a {
    rules
        .globals
        .iter()
        .flat_map(move |re| re.find_iter(&src.text))
        .filter(move |m| !rules.allowed_globals.contains(m.as_str()))
        .map(move |m| {
            src.at(
                m.start(),
                RuleId::GlobalState,
                format!("Global usage '{}' not allowed", m.as_str()),
            )
            .with_hint("Refactor to pass state/context")
        })
}

/// Legacy, random and wall-clock bans.
pub fn bans<'a>(src: &'a SourceFile, rules: &'a CompiledRules) -> impl Iterator<Item = Finding> + 'a {
    rules.bans().flat_map(move |(id, re)| {
        re.find_iter(&src.text)
            .map(move |m| src.at(m.start(), id, format!("Forbidden pattern: '{}'", m.as_str())))
    })
}

/// Argument count and plan-shape assertion after every planner call.
pub fn planner_calls<'a>(src: &'a SourceFile, rules: &'a CompiledRules) -> impl Iterator<Item = Finding> + 'a {
    rules.planner.iter().flat_map(move |contract| {
        contract
            .call
            .find_iter(&src.text)
            .flat_map(move |m| check_planner_call(src, contract, m))
    })
}

fn check_planner_call(src: &SourceFile, contract: &PlannerContract, m: Match<'_>) -> Vec<Finding> {
    let text = &src.text;
    let Some(open) = call_paren(text, &m) else {
        return Vec::new();
    };
    let close = matching_close(text, open, b'(', b')');
    let inner_end = if text[..close].ends_with(')') { close - 1 } else { close };
    let args = &text[open + 1..inner_end];

    let mut findings = Vec::new();
    if let Some(expected) = contract.required_args {
        let actual = count_args(args);
        if actual != expected {
            findings.push(
                src.at(
                    m.start(),
                    RuleId::PlannerArgs,
                    format!("Planner call has {actual} args (expected {expected})."),
                )
                .with_hint(contract.hint.clone()),
            );
        }
    }
    if !contract.assertion.is_empty()
        && !char_window(text, close, contract.window).contains(&contract.assertion)
    {
        findings.push(src.at(
            m.start(),
            RuleId::PlanShapeAssertion,
            format!("Missing {}(...) after plan().", contract.assertion),
        ));
    }
    findings
}

/// Offset of the call's opening parenthesis: the last matched byte, or the
/// first non-blank byte after the match.
fn call_paren(text: &str, m: &Match<'_>) -> Option<usize> {
    if m.as_str().ends_with('(') {
        return Some(m.end() - 1);
    }
    let rest = &text[m.end()..];
    let skipped = rest.len() - rest.trim_start().len();
    rest[skipped..].starts_with('(').then_some(m.end() + skipped)
}

/// Required methods inside every `build_strategy` body.
pub fn strategy_interfaces<'a>(src: &'a SourceFile, rules: &'a CompiledRules) -> impl Iterator<Item = Finding> + 'a {
    let active = !rules.strategy_methods.is_empty();
    active
        .then(move || STRATEGY_STRUCT.find_iter(&src.text))
        .into_iter()
        .flatten()
        .filter_map(move |m| {
            let open = m.end() - 1;
            let body = &src.text[open..matching_close(&src.text, open, b'{', b'}')];
            let missing: Vec<&str> = rules
                .strategy_methods
                .iter()
                .filter(|(_, re)| !re.is_match(body))
                .map(|(method, _)| method.as_str())
                .collect();
            (!missing.is_empty()).then(|| {
                src.at(
                    m.start(),
                    RuleId::StrategyInterface,
                    format!("Strategy missing methods: {}", missing.join(", ")),
                )
                .with_hint("Use templates in Animus_StrategyTemplates.gml or implement required methods.")
            })
        })
}

/// `snapshot(...)` calls whose argument is empty or `true`.
pub fn snapshots<'a>(src: &'a SourceFile, rules: &'a CompiledRules) -> impl Iterator<Item = Finding> + 'a {
    rules
        .snapshot
        .iter()
        .flat_map(move |re| re.captures_iter(&src.text))
        .filter_map(move |caps| {
            let arg = caps.get(1).map(|g| g.as_str().trim()).unwrap_or("");
            let whole = caps.get(0)?;
            (arg.is_empty() || arg.eq_ignore_ascii_case("true")).then(|| {
                src.at(
                    whole.start(),
                    RuleId::Snapshot,
                    "Prefer memory.snapshot(false) before planning.",
                )
            })
        })
}

/// Architectural contracts of the planner and agent core files.
pub fn core_contracts<'a>(src: &'a SourceFile, rules: &'a CompiledRules) -> impl Iterator<Item = Finding> + 'a {
    let planner = rules
        .planner_files
        .as_ref()
        .filter(|set| set.is_match(&src.path))
        .and(rules.legacy.as_ref())
        .filter(|legacy| legacy.is_match(&src.text))
        .map(|_| {
            Finding::new(
                src.path.clone(),
                1,
                RuleId::LegacyInPlanner,
                "Planner must not reference legacy types.",
            )
        });

    let is_agent = rules
        .agent_files
        .as_ref()
        .is_some_and(|set| set.is_match(&src.path));
    let limits = rules.tick_limits;
    let heavy_ticks = is_agent
        .then(move || AGENT_TICK.find_iter(&src.text))
        .into_iter()
        .flatten()
        .filter_map(move |m| {
            let open = m.end() - 1;
            let body = &src.text[open..matching_close(&src.text, open, b'{', b'}')];
            let assignments = body.matches('=').count();
            let branches = BRANCH.find_iter(body).count();
            (assignments > limits.max_assignments || branches > limits.max_branches).then(|| {
                src.at(
                    m.start(),
                    RuleId::AgentTooHeavy,
                    format!(
                        "agent.tick is too heavy ({assignments} assignments, {branches} branches); keep it orchestration-only."
                    ),
                )
            })
        });

    planner.into_iter().chain(heavy_ticks)
}
