//! Compilation of [`LintRules`] into ready-to-run matchers.
//!
//! Compilation never fails as a whole. Each invalid pattern disables only
//! its own rule and is reported as a [`PatternError`].

use std::collections::HashSet;
use std::fmt;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use regex::{Regex, RegexBuilder};

use crate::finding::RuleId;
use gml_meta::{LintRules, TickLimits};

/// A configured pattern that could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    /// Configuration key holding the pattern
    pub key: String,
    pub pattern: String,
    pub message: String,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid pattern for `{}` ({:?}): {}", self.key, self.pattern, self.message)
    }
}

/// Collects pattern errors while compiling.
#[derive(Default)]
pub(crate) struct Compiler {
    pub errors: Vec<PatternError>,
}

impl Compiler {
    fn fail(&mut self, key: &str, pattern: &str, message: impl fmt::Display) {
        tracing::warn!(key, pattern, "rule disabled: {message}");
        self.errors.push(PatternError {
            key: key.to_string(),
            pattern: pattern.to_string(),
            message: message.to_string(),
        });
    }

    /// Compile an optional pattern. Absent and empty patterns yield `None`.
    pub fn regex(&mut self, key: &str, pattern: Option<&str>) -> Option<Regex> {
        self.build(key, pattern?, false)
    }

    /// Same as [`Compiler::regex`] with `^`/`$` matching at line boundaries.
    pub fn multiline(&mut self, key: &str, pattern: Option<&str>) -> Option<Regex> {
        self.build(key, pattern?, true)
    }

    /// Join alternatives into a single pattern.
    pub fn alternatives(&mut self, key: &str, patterns: &[String]) -> Option<Regex> {
        let joined = patterns
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| format!("(?:{p})"))
            .collect::<Vec<_>>()
            .join("|");
        self.build(key, &joined, false)
    }

    /// Each pattern compiled on its own, invalid ones dropped.
    pub fn each(&mut self, key: &str, patterns: &[String], dot_all: bool) -> Vec<Regex> {
        patterns
            .iter()
            .filter(|p| !p.is_empty())
            .filter_map(|p| match RegexBuilder::new(p).dot_matches_new_line(dot_all).build() {
                Ok(re) => Some(re),
                Err(e) => {
                    self.fail(key, p, e);
                    None
                }
            })
            .collect()
    }

    /// Globs matched against project-relative POSIX paths. `*` stays within
    /// one path segment; `**` crosses segments.
    pub fn globs(&mut self, key: &str, patterns: &[String]) -> Option<GlobSet> {
        if patterns.is_empty() {
            return None;
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            match GlobBuilder::new(pattern).literal_separator(true).build() {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => self.fail(key, pattern, e),
            }
        }
        match builder.build() {
            Ok(set) if !set.is_empty() => Some(set),
            Ok(_) => None,
            Err(e) => {
                self.fail(key, &patterns.join(", "), e);
                None
            }
        }
    }

    fn build(&mut self, key: &str, pattern: &str, multi_line: bool) -> Option<Regex> {
        if pattern.is_empty() {
            return None;
        }
        match RegexBuilder::new(pattern).multi_line(multi_line).build() {
            Ok(re) => Some(re),
            Err(e) => {
                self.fail(key, pattern, e);
                None
            }
        }
    }
}

/// Planner-call contract.
#[derive(Debug)]
pub struct PlannerContract {
    pub call: Regex,
    pub required_args: Option<usize>,
    pub hint: String,
    pub assertion: String,
    pub window: usize,
}

/// Lint rules with every pattern compiled.
#[derive(Debug)]
pub struct CompiledRules {
    pub tabs: Option<Regex>,
    pub trailing_ws: Option<Regex>,
    pub silent_return: Option<Regex>,
    pub globals: Option<Regex>,
    pub allowed_globals: HashSet<String>,
    pub legacy: Option<Regex>,
    pub random: Option<Regex>,
    pub wallclock: Option<Regex>,
    pub planner: Option<PlannerContract>,
    /// Method name and its `name = function(` matcher
    pub strategy_methods: Vec<(String, Regex)>,
    pub snapshot: Option<Regex>,
    pub planner_files: Option<GlobSet>,
    pub agent_files: Option<GlobSet>,
    pub tick_limits: TickLimits,
}

impl CompiledRules {
    pub fn compile(rules: &LintRules) -> (Self, Vec<PatternError>) {
        let mut c = Compiler::default();

        let planner = c
            .regex("planner_call_regex", rules.planner_call_regex.as_deref())
            .map(|call| PlannerContract {
                call,
                required_args: rules.required_arg_count,
                hint: rules.planner_call_hint.clone(),
                assertion: rules.plan_shape_assertion.clone(),
                window: rules.assertion_window,
            });

        let strategy_methods = rules
            .strategy_required_methods
            .iter()
            .filter(|m| !m.is_empty())
            .filter_map(|method| {
                let pattern = format!(r"\b{}\s*=\s*function\s*\(", regex::escape(method));
                c.regex("strategy_required_methods", Some(&pattern))
                    .map(|re| (method.clone(), re))
            })
            .collect();

        let snapshot = if rules.prefer_snapshot_false.enabled {
            c.regex("prefer_snapshot_false.pattern", Some(&rules.prefer_snapshot_false.pattern))
        } else {
            None
        };

        let compiled = Self {
            tabs: c.regex("ban_tabs", rules.ban_tabs.as_deref()),
            trailing_ws: c.regex("ban_trailing_ws", rules.ban_trailing_ws.as_deref()),
            silent_return: c.multiline("ban_silent_return", rules.ban_silent_return.as_deref()),
            globals: c.regex("ban_globals", rules.ban_globals.as_deref()),
            allowed_globals: rules.allowed_globals.iter().cloned().collect(),
            legacy: c.alternatives("ban_legacy", &rules.ban_legacy),
            random: c.alternatives("ban_random", &rules.ban_random),
            wallclock: c.alternatives("ban_wallclock", &rules.ban_wallclock),
            planner,
            strategy_methods,
            snapshot,
            planner_files: c.globs("core_files.planner", &rules.core_files.planner),
            agent_files: c.globs("core_files.agent", &rules.core_files.agent),
            tick_limits: rules.agent_tick_limits,
        };
        (compiled, c.errors)
    }

    /// Rules that ban a pattern outright.
    pub fn bans(&self) -> impl Iterator<Item = (RuleId, &Regex)> {
        [
            (RuleId::Legacy, self.legacy.as_ref()),
            (RuleId::Random, self.random.as_ref()),
            (RuleId::WallClock, self.wallclock.as_ref()),
        ]
        .into_iter()
        .filter_map(|(id, re)| re.map(|re| (id, re)))
    }
}
