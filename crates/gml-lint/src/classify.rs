//! Heuristic classification of legacy strategies into template kinds.

use std::fmt;

use regex::Regex;

use crate::rules::{Compiler, PatternError};
use gml_meta::{StrategyRules, TemplateKind};

/// Number of matching heuristics per template kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub instant: usize,
    pub timed: usize,
    pub movement: usize,
}

impl Scores {
    pub fn get(&self, kind: TemplateKind) -> usize {
        match kind {
            TemplateKind::Instant => self.instant,
            TemplateKind::Timed => self.timed,
            TemplateKind::Move => self.movement,
        }
    }

    fn set(&mut self, kind: TemplateKind, score: usize) {
        match kind {
            TemplateKind::Instant => self.instant = score,
            TemplateKind::Timed => self.timed = score,
            TemplateKind::Move => self.movement = score,
        }
    }

    /// Highest-scoring kind. Ties resolve by [`TemplateKind::PRIORITY`], so
    /// all-zero scores pick `timed`.
    pub fn best(&self) -> TemplateKind {
        TemplateKind::PRIORITY
            .into_iter()
            .fold(None::<(TemplateKind, usize)>, |best, kind| {
                let score = self.get(kind);
                match best {
                    Some((_, top)) if top >= score => best,
                    _ => Some((kind, score)),
                }
            })
            .map_or(TemplateKind::Timed, |(kind, _)| kind)
    }
}

impl fmt::Display for Scores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "instant={} timed={} move={}",
            self.instant, self.timed, self.movement
        )
    }
}

/// Template kind picked for a file and the scores behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: TemplateKind,
    pub scores: Scores,
}

/// Scores text against the configured heuristics.
#[derive(Debug)]
pub struct TemplateClassifier {
    heuristics: Vec<(TemplateKind, Vec<Regex>)>,
}

impl TemplateClassifier {
    /// Compile the heuristics of `rules`. Invalid patterns are skipped and
    /// returned.
    pub fn new(rules: &StrategyRules) -> (Self, Vec<PatternError>) {
        let mut compiler = Compiler::default();
        let heuristics = [TemplateKind::Instant, TemplateKind::Timed, TemplateKind::Move]
            .into_iter()
            .map(|kind| {
                let key = format!("{kind}_heuristics");
                (kind, compiler.each(&key, rules.heuristics(kind), true))
            })
            .collect();
        (Self { heuristics }, compiler.errors)
    }

    /// Score each kind by how many of its patterns match at least once.
    /// `.` matches newlines.
    pub fn classify(&self, text: &str) -> Classification {
        let mut scores = Scores::default();
        for (kind, patterns) in &self.heuristics {
            let score = patterns.iter().filter(|re| re.is_match(text)).count();
            scores.set(*kind, score);
        }
        Classification {
            kind: scores.best(),
            scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn rules() -> StrategyRules {
        StrategyRules {
            strategy_file_globs: Vec::new(),
            template_namespace_regex: None,
            patch_banner_start: "/*S*/".to_string(),
            patch_banner_end: "/*E*/".to_string(),
            instant_heuristics: vec![r"return\s+SUCCESS".to_string()],
            timed_heuristics: vec![r"elapsed\s*\+=".to_string(), "duration".to_string()],
            move_heuristics: vec!["move_towards_point".to_string()],
            template_scaffolds: Default::default(),
        }
    }

    #[rstest]
    #[case(0, 0, 0, TemplateKind::Timed)]
    #[case(1, 1, 1, TemplateKind::Timed)]
    #[case(2, 1, 2, TemplateKind::Move)]
    #[case(3, 0, 0, TemplateKind::Instant)]
    #[case(2, 2, 1, TemplateKind::Timed)]
    #[case(1, 0, 1, TemplateKind::Move)]
    fn test_tie_priority(
        #[case] instant: usize,
        #[case] timed: usize,
        #[case] movement: usize,
        #[case] expected: TemplateKind,
    ) {
        let scores = Scores {
            instant,
            timed,
            movement,
        };
        assert_eq!(scores.best(), expected);
    }

    #[test]
    fn test_each_pattern_counts_once() {
        let (classifier, errors) = TemplateClassifier::new(&rules());
        assert!(errors.is_empty());
        let text = "elapsed += dt;\nelapsed += dt;\nif (elapsed > duration) {\n  return SUCCESS;\n}\n";
        let result = classifier.classify(text);
        assert_eq!(
            result.scores,
            Scores {
                instant: 1,
                timed: 2,
                movement: 0
            }
        );
        assert_eq!(result.kind, TemplateKind::Timed);
    }

    #[test]
    fn test_dot_matches_newline() {
        let mut rules = rules();
        rules.move_heuristics = vec!["move_towards.*target".to_string()];
        let (classifier, _) = TemplateClassifier::new(&rules);
        let result = classifier.classify("move_towards_point(\n  target.x, target.y)");
        assert_eq!(result.kind, TemplateKind::Move);
    }

    #[test]
    fn test_invalid_heuristic_reported() {
        let mut rules = rules();
        rules.instant_heuristics.push("(".to_string());
        let (_, errors) = TemplateClassifier::new(&rules);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].key, "instant_heuristics");
    }
}
