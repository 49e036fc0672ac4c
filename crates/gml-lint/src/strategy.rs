//! Strategy template enforcement.
//!
//! Strategy files that do not reference the template namespace are
//! "non-templated". Each one is classified and, when patching, receives a
//! commented scaffold for its template kind.

use globset::GlobSet;
use regex::Regex;

use crate::classify::{Classification, TemplateClassifier};
use crate::discover::discover_matching;
use crate::error::Result;
use crate::linter::load_source;
use crate::rules::{Compiler, PatternError};
use gml_blocks::{Banner, Injection, inject_scaffold};
use gml_fs::NormalizedPath;
use gml_meta::StrategyRules;

/// Flags of one enforcement run.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyOptions {
    /// Inject scaffolds into non-templated files
    pub patch: bool,
    /// Count non-templated files as issues even when patched
    pub strict: bool,
}

/// What happened to a non-templated file when patching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStatus {
    Injected,
    AlreadyPresent,
    NoAnchor,
}

/// Verdict for one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileVerdict {
    Templated,
    NonTemplated {
        classification: Classification,
        patch: Option<PatchStatus>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Project-relative path
    pub path: NormalizedPath,
    pub verdict: FileVerdict,
}

/// Result of an enforcement run.
#[derive(Debug, Clone, Default)]
pub struct StrategyReport {
    pub files: Vec<FileOutcome>,
    pub issues: usize,
    pub patched: usize,
}

impl StrategyReport {
    pub fn non_templated(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files
            .iter()
            .filter(|f| matches!(f.verdict, FileVerdict::NonTemplated { .. }))
    }
}

/// Compiled strategy rules.
#[derive(Debug)]
pub struct StrategyEnforcer {
    rules: StrategyRules,
    files: Option<GlobSet>,
    namespace: Option<Regex>,
    classifier: TemplateClassifier,
    banner: Banner,
    config_errors: Vec<PatternError>,
}

impl StrategyEnforcer {
    pub fn new(rules: StrategyRules) -> Self {
        let mut compiler = Compiler::default();
        let files = compiler.globs("strategy_file_globs", &rules.strategy_file_globs);
        let namespace = compiler.regex(
            "template_namespace_regex",
            rules.template_namespace_regex.as_deref(),
        );
        let (classifier, heuristic_errors) = TemplateClassifier::new(&rules);
        let banner = Banner::new(&rules.patch_banner_start, &rules.patch_banner_end);

        let mut config_errors = compiler.errors;
        config_errors.extend(heuristic_errors);
        Self {
            rules,
            files,
            namespace,
            classifier,
            banner,
            config_errors,
        }
    }

    /// Patterns that failed to compile.
    pub fn config_errors(&self) -> &[PatternError] {
        &self.config_errors
    }

    /// Classify every candidate under `root`, patching when asked.
    pub fn run(&self, root: &NormalizedPath, options: StrategyOptions) -> Result<StrategyReport> {
        let mut report = StrategyReport::default();
        let Some(globs) = &self.files else {
            tracing::warn!("no strategy file globs configured");
            return Ok(report);
        };

        let candidates = discover_matching(root, "gml", globs)?;
        tracing::debug!(count = candidates.len(), "strategy candidates");

        for relative in candidates {
            let src = load_source(root, &relative)?;
            if self.namespace.as_ref().is_some_and(|ns| ns.is_match(&src.text)) {
                tracing::debug!(path = %relative, "already templated");
                report.files.push(FileOutcome {
                    path: relative,
                    verdict: FileVerdict::Templated,
                });
                continue;
            }

            let classification = self.classifier.classify(&src.text);
            let patch = if options.patch {
                Some(self.patch(root, &relative, &src.text, &classification)?)
            } else {
                None
            };
            if patch == Some(PatchStatus::Injected) {
                report.patched += 1;
            }
            if options.strict || !options.patch {
                report.issues += 1;
            }
            report.files.push(FileOutcome {
                path: relative,
                verdict: FileVerdict::NonTemplated {
                    classification,
                    patch,
                },
            });
        }
        Ok(report)
    }

    fn patch(
        &self,
        root: &NormalizedPath,
        relative: &NormalizedPath,
        text: &str,
        classification: &Classification,
    ) -> Result<PatchStatus> {
        let scaffold = self.rules.scaffold(classification.kind);
        match inject_scaffold(text, &self.banner, scaffold) {
            Injection::Inserted(patched) => {
                gml_fs::io::write_text(&root.join(relative.as_str()), &patched)?;
                tracing::info!(path = %relative, kind = %classification.kind, "scaffold injected");
                Ok(PatchStatus::Injected)
            }
            Injection::AlreadyPresent => Ok(PatchStatus::AlreadyPresent),
            Injection::NoAnchor => {
                tracing::warn!(path = %relative, "no build_strategy anchor");
                Ok(PatchStatus::NoAnchor)
            }
        }
    }
}
