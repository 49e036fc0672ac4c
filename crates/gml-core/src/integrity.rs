//! Read-only audit of a whole project.
//!
//! Checks every content file matched by the configured script globs against
//! its metadata and the manifest, then every manifest entry against the disk,
//! then the resource order file.

use std::fmt;

use crate::document::{Manifest, Metadata};
use crate::engine::ReconcileEngine;
use crate::files::{glob_set, has_extension, project_files};
use crate::order::ResourceOrder;
use crate::Result;

/// A consistency problem found by the audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    /// Content file without a metadata sibling
    MissingMetadata { content: String },
    /// Metadata name differs from the file stem
    NameMismatch {
        metadata: String,
        name: String,
        stem: String,
    },
    /// Metadata file the manifest does not declare
    Undeclared { path: String },
    /// Manifest entry name differs from the metadata name
    DeclaredNameMismatch {
        path: String,
        declared: String,
        actual: String,
    },
    /// Manifest entry whose file is not on disk
    MissingResource { path: String },
    /// Script metadata without a content sibling
    MissingContent { metadata: String, expected: String },
    /// Manifest entry lacking `id.name` or `id.path`
    MalformedEntries { count: usize },
    /// Resource absent from the resource order file
    NotInOrder { path: String },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMetadata { content } => write!(f, "Missing metadata for script: {content}"),
            Self::NameMismatch {
                metadata,
                name,
                stem,
            } => write!(
                f,
                "Name mismatch: {metadata} has name '{name}' but file is '{stem}'"
            ),
            Self::Undeclared { path } => {
                write!(f, "Manifest does not declare script resource for: {path}")
            }
            Self::DeclaredNameMismatch {
                path,
                declared,
                actual,
            } => write!(f, "Manifest declares name '{declared}' but {path} has '{actual}'"),
            Self::MissingResource { path } => {
                write!(f, "Manifest references missing file on disk: {path}")
            }
            Self::MissingContent { metadata, expected } => {
                write!(f, "Script resource missing content sibling: {metadata} expects {expected}")
            }
            Self::MalformedEntries { count } => {
                write!(f, "{count} manifest resource(s) lack id.name or id.path")
            }
            Self::NotInOrder { path } => write!(f, "Resource order missing entry for: {path}"),
        }
    }
}

/// Result of an audit.
#[derive(Debug, Clone, Default)]
pub struct IntegrityReport {
    pub issues: Vec<IntegrityIssue>,
    pub warnings: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

impl ReconcileEngine {
    /// Audit the project without changing anything.
    ///
    /// # Errors
    ///
    /// A missing or malformed manifest, a malformed metadata file or an
    /// invalid script glob aborts the audit.
    pub fn check(&self) -> Result<IntegrityReport> {
        let config = self.config();
        let root = self.root();
        let manifest = Manifest::load(&self.manifest_path())?;
        let project = self.project_dir();
        let (declared, malformed) = manifest.declared();
        let globs = glob_set(&config.script_globs)?;

        let mut report = IntegrityReport::default();
        if malformed > 0 {
            report
                .warnings
                .push(IntegrityIssue::MalformedEntries { count: malformed });
        }

        let scripts: Vec<_> = project_files(root)?
            .into_iter()
            .filter(|p| has_extension(p, &config.content_extension) && globs.is_match(p.as_str()))
            .collect();
        tracing::debug!(count = scripts.len(), "auditing scripts");

        let mut expected_order = Vec::new();
        for script in &scripts {
            let content = root.join(script.as_str());
            let stem = content.stem().unwrap_or_default();
            let metadata_path = content.with_extension(&config.metadata_extension);
            if !metadata_path.is_file() {
                if config.require_script_yy {
                    report.issues.push(IntegrityIssue::MissingMetadata {
                        content: script.to_string(),
                    });
                }
                continue;
            }

            let metadata = Metadata::load(&metadata_path)?;
            let rel = self.project_relative(&metadata_path)?;
            expected_order.push(rel.clone());
            let shown = metadata_path
                .relative_to(root)
                .unwrap_or_else(|| metadata_path.clone())
                .to_string();

            if config.enforce_filename_matches_name
                && let Some(name) = metadata.name()
                && name != stem
            {
                report.issues.push(IntegrityIssue::NameMismatch {
                    metadata: shown.clone(),
                    name: name.to_string(),
                    stem: stem.to_string(),
                });
            }

            if config.enforce_path_sync {
                match declared.iter().find(|d| d.path == rel) {
                    None => report.issues.push(IntegrityIssue::Undeclared { path: rel.clone() }),
                    Some(entry) => {
                        if let Some(name) = metadata.name()
                            && entry.name != name
                        {
                            report.issues.push(IntegrityIssue::DeclaredNameMismatch {
                                path: rel.clone(),
                                declared: entry.name.clone(),
                                actual: name.to_string(),
                            });
                        }
                    }
                }
            }
        }

        for entry in &declared {
            let on_disk = project.join(&entry.path);
            if !on_disk.exists() {
                let issue = IntegrityIssue::MissingResource {
                    path: entry.path.clone(),
                };
                if config.fail_on_missing_resource {
                    report.issues.push(issue);
                } else {
                    report.warnings.push(issue);
                }
                continue;
            }
            let is_script = entry.path.starts_with("scripts/") || entry.path.contains("/scripts/");
            if is_script && has_extension(&on_disk, &config.metadata_extension) {
                let content = on_disk.with_extension(&config.content_extension);
                if !content.is_file() {
                    report.issues.push(IntegrityIssue::MissingContent {
                        metadata: entry.path.clone(),
                        expected: content.file_name().unwrap_or_default().to_string(),
                    });
                }
            }
        }

        if let Some(order_path) = self.order_path()
            && let Some(order) = ResourceOrder::load(&order_path)?
        {
            let listed: std::collections::HashSet<&str> = order.entries().collect();
            report.warnings.extend(
                expected_order
                    .into_iter()
                    .filter(|rel| !listed.contains(rel.as_str()))
                    .map(|path| IntegrityIssue::NotInOrder { path }),
            );
        }

        tracing::info!(
            issues = report.issues.len(),
            warnings = report.warnings.len(),
            "integrity check finished"
        );
        Ok(report)
    }
}
