//! Manifest reconciliation engine
//!
//! Keeps three views of every script resource consistent:
//!
//! ```text
//! scripts/Foo/Foo.gml      content file      stem  "Foo"
//! scripts/Foo/Foo.yy       metadata          name  "Foo"
//! GOAP.yyp                 manifest entry    id.name "Foo", id.path "scripts/Foo/Foo.yy"
//! ```
//!
//! Every operation validates all of its preconditions (files present,
//! destinations free, both JSON documents parsed, paths inside the project)
//! before the first mutation, so a failure leaves the project untouched.

use std::fs;
use std::path::Path;

use crate::document::{DocumentWriter, EntryUpdate, Manifest, Metadata};
use crate::mover::{FileMover, MoveMethod, VcsAwareMover};
use crate::order::ResourceOrder;
use crate::report::{Change, Outcome, ReconcileReport, Warning};
use crate::truth::{ObservedNames, SourceOfTruth};
use crate::{Error, Result};
use gml_fs::{NormalizedPath, is_bare_identifier};
use gml_meta::ProjectConfig;

/// Options for rename and repair.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// If true, compute and report every change without touching the disk.
    pub dry_run: bool,
    /// Replace existing destination files.
    pub force: bool,
}

/// A content file and its metadata sibling.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScriptPair {
    content: NormalizedPath,
    metadata: NormalizedPath,
}

/// Everything a validated operation will write.
struct Reconciliation {
    from: ScriptPair,
    to: ScriptPair,
    name: String,
    /// Manifest paths tried in order to find the existing entry
    lookup: Vec<String>,
    metadata: Metadata,
    manifest: Manifest,
    order: Option<ResourceOrder>,
}

/// Engine for rename and repair operations on one project.
pub struct ReconcileEngine {
    /// Working root all configured paths are relative to
    root: NormalizedPath,
    config: ProjectConfig,
    mover: Box<dyn FileMover>,
}

impl ReconcileEngine {
    pub fn new(root: NormalizedPath, config: ProjectConfig) -> Self {
        Self {
            root,
            config,
            mover: Box::new(VcsAwareMover::default()),
        }
    }

    /// Replace the move backend.
    pub fn with_mover(mut self, mover: Box<dyn FileMover>) -> Self {
        self.mover = mover;
        self
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Resolve a user-supplied path against the working root.
    pub fn resolve(&self, path: &str) -> NormalizedPath {
        if Path::new(path).is_absolute() {
            NormalizedPath::new(path)
        } else {
            self.root.join(path)
        }
    }

    pub fn manifest_path(&self) -> NormalizedPath {
        self.resolve(&self.config.yyp_path)
    }

    /// Directory resource paths are relative to.
    pub fn project_dir(&self) -> NormalizedPath {
        self.manifest_path()
            .parent()
            .unwrap_or_else(|| self.root.clone())
    }

    /// Configured resource order file, if any.
    pub fn order_path(&self) -> Option<NormalizedPath> {
        let file = self.config.resource_order_file.trim();
        (!file.is_empty()).then(|| self.resolve(file))
    }

    /// Project-relative POSIX form of `path`.
    pub fn project_relative(&self, path: &NormalizedPath) -> Result<String> {
        let project = self.project_dir();
        path.relative_to(&project)
            .filter(|rel| !matches!(rel.as_str().split('/').next(), None | Some("" | "..")))
            .map(|rel| rel.as_str().to_string())
            .ok_or_else(|| Error::OutsideProject {
                path: path.to_native(),
                project: project.to_native(),
            })
    }

    /// `path` relative to the working root when it lies below it.
    fn shown(&self, path: &NormalizedPath) -> NormalizedPath {
        path.relative_to(&self.root).unwrap_or_else(|| path.clone())
    }

    fn locate(&self, script: &str) -> Result<ScriptPair> {
        let content = self.resolve(script);
        if !content.is_file() {
            return Err(Error::ContentMissing {
                path: content.to_native(),
            });
        }
        let metadata = content.with_extension(&self.config.metadata_extension);
        if !metadata.is_file() {
            tracing::warn!(content = %content, "metadata sibling is missing");
            return Err(Error::MissingMetadata {
                path: metadata.to_native(),
                content: content.to_native(),
            });
        }
        Ok(ScriptPair { content, metadata })
    }

    fn sibling_pair(&self, dir: &NormalizedPath, name: &str) -> ScriptPair {
        ScriptPair {
            content: dir.join(&format!("{name}.{}", self.config.content_extension)),
            metadata: dir.join(&format!("{name}.{}", self.config.metadata_extension)),
        }
    }

    fn check_destinations(&self, from: &ScriptPair, to: &ScriptPair, force: bool) -> Result<()> {
        for (src, dst) in [(&from.content, &to.content), (&from.metadata, &to.metadata)] {
            if src != dst && dst.exists() && !force && !same_file(src, dst) {
                return Err(Error::DestinationExists {
                    path: dst.to_native(),
                });
            }
        }
        Ok(())
    }

    fn load_order(&self) -> Result<Option<ResourceOrder>> {
        match self.order_path() {
            Some(path) => ResourceOrder::load(&path),
            None => Ok(None),
        }
    }

    /// Rename and optionally move a script.
    ///
    /// The manifest entry is looked up by the old metadata path, then by the
    /// new one, so an interrupted rename can be re-run.
    ///
    /// # Errors
    ///
    /// `InvalidName`, `ContentMissing`, `MissingMetadata`,
    /// `DestinationExists`, `ManifestNotFound`, `MalformedDocument` and
    /// `OutsideProject` are all raised before anything is changed.
    pub fn rename(
        &self,
        script: &str,
        new_name: &str,
        new_folder: Option<&str>,
        options: ReconcileOptions,
    ) -> Result<ReconcileReport> {
        if !is_bare_identifier(new_name) {
            return Err(Error::InvalidName {
                name: new_name.to_string(),
            });
        }
        let from = self.locate(script)?;
        let dir = match new_folder {
            Some(folder) => self.resolve(folder),
            None => parent_dir(&from.content),
        };
        let to = self.sibling_pair(&dir, new_name);
        self.check_destinations(&from, &to, options.force)?;

        let manifest = Manifest::load(&self.manifest_path())?;
        let metadata = Metadata::load(&from.metadata)?;
        let old_rel = self.project_relative(&from.metadata)?;
        let new_rel = self.project_relative(&to.metadata)?;
        let order = self.load_order()?;

        let mut plan = vec![
            format!("Move {} -> {}", self.shown(&from.content), self.shown(&to.content)),
            format!("Move {} -> {}", self.shown(&from.metadata), self.shown(&to.metadata)),
            "Update metadata: field `name`".to_string(),
            "Update manifest: id.path & id.name".to_string(),
        ];
        if order.is_some() {
            plan.push(format!("Ensure resource order contains {new_rel}"));
        }

        tracing::debug!(from = %from.content, to = %to.content, "rename validated");
        self.commit(
            plan,
            Reconciliation {
                from,
                to,
                name: new_name.to_string(),
                lookup: vec![old_rel, new_rel],
                metadata,
                manifest,
                order,
            },
            options,
        )
    }

    /// Align file stem, metadata name and manifest entry to one name.
    ///
    /// Does nothing when all three already agree and the manifest entry sits
    /// at the metadata path.
    pub fn repair(
        &self,
        script: &str,
        truth: SourceOfTruth,
        options: ReconcileOptions,
    ) -> Result<ReconcileReport> {
        let from = self.locate(script)?;
        let manifest = Manifest::load(&self.manifest_path())?;
        let metadata = Metadata::load(&from.metadata)?;
        let rel = self.project_relative(&from.metadata)?;

        let stem = from.content.stem().unwrap_or_default().to_string();
        let names = ObservedNames {
            filesystem: &stem,
            metadata: metadata.name(),
            manifest: manifest.entry_name(&rel),
        };
        let desired = truth.desired_name(&names).to_string();
        let aligned = stem == desired
            && names.metadata == Some(desired.as_str())
            && names.manifest == Some(desired.as_str());
        if aligned {
            tracing::info!(name = %desired, "nothing to repair");
            return Ok(ReconcileReport::aligned());
        }

        if !is_bare_identifier(&desired) {
            return Err(Error::InvalidName { name: desired });
        }
        let renames_files = stem != desired;
        let to = if renames_files {
            self.sibling_pair(&parent_dir(&from.content), &desired)
        } else {
            from.clone()
        };
        self.check_destinations(&from, &to, options.force)?;
        let new_rel = self.project_relative(&to.metadata)?;
        let order = self.load_order()?;

        let mut plan = Vec::new();
        if renames_files {
            plan.push(format!("Rename file stems to '{desired}'"));
        }
        plan.push("Update metadata `name` and manifest `id.name`".to_string());

        tracing::debug!(truth = %truth, desired = %desired, "repair validated");
        self.commit(
            plan,
            Reconciliation {
                from,
                to,
                name: desired,
                lookup: vec![rel, new_rel],
                metadata,
                manifest,
                order,
            },
            options,
        )
    }

    fn commit(
        &self,
        plan: Vec<String>,
        work: Reconciliation,
        options: ReconcileOptions,
    ) -> Result<ReconcileReport> {
        let Reconciliation {
            from,
            to,
            name,
            lookup,
            mut metadata,
            mut manifest,
            order,
        } = work;
        let outcome = if options.dry_run {
            Outcome::Planned
        } else {
            Outcome::Applied
        };
        let mut report = ReconcileReport::new(plan, outcome);
        let writer = DocumentWriter::new(gml_fs::backup_stamp());

        for (src, dst) in [(&from.content, &to.content), (&from.metadata, &to.metadata)] {
            if src == dst {
                continue;
            }
            let method = if options.dry_run {
                None
            } else {
                Some(self.move_file(src, dst, options.force)?)
            };
            report.changes.push(Change::Move {
                from: self.shown(src),
                to: self.shown(dst),
                method,
            });
        }

        metadata.set_name(&name);
        report
            .changes
            .push(self.write_document(&writer, &to.metadata, metadata.value(), options)?);

        let new_rel = lookup.last().cloned().unwrap_or_default();
        let keys: Vec<&str> = lookup.iter().map(String::as_str).collect();
        if manifest.upsert(&keys, &name, &new_rel) == EntryUpdate::Appended {
            let warning = Warning::ManifestEntryMissing {
                path: keys.first().copied().unwrap_or_default().to_string(),
            };
            tracing::warn!("{warning}");
            report.warnings.push(warning);
        }
        report.changes.push(self.write_document(
            &writer,
            &self.manifest_path(),
            manifest.value(),
            options,
        )?);

        match order {
            Some(mut order) if !order.contains(&new_rel) => {
                if !options.dry_run {
                    order.append(&new_rel)?;
                }
                report.changes.push(Change::AppendOrder {
                    path: self.shown(order.path()),
                    entry: new_rel,
                });
            }
            Some(_) => {}
            None => {
                if let Some(path) = self.order_path() {
                    let warning = Warning::OrderFileMissing {
                        path: self.shown(&path),
                    };
                    tracing::warn!("{warning}");
                    report.warnings.push(warning);
                }
            }
        }

        Ok(report)
    }

    fn move_file(&self, src: &NormalizedPath, dst: &NormalizedPath, force: bool) -> Result<MoveMethod> {
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent.to_native())
                .map_err(|e| gml_fs::Error::io(parent.to_native(), e))?;
        }
        if force && dst.is_file() && !same_file(src, dst) {
            fs::remove_file(dst.to_native()).map_err(|e| gml_fs::Error::io(dst.to_native(), e))?;
        }
        let method = self.mover.move_file(src, dst)?;
        tracing::info!(src = %src, dst = %dst, %method, "moved");
        Ok(method)
    }

    fn write_document(
        &self,
        writer: &DocumentWriter,
        path: &NormalizedPath,
        value: &serde_json::Value,
        options: ReconcileOptions,
    ) -> Result<Change> {
        let backup = if options.dry_run {
            writer.planned_backup(path)
        } else {
            writer.write(path, value)?
        };
        Ok(Change::UpdateDocument {
            path: self.shown(path),
            backup: self.shown(&backup),
        })
    }
}

/// True when both paths name one file, as on case-insensitive filesystems.
fn same_file(a: &NormalizedPath, b: &NormalizedPath) -> bool {
    match (fs::canonicalize(a.to_native()), fs::canonicalize(b.to_native())) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn parent_dir(path: &NormalizedPath) -> NormalizedPath {
    path.parent().unwrap_or_else(|| NormalizedPath::new(""))
}
