//! Project-level operations for GML game projects
//!
//! This crate coordinates the Layer 0 crates to keep a project's script
//! resources consistent:
//!
//! - **Reconciliation**: `rename` and `repair` align file stems, metadata
//!   names and manifest entries, with dry-run, backups and index-aware moves
//! - **Integrity audit**: read-only check of every script against its
//!   metadata, the manifest and the resource order file
//! - **Inventory**: per-module listing of files, declared functions and
//!   metadata resources
//!
//! # Architecture
//!
//! ```text
//!                 gml-cli
//!                    |
//!                gml-core
//!                    |
//!        +-----------+-----------+
//!        |           |           |
//!     gml-fs      gml-git    gml-meta
//! ```
//!
//! # Example
//!
//! ```ignore
//! use gml_core::{ReconcileEngine, ReconcileOptions, SourceOfTruth};
//! use gml_fs::NormalizedPath;
//!
//! let engine = ReconcileEngine::new(NormalizedPath::new("."), Default::default());
//! let report = engine.repair(
//!     "GOAP/scripts/Foo/Foo.gml",
//!     SourceOfTruth::Filesystem,
//!     ReconcileOptions::default(),
//! )?;
//! for line in report.change_lines() {
//!     println!("{line}");
//! }
//! ```

pub mod document;
pub mod engine;
pub mod error;
pub mod files;
pub mod integrity;
pub mod inventory;
pub mod mover;
pub mod order;
pub mod report;
pub mod truth;

pub use document::{DeclaredResource, DocumentWriter, EntryUpdate, Manifest, Metadata};
pub use engine::{ReconcileEngine, ReconcileOptions};
pub use error::{Error, Result};
pub use integrity::{IntegrityIssue, IntegrityReport};
pub use inventory::{Inventory, ModuleEntry, build_inventory};
pub use mover::{FileMover, MoveMethod, PlainMover, VcsAwareMover};
pub use order::ResourceOrder;
pub use report::{Change, Outcome, ReconcileReport, Warning};
pub use truth::{ObservedNames, SourceOfTruth};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn error_destination_exists_mentions_force() {
        let error = Error::DestinationExists {
            path: PathBuf::from("scripts/Bar/Bar.gml"),
        };
        let display = error.to_string();
        assert!(display.contains("scripts/Bar/Bar.gml"), "got: {display}");
        assert!(display.contains("--force"), "got: {display}");
    }
}
