//! Reports returned by reconciliation operations.

use std::fmt;

use crate::mover::MoveMethod;
use gml_fs::NormalizedPath;

/// Non-fatal condition met while reconciling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// No manifest entry for the resource; one is created
    ManifestEntryMissing { path: String },
    /// The resource order file does not exist; it is left alone
    OrderFileMissing { path: NormalizedPath },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ManifestEntryMissing { path } => {
                write!(f, "Resource for {path} not found in manifest; creating new entry")
            }
            Self::OrderFileMissing { path } => {
                write!(f, "{path} not found; skipping order update")
            }
        }
    }
}

/// One mutation, performed or planned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Move {
        from: NormalizedPath,
        to: NormalizedPath,
        /// `None` when the move was only planned
        method: Option<MoveMethod>,
    },
    UpdateDocument {
        path: NormalizedPath,
        backup: NormalizedPath,
    },
    AppendOrder {
        path: NormalizedPath,
        entry: String,
    },
}

impl Change {
    /// User-facing line, phrased as a plan in dry-run mode.
    pub fn message(&self, applied: bool) -> String {
        match (self, applied) {
            (Self::Move { from, to, method }, true) => {
                let method = method.unwrap_or(MoveMethod::Plain);
                format!("{method} {from} -> {to}")
            }
            (Self::Move { from, to, .. }, false) => {
                format!("(dry-run) Would move {from} -> {to}")
            }
            (Self::UpdateDocument { path, backup }, true) => {
                format!("Updated {path} (backup: {backup})")
            }
            (Self::UpdateDocument { path, backup }, false) => {
                format!("(dry-run) Would update {path} (backup would be {backup})")
            }
            (Self::AppendOrder { entry, .. }, true) => {
                format!("Added to resource order: {entry}")
            }
            (Self::AppendOrder { entry, .. }, false) => {
                format!("(dry-run) Would add to resource order: {entry}")
            }
        }
    }
}

/// Final state of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Dry run: changes were computed, nothing was touched
    Planned,
    Applied,
    /// Names and paths were already aligned
    AlreadyAligned,
}

/// Result of a rename or repair.
#[derive(Debug, Clone)]
pub struct ReconcileReport {
    /// Human-readable plan, computed before anything is touched
    pub plan: Vec<String>,
    /// Changes in the order they were made (or would be made)
    pub changes: Vec<Change>,
    pub warnings: Vec<Warning>,
    pub outcome: Outcome,
}

impl ReconcileReport {
    pub(crate) fn new(plan: Vec<String>, outcome: Outcome) -> Self {
        Self {
            plan,
            changes: Vec::new(),
            warnings: Vec::new(),
            outcome,
        }
    }

    pub(crate) fn aligned() -> Self {
        Self::new(Vec::new(), Outcome::AlreadyAligned)
    }

    pub fn applied(&self) -> bool {
        self.outcome == Outcome::Applied
    }

    /// Change lines in order, phrased for the outcome.
    pub fn change_lines(&self) -> impl Iterator<Item = String> + '_ {
        let applied = self.applied();
        self.changes.iter().map(move |c| c.message(applied))
    }

    /// Backups written by this operation.
    pub fn backups(&self) -> impl Iterator<Item = &NormalizedPath> {
        self.changes.iter().filter_map(|c| match c {
            Change::UpdateDocument { backup, .. } => Some(backup),
            _ => None,
        })
    }
}
