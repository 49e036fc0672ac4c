//! Command implementations

mod lint;
mod reconcile;

pub use lint::{run_apply_suggestions, run_lint, run_strategy};
pub use reconcile::{run_check, run_inventory, run_rename, run_repair};

use std::path::Path;

use gml_fs::NormalizedPath;

/// Resolve an optional user path against the working root.
fn resolve(root: &NormalizedPath, path: &Path) -> NormalizedPath {
    if path.is_absolute() {
        NormalizedPath::new(path)
    } else {
        root.join(&path.to_string_lossy())
    }
}
