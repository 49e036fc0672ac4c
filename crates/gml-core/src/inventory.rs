//! Module inventory: which files, functions and metadata belong to each stem.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::Result;
use crate::files::{glob_set, has_extension, project_files};
use gml_fs::NormalizedPath;
use gml_meta::ProjectConfig;

static FUNCTION_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*function\s+([A-Za-z0-9_]+)\s*\(").expect("Invalid function declaration regex")
});

/// Everything recorded under one module stem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleEntry {
    /// Content files, root-relative
    pub files: Vec<String>,
    /// Named functions declared in those files, in file order
    pub functions: Vec<String>,
    /// Metadata files, root-relative
    pub resources: Vec<String>,
}

/// Inventory keyed by module stem, sorted.
pub type Inventory = BTreeMap<String, ModuleEntry>;

/// Named functions declared at the start of a line.
pub fn declared_functions(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .filter_map(|line| FUNCTION_DECL.captures(line))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Build the inventory for the project under `root`.
///
/// Content files come from the script globs plus any content file directly
/// in the root. Metadata files count when their content sibling would match
/// the script globs.
pub fn build_inventory(root: &NormalizedPath, config: &ProjectConfig) -> Result<Inventory> {
    let globs = glob_set(&config.script_globs)?;
    let mut inventory = Inventory::new();

    for rel in project_files(root)? {
        let Some(stem) = rel.stem().map(str::to_string) else {
            continue;
        };
        if has_extension(&rel, &config.content_extension) {
            let at_root = !rel.as_str().contains('/');
            let hidden = rel.as_str().starts_with('.');
            if !globs.is_match(rel.as_str()) && !(at_root && !hidden) {
                continue;
            }
            let text = gml_fs::io::read_text(&root.join(rel.as_str()))?;
            let entry = inventory.entry(stem).or_default();
            entry.files.push(rel.to_string());
            entry
                .functions
                .extend(declared_functions(&text).map(str::to_string));
        } else if has_extension(&rel, &config.metadata_extension) {
            let sibling = rel.with_extension(&config.content_extension);
            if globs.is_match(sibling.as_str()) {
                inventory.entry(stem).or_default().resources.push(rel.to_string());
            }
        }
    }

    tracing::debug!(modules = inventory.len(), "inventory built");
    Ok(inventory)
}

/// Two-space indented JSON of the inventory, with a trailing newline.
pub fn to_json(inventory: &Inventory) -> Result<String> {
    let mut text = serde_json::to_string_pretty(inventory)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_functions() {
        let text = "function plan_step(a) {\n  function inner (b) {}\n}\nvar f = function() {};\n//function nope(\n";
        let names: Vec<_> = declared_functions(text).collect();
        assert_eq!(names, ["plan_step", "inner"]);
    }
}
