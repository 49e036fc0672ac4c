//! [`TestProject`] builder for GML project scenarios.
//!
//! The layout mirrors the default project configuration:
//!
//! ```text
//! GOAP/GOAP.yyp
//! GOAP/GOAP.resource_order
//! GOAP/scripts/<folder>/<stem>.gml
//! GOAP/scripts/<folder>/<stem>.yy
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Manifest path relative to the project root.
pub const MANIFEST: &str = "GOAP/GOAP.yyp";
/// Resource order path relative to the project root.
pub const ORDER_FILE: &str = "GOAP/GOAP.resource_order";

/// A temporary project directory with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use gml_test_utils::project::TestProject;
///
/// let project = TestProject::new()
///     .with_script("Foo", "Foo", Some("Foo"))
///     .with_manifest(&[("Foo", "scripts/Foo/Foo.yy")])
///     .with_order(&["scripts/Foo/Foo.yy"]);
/// project.assert_file_exists("GOAP/scripts/Foo/Foo.gml");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative`.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: impl AsRef<[u8]>) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestProject::write {}: {e}", path.display()));
    }

    /// Read `relative` as text.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, relative: &str) -> String {
        let path = self.path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Could not read file {}: {e}", path.display()))
    }

    /// Parse `relative` as JSON.
    pub fn read_json(&self, relative: &str) -> Value {
        serde_json::from_str(&self.read(relative))
            .unwrap_or_else(|e| panic!("Invalid JSON in {relative}: {e}"))
    }

    /// Add `GOAP/scripts/<folder>/<stem>.gml` and, when `name` is given, its
    /// metadata sibling declaring that name.
    pub fn with_script(self, folder: &str, stem: &str, name: Option<&str>) -> Self {
        let dir = format!("GOAP/scripts/{folder}");
        self.write(
            &format!("{dir}/{stem}.gml"),
            format!("function {stem}() {{\n    return 0;\n}}\n"),
        );
        if let Some(name) = name {
            let metadata = json!({
                "resourceType": "GMScript",
                "resourceVersion": "1.0",
                "name": name,
                "isCompatibility": false,
                "parent": {"name": "Scripts", "path": "folders/Scripts.yy"}
            });
            self.write(&format!("{dir}/{stem}.yy"), pretty(&metadata));
        }
        self
    }

    /// Write the manifest declaring `(name, path)` resources.
    pub fn with_manifest(self, resources: &[(&str, &str)]) -> Self {
        let resources: Vec<Value> = resources
            .iter()
            .map(|(name, path)| json!({"id": {"name": name, "path": path}, "order": 0}))
            .collect();
        let manifest = json!({
            "resourceType": "GMProject",
            "name": "GOAP",
            "resources": resources,
            "Options": [],
            "isEcma": false
        });
        self.write(MANIFEST, pretty(&manifest));
        self
    }

    /// Write the resource order file, one entry per line.
    pub fn with_order(self, entries: &[&str]) -> Self {
        let mut text = entries.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        self.write(ORDER_FILE, text);
        self
    }

    /// Every file below the root with its bytes, `.git` excluded.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        WalkDir::new(self.root())
            .into_iter()
            .filter_entry(|e| e.file_name() != ".git")
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let rel = e
                    .path()
                    .strip_prefix(self.root())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/");
                (rel, fs::read(e.path()).unwrap())
            })
            .collect()
    }

    /// Files in `relative_dir` whose name starts with `prefix`.
    pub fn files_starting_with(&self, relative_dir: &str, prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path(relative_dir))
            .unwrap()
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(prefix))
            .collect();
        names.sort();
        names
    }

    /// Initialise the directory as a git repository with every file staged.
    pub fn init_git(&self) -> git2::Repository {
        let repo = crate::git::real_git_repo(self.root());
        crate::git::stage_all(&repo);
        repo
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}

fn pretty(value: &Value) -> String {
    let mut text = serde_json::to_string_pretty(value).unwrap();
    text.push('\n');
    text
}
