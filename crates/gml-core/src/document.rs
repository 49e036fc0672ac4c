//! JSON documents: the manifest and per-script metadata.
//!
//! Both are kept as `serde_json::Value` so fields this crate does not know
//! about survive a rewrite unchanged and in their original order.

use serde_json::{Value, json};

use crate::{Error, Result};
use gml_fs::{NormalizedPath, RobustnessConfig};

/// Parse a JSON document from disk.
///
/// A missing file is reported as [`Error::Fs`]; anything unreadable or not
/// valid JSON is [`Error::MalformedDocument`].
pub fn load_json(path: &NormalizedPath) -> Result<Value> {
    let bytes = std::fs::read(path.to_native()).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::Fs(gml_fs::Error::io(path.to_native(), e))
        } else {
            malformed(path, e)
        }
    })?;
    serde_json::from_slice(&bytes).map_err(|e| malformed(path, e))
}

fn malformed(path: &NormalizedPath, e: impl std::fmt::Display) -> Error {
    Error::MalformedDocument {
        path: path.to_native(),
        message: e.to_string(),
    }
}

/// Two-space indented JSON with a trailing newline. Non-ASCII text is kept.
pub fn to_pretty(value: &Value) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

/// Writes documents with a backup taken first.
///
/// All writes of one operation share a single stamp.
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    stamp: String,
    robustness: RobustnessConfig,
}

impl DocumentWriter {
    pub fn new(stamp: impl Into<String>) -> Self {
        Self {
            stamp: stamp.into(),
            robustness: RobustnessConfig::default(),
        }
    }

    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    /// Path the next backup of `path` would take.
    pub fn planned_backup(&self, path: &NormalizedPath) -> NormalizedPath {
        gml_fs::next_backup_path(path, &self.stamp)
    }

    /// Back up `path`, then replace it with `value`. Returns the backup path.
    pub fn write(&self, path: &NormalizedPath, value: &Value) -> Result<NormalizedPath> {
        let text = to_pretty(value)?;
        let backup = gml_fs::create_backup(path, &self.stamp)?;
        gml_fs::io::write_atomic(path, text.as_bytes(), self.robustness)?;
        tracing::debug!(path = %path, backup = %backup, "document written");
        Ok(backup)
    }
}

/// Per-script metadata document.
#[derive(Debug, Clone)]
pub struct Metadata {
    value: Value,
}

impl Metadata {
    /// Load and require a JSON object.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let value = load_json(path)?;
        if !value.is_object() {
            return Err(malformed(path, "metadata must be a JSON object"));
        }
        Ok(Self { value })
    }

    /// `name`, then `Name`. Empty strings count as absent.
    pub fn name(&self) -> Option<&str> {
        ["name", "Name"]
            .into_iter()
            .filter_map(|key| self.value.get(key).and_then(Value::as_str))
            .find(|name| !name.is_empty())
    }

    pub fn set_name(&mut self, name: &str) {
        if let Some(object) = self.value.as_object_mut() {
            object.insert("name".to_string(), Value::String(name.to_string()));
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// How a manifest entry was brought in line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryUpdate {
    Updated,
    Appended,
}

/// A resource declared by the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredResource {
    pub name: String,
    pub path: String,
}

/// Project manifest with a `resources` array keyed by `id.path`.
#[derive(Debug, Clone)]
pub struct Manifest {
    value: Value,
}

impl Manifest {
    /// Load and validate the shape: a JSON object whose `resources`, when
    /// present, is an array.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ManifestNotFound {
                path: path.to_native(),
            });
        }
        let value = load_json(path)?;
        match value.get("resources") {
            _ if !value.is_object() => Err(malformed(path, "manifest must be a JSON object")),
            Some(resources) if !resources.is_array() => {
                Err(malformed(path, "`resources` must be an array"))
            }
            _ => Ok(Self { value }),
        }
    }

    fn resources(&self) -> &[Value] {
        self.value
            .get("resources")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn position(&self, path: &str) -> Option<usize> {
        self.resources()
            .iter()
            .position(|res| res.pointer("/id/path").and_then(Value::as_str) == Some(path))
    }

    /// True when an entry is declared for `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.position(path).is_some()
    }

    /// Declared name of the entry for `path`.
    pub fn entry_name(&self, path: &str) -> Option<&str> {
        let idx = self.position(path)?;
        self.resources()[idx]
            .pointer("/id/name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Entries with both a name and a path, and the count of entries
    /// lacking either.
    pub fn declared(&self) -> (Vec<DeclaredResource>, usize) {
        let mut malformed = 0;
        let declared = self
            .resources()
            .iter()
            .filter_map(|res| {
                let name = res.pointer("/id/name").and_then(Value::as_str);
                let path = res.pointer("/id/path").and_then(Value::as_str);
                match (name, path) {
                    (Some(name), Some(path)) if !name.is_empty() && !path.is_empty() => {
                        Some(DeclaredResource {
                            name: name.to_string(),
                            path: path.to_string(),
                        })
                    }
                    _ => {
                        malformed += 1;
                        None
                    }
                }
            })
            .collect();
        (declared, malformed)
    }

    /// Point the entry found under any of `lookup` (first match wins) at
    /// `path` with `name`, or append a new entry.
    pub fn upsert(&mut self, lookup: &[&str], name: &str, path: &str) -> EntryUpdate {
        let found = lookup.iter().find_map(|candidate| self.position(candidate));
        let Some(object) = self.value.as_object_mut() else {
            return EntryUpdate::Appended;
        };
        let resources = object
            .entry("resources")
            .or_insert_with(|| Value::Array(Vec::new()));
        let Some(resources) = resources.as_array_mut() else {
            return EntryUpdate::Appended;
        };

        let id = found
            .and_then(|idx| resources[idx].get_mut("id"))
            .and_then(Value::as_object_mut);
        let updated = match id {
            Some(id) => {
                id.insert("name".to_string(), Value::String(name.to_string()));
                id.insert("path".to_string(), Value::String(path.to_string()));
                EntryUpdate::Updated
            }
            None => {
                resources.push(json!({ "id": { "name": name, "path": path } }));
                EntryUpdate::Appended
            }
        };

        // Entries are keyed by path: drop any other entry now sharing it
        let kept = found.unwrap_or(resources.len() - 1);
        let mut idx = 0;
        resources.retain(|res| {
            let keep =
                idx == kept || res.pointer("/id/path").and_then(Value::as_str) != Some(path);
            idx += 1;
            keep
        });
        updated
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn manifest(value: Value) -> Manifest {
        Manifest { value }
    }

    #[test]
    fn test_upsert_drops_entry_already_at_new_path() {
        let mut m = manifest(json!({
            "resources": [
                {"id": {"name": "Bar", "path": "scripts/Foo/Bar.yy"}, "order": 0},
                {"id": {"name": "Foo", "path": "scripts/Foo/Foo.yy"}, "order": 0}
            ]
        }));
        let update = m.upsert(
            &["scripts/Foo/Foo.yy", "scripts/Foo/Bar.yy"],
            "Bar",
            "scripts/Foo/Bar.yy",
        );
        assert_eq!(update, EntryUpdate::Updated);
        assert_eq!(
            m.value()["resources"],
            json!([{"id": {"name": "Bar", "path": "scripts/Foo/Bar.yy"}, "order": 0}])
        );
    }

    #[test]
    fn test_upsert_updates_in_place_keeping_order() {
        let mut m = manifest(json!({
            "resources": [
                {"id": {"name": "Foo", "path": "scripts/Foo/Foo.yy"}, "order": 1},
                {"id": {"name": "Baz", "path": "scripts/Baz/Baz.yy"}}
            ],
            "name": "GOAP"
        }));
        let update = m.upsert(&["scripts/Foo/Foo.yy"], "Bar", "scripts/Foo/Bar.yy");
        assert_eq!(update, EntryUpdate::Updated);
        assert_eq!(
            to_pretty(m.value()).unwrap(),
            to_pretty(&json!({
                "resources": [
                    {"id": {"name": "Bar", "path": "scripts/Foo/Bar.yy"}, "order": 1},
                    {"id": {"name": "Baz", "path": "scripts/Baz/Baz.yy"}}
                ],
                "name": "GOAP"
            }))
            .unwrap()
        );
    }

    #[test]
    fn test_upsert_falls_back_to_second_lookup() {
        let mut m = manifest(json!({"resources": [{"id": {"name": "Bar", "path": "new.yy"}}]}));
        assert_eq!(m.upsert(&["old.yy", "new.yy"], "Bar", "new.yy"), EntryUpdate::Updated);
        assert_eq!(m.declared().0.len(), 1);
    }

    #[test]
    fn test_upsert_appends_and_creates_resources() {
        let mut m = manifest(json!({"name": "GOAP"}));
        assert_eq!(m.upsert(&["a.yy"], "A", "a.yy"), EntryUpdate::Appended);
        assert_eq!(m.entry_name("a.yy"), Some("A"));
    }

    #[test]
    fn test_declared_counts_malformed() {
        let m = manifest(json!({"resources": [
            {"id": {"name": "A", "path": "a.yy"}},
            {"id": {"name": "B"}},
            {"other": true}
        ]}));
        let (declared, malformed) = m.declared();
        assert_eq!(declared.len(), 1);
        assert_eq!(malformed, 2);
    }

    #[test]
    fn test_metadata_name_fallback() {
        let meta = Metadata {
            value: json!({"name": "", "Name": "Legacy"}),
        };
        assert_eq!(meta.name(), Some("Legacy"));

        let mut meta = Metadata {
            value: json!({"resourceType": "GMScript", "Name": "Legacy"}),
        };
        meta.set_name("Fresh");
        assert_eq!(meta.name(), Some("Fresh"));
        assert_eq!(
            serde_json::to_string(meta.value()).unwrap(),
            r#"{"resourceType":"GMScript","Name":"Legacy","name":"Fresh"}"#
        );
    }

    #[test]
    fn test_pretty_keeps_non_ascii() {
        let text = to_pretty(&json!({"name": "Größe"})).unwrap();
        assert_eq!(text, "{\n  \"name\": \"Größe\"\n}\n");
    }
}
