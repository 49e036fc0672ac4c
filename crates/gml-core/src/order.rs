//! Resource order file: newline-separated project-relative paths.

use crate::Result;
use gml_fs::NormalizedPath;

/// Loaded resource order file.
#[derive(Debug, Clone)]
pub struct ResourceOrder {
    path: NormalizedPath,
    text: String,
}

impl ResourceOrder {
    /// `None` when the file does not exist.
    pub fn load(path: &NormalizedPath) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        let text = gml_fs::io::read_text(path)?;
        Ok(Some(Self {
            path: path.clone(),
            text,
        }))
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// True when some line, trimmed, equals `entry`.
    pub fn contains(&self, entry: &str) -> bool {
        self.text.lines().any(|line| line.trim() == entry)
    }

    /// Entries in file order, blank lines skipped.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.text.lines().map(str::trim).filter(|line| !line.is_empty())
    }

    /// Append `entry` as a new line, keeping existing content byte for byte.
    pub fn append(&mut self, entry: &str) -> Result<()> {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push_str(entry);
        self.text.push('\n');
        gml_fs::io::write_text(&self.path, &self.text)?;
        tracing::debug!(path = %self.path, entry, "resource order appended");
        Ok(())
    }
}
