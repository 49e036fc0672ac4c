//! Application of saved template suggestions.

use serde::Deserialize;

use crate::error::{Error, Result};
use gml_blocks::{has_suggestion, insert_suggestion};
use gml_fs::NormalizedPath;

/// Suggestions document, as written by an earlier analysis pass.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestionsDocument {
    #[serde(default)]
    pub non_templated: Vec<Suggestion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Suggestion {
    /// Project-relative path of the target script
    pub file: String,
    /// Character offset to insert at
    #[serde(default)]
    pub anchor_index: Option<usize>,
    #[serde(default)]
    pub suggested_template_code: String,
}

/// Outcome for one suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    Inserted,
    MissingFile,
    NoAnchor,
    AnchorOutOfRange,
    AlreadyPresent,
}

/// Insert every applicable suggestion from `input` into its script.
///
/// Returns `None` when the suggestions document does not exist.
pub fn apply_suggestions(
    root: &NormalizedPath,
    input: &NormalizedPath,
    stamp: &str,
) -> Result<Option<Vec<(String, SuggestionOutcome)>>> {
    if !input.is_file() {
        tracing::debug!(path = %input, "no suggestions document");
        return Ok(None);
    }
    let raw = gml_fs::io::read_text(input)?;
    let document: SuggestionsDocument = serde_json::from_str(&raw).map_err(|source| Error::Json {
        path: input.to_native(),
        source,
    })?;

    let mut outcomes = Vec::with_capacity(document.non_templated.len());
    for item in document.non_templated {
        let outcome = apply_one(root, &item, stamp)?;
        outcomes.push((item.file, outcome));
    }
    Ok(Some(outcomes))
}

fn apply_one(root: &NormalizedPath, item: &Suggestion, stamp: &str) -> Result<SuggestionOutcome> {
    let path = root.join(&item.file);
    if !path.is_file() {
        return Ok(SuggestionOutcome::MissingFile);
    }
    let Some(anchor) = item.anchor_index else {
        return Ok(SuggestionOutcome::NoAnchor);
    };

    let text = gml_fs::io::read_text(&path)?;
    if has_suggestion(&text) {
        return Ok(SuggestionOutcome::AlreadyPresent);
    }
    match insert_suggestion(&text, anchor, &item.suggested_template_code, stamp) {
        Ok(patched) => {
            gml_fs::io::write_text(&path, &patched)?;
            tracing::info!(path = %path, anchor, "suggestion inserted");
            Ok(SuggestionOutcome::Inserted)
        }
        Err(gml_blocks::Error::AnchorOutOfRange { index, len }) => {
            tracing::warn!(path = %path, index, len, "suggestion anchor out of range");
            Ok(SuggestionOutcome::AnchorOutOfRange)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup(doc: &str, script: &str) -> (TempDir, NormalizedPath, NormalizedPath) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("tools")).unwrap();
        fs::write(dir.path().join("tools/.strategy_suggestions.json"), doc).unwrap();
        fs::write(dir.path().join("act.gml"), script).unwrap();
        let root = NormalizedPath::new(dir.path());
        let input = root.join("tools/.strategy_suggestions.json");
        (dir, root, input)
    }

    #[test]
    fn test_inserts_at_anchor() {
        let doc = r#"{"non_templated": [{"file": "act.gml", "anchor_index": 2, "suggested_template_code": "a();\nb();"}]}"#;
        let (dir, root, input) = setup(doc, "xy{}");

        let outcomes = apply_suggestions(&root, &input, "2026-01-01 00:00:00").unwrap().unwrap();
        assert_eq!(outcomes, vec![("act.gml".to_string(), SuggestionOutcome::Inserted)]);

        let text = fs::read_to_string(dir.path().join("act.gml")).unwrap();
        assert!(text.starts_with("xy/* ===== ANIMUS TEMPLATE (from suggestions 2026-01-01 00:00:00) =====\n// a();\n// b();\n"));
        assert!(text.ends_with("===== END ANIMUS TEMPLATE ===== */\n{}"));
    }

    #[test]
    fn test_second_run_skips() {
        let doc = r#"{"non_templated": [{"file": "act.gml", "anchor_index": 0, "suggested_template_code": "a();"}]}"#;
        let (_dir, root, input) = setup(doc, "{}");

        apply_suggestions(&root, &input, "t").unwrap();
        let outcomes = apply_suggestions(&root, &input, "t").unwrap().unwrap();
        assert_eq!(outcomes[0].1, SuggestionOutcome::AlreadyPresent);
    }

    #[test]
    fn test_skips_missing_file_and_anchor() {
        let doc = r#"{"non_templated": [{"file": "gone.gml", "anchor_index": 0}, {"file": "act.gml"}, {"file": "act.gml", "anchor_index": 99}]}"#;
        let (dir, root, input) = setup(doc, "{}");

        let outcomes = apply_suggestions(&root, &input, "t").unwrap().unwrap();
        let kinds: Vec<_> = outcomes.into_iter().map(|(_, o)| o).collect();
        assert_eq!(
            kinds,
            vec![
                SuggestionOutcome::MissingFile,
                SuggestionOutcome::NoAnchor,
                SuggestionOutcome::AnchorOutOfRange
            ]
        );
        assert_eq!(fs::read_to_string(dir.path().join("act.gml")).unwrap(), "{}");
    }

    #[test]
    fn test_missing_document_is_skip() {
        let dir = TempDir::new().unwrap();
        let root = NormalizedPath::new(dir.path());
        let input = root.join("tools/.strategy_suggestions.json");
        assert!(apply_suggestions(&root, &input, "t").unwrap().is_none());
    }
}
