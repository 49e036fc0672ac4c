//! Timestamped suggestion blocks inserted at an explicit offset.

use crate::error::{Error, Result};

/// Text every suggestion banner starts with.
pub const SUGGESTION_MARKER: &str = "===== ANIMUS TEMPLATE (from suggestions";

const SUGGESTION_END: &str = "===== END ANIMUS TEMPLATE ===== */";

/// True when the text already carries a suggestion block.
pub fn has_suggestion(text: &str) -> bool {
    text.contains(SUGGESTION_MARKER)
}

/// Insert `code` as a commented suggestion block at character index
/// `anchor_index`.
///
/// # Errors
/// Returns `Error::AnchorOutOfRange` when the index lies past the end of the
/// text.
///
/// # Example
/// ```
/// use gml_blocks::suggestion::insert_suggestion;
///
/// let patched = insert_suggestion("ab", 1, "x = 1;", "2026-01-01 00:00:00").unwrap();
/// assert!(patched.starts_with("a/* ===== ANIMUS TEMPLATE"));
/// assert!(patched.contains("\n// x = 1;\n"));
/// assert!(patched.ends_with("*/\nb"));
/// ```
pub fn insert_suggestion(text: &str, anchor_index: usize, code: &str, stamp: &str) -> Result<String> {
    let len = text.chars().count();
    let offset = if anchor_index == len {
        text.len()
    } else {
        text.char_indices()
            .nth(anchor_index)
            .map(|(offset, _)| offset)
            .ok_or(Error::AnchorOutOfRange {
                index: anchor_index,
                len,
            })?
    };

    let body = code.replace('\n', "\n// ");
    let block = format!("/* {SUGGESTION_MARKER} {stamp}) =====\n// {body}\n{SUGGESTION_END}\n");

    let mut patched = String::with_capacity(text.len() + block.len());
    patched.push_str(&text[..offset]);
    patched.push_str(&block);
    patched.push_str(&text[offset..]);
    Ok(patched)
}
