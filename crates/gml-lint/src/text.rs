//! Text heuristics: line lookup, bracket matching and argument counting.
//!
//! No grammar is parsed. Brackets are tracked with an explicit depth counter
//! and string literals are not special-cased.

/// Maps byte offsets to 1-based line numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset at which each line starts
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    /// 1-based line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(idx) => idx + 1,
            Err(idx) => idx,
        }
    }
}

fn is_open(c: u8) -> bool {
    matches!(c, b'(' | b'[' | b'{')
}

fn is_close(c: u8) -> bool {
    matches!(c, b')' | b']' | b'}')
}

/// Given the offset of an opening delimiter, return the offset just past
/// its matching closer, or `text.len()` when the text ends first.
///
/// Only `open`/`close` bytes change the depth.
pub fn matching_close(text: &str, open_at: usize, open: u8, close: u8) -> usize {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open_at) {
        if b == open {
            depth += 1;
        } else if b == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return i + 1;
            }
        }
    }
    text.len()
}

/// Count call arguments: top-level commas outside `()`, `[]` and `{}`, plus
/// one. A blank argument list has zero arguments.
///
/// # Example
/// ```
/// use gml_lint::text::count_args;
///
/// assert_eq!(count_args("a, (b, c), d, e"), 4);
/// assert_eq!(count_args("a, b, c"), 3);
/// assert_eq!(count_args("   "), 0);
/// ```
pub fn count_args(args: &str) -> usize {
    if args.trim().is_empty() {
        return 0;
    }
    let mut depth = 0i32;
    let mut count = 1;
    for &b in args.as_bytes() {
        if is_open(b) {
            depth += 1;
        } else if is_close(b) {
            depth -= 1;
        } else if b == b',' && depth == 0 {
            count += 1;
        }
    }
    count
}

/// At most `chars` characters of `text` starting at byte `from`.
pub fn char_window(text: &str, from: usize, chars: usize) -> &str {
    let tail = &text[from.min(text.len())..];
    match tail.char_indices().nth(chars) {
        Some((end, _)) => &tail[..end],
        None => tail,
    }
}
