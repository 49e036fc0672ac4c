//! Banner-delimited scaffold blocks.

use crate::anchor::find_strategy_anchor;

/// Opening and closing markers around an injected scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub start: String,
    pub end: String,
}

impl Banner {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl Default for Banner {
    fn default() -> Self {
        Self::new("/* ANIMUS SUGGESTION */", "/* END */")
    }
}

/// Outcome of [`inject_scaffold`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injection {
    /// The scaffold was inserted; holds the patched text.
    Inserted(String),
    /// Both banner markers are already in the text.
    AlreadyPresent,
    /// No `build_strategy` function body to anchor on.
    NoAnchor,
}

/// True when both banner markers occur in the text.
pub fn has_banner(text: &str, banner: &Banner) -> bool {
    text.contains(&banner.start) && text.contains(&banner.end)
}

/// Prefix every line with `// ` unless it already is a line comment.
///
/// # Example
/// ```
/// use gml_blocks::scaffold::comment_out;
///
/// assert_eq!(comment_out("a();\n// note\n\nb();"), "// a();\n// note\n//\n// b();");
/// ```
pub fn comment_out(body: &str) -> String {
    body.trim_end()
        .lines()
        .map(|line| {
            let line = line.trim_end();
            if line.trim_start().starts_with("//") {
                line.to_string()
            } else if line.is_empty() {
                "//".to_string()
            } else {
                format!("// {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_block(banner: &Banner, body: &str) -> String {
    let commented = comment_out(body);
    if commented.is_empty() {
        format!("{}\n{}\n", banner.start, banner.end)
    } else {
        format!("{}\n{}\n{}\n", banner.start, commented, banner.end)
    }
}

/// Insert a commented scaffold right before the body brace of the first
/// `build_strategy` function.
///
/// Idempotent: text that already carries both banner markers is left alone.
pub fn inject_scaffold(text: &str, banner: &Banner, body: &str) -> Injection {
    if has_banner(text, banner) {
        return Injection::AlreadyPresent;
    }
    let Some(anchor) = find_strategy_anchor(text) else {
        return Injection::NoAnchor;
    };

    let block = format_block(banner, body);
    let mut patched = String::with_capacity(text.len() + block.len());
    patched.push_str(&text[..anchor]);
    patched.push_str(&block);
    patched.push_str(&text[anchor..]);

    tracing::debug!(anchor, "scaffold inserted");
    Injection::Inserted(patched)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY: &str = "function Act_Wait() constructor {\n    build_strategy = function(agent) {\n        return { start: undefined };\n    }\n}\n";

    #[test]
    fn test_inject_before_body_brace() {
        let banner = Banner::default();
        let Injection::Inserted(patched) = inject_scaffold(LEGACY, &banner, "return T.timed(1);") else {
            panic!("expected insertion");
        };
        assert!(patched.contains(
            "function(agent) /* ANIMUS SUGGESTION */\n// return T.timed(1);\n/* END */\n{"
        ));
    }

    #[test]
    fn test_inject_is_idempotent() {
        let banner = Banner::default();
        let Injection::Inserted(patched) = inject_scaffold(LEGACY, &banner, "x") else {
            panic!("expected insertion");
        };
        assert_eq!(inject_scaffold(&patched, &banner, "x"), Injection::AlreadyPresent);
    }

    #[test]
    fn test_no_anchor() {
        let banner = Banner::default();
        assert_eq!(
            inject_scaffold("function f() {}\n", &banner, "x"),
            Injection::NoAnchor
        );
    }

    #[test]
    fn test_empty_scaffold_keeps_banners() {
        let banner = Banner::new("/*S*/", "/*E*/");
        let Injection::Inserted(patched) = inject_scaffold(LEGACY, &banner, "") else {
            panic!("expected insertion");
        };
        assert!(patched.contains("/*S*/\n/*E*/\n{"));
    }
}
