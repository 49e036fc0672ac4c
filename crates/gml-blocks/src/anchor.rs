//! Anchor lookup for scaffold insertion

use regex::Regex;
use std::sync::LazyLock;

/// Start of a `build_strategy = function(` definition.
static BUILD_STRATEGY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bbuild_strategy\s*=\s*function\s*\(").expect("Invalid build_strategy regex")
});

/// Byte offset of the first `{` following the first `build_strategy`
/// function definition.
///
/// # Example
/// ```
/// use gml_blocks::anchor::find_strategy_anchor;
///
/// let text = "build_strategy = function(agent) {\n}\n";
/// assert_eq!(find_strategy_anchor(text), Some(33));
/// assert_eq!(find_strategy_anchor("function other() {}"), None);
/// ```
pub fn find_strategy_anchor(text: &str) -> Option<usize> {
    let definition = BUILD_STRATEGY_REGEX.find(text)?;
    text[definition.end()..]
        .find('{')
        .map(|offset| definition.end() + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_skips_parameter_list() {
        let text = "a = 1;\nbuild_strategy = function (agent, ctx)\n{\n    return {};\n}\n";
        let anchor = find_strategy_anchor(text).unwrap();
        assert_eq!(&text[anchor..anchor + 1], "{");
        assert_eq!(text[..anchor].lines().count(), 2);
    }

    #[test]
    fn only_first_definition_counts() {
        let text = "build_strategy = function() {A}\nbuild_strategy = function() {B}\n";
        assert_eq!(find_strategy_anchor(text), Some(28));
    }

    #[test]
    fn no_brace_no_anchor() {
        assert_eq!(find_strategy_anchor("build_strategy = function("), None);
    }
}
