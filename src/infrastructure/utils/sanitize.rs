use std::collections::{HashMap, HashSet};

use ammonia::Builder;

/// Removes every tag and attribute from user-supplied text.
///
/// `<script>` and `<style>` elements are dropped together with their
/// content; other elements are unwrapped and keep their text. The result is
/// HTML-escaped, so it can be placed in an HTML body verbatim.
pub fn strip_markup(input: &str) -> String {
    Builder::default()
        .tags(HashSet::new())
        .tag_attributes(HashMap::new())
        .generic_attributes(HashSet::new())
        .link_rel(None)
        .clean(input)
        .to_string()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(strip_markup("Hello there"), "Hello there");
    }

    #[test]
    fn tags_are_unwrapped() {
        assert_eq!(strip_markup("<p>Hello <b>world</b></p>"), "Hello world");
    }

    #[test]
    fn script_content_is_removed() {
        assert_eq!(strip_markup("<script>alert('x')</script>Hi"), "Hi");
        assert_eq!(strip_markup("<style>body{}</style>Hi"), "Hi");
    }

    #[test]
    fn event_handler_attributes_are_dropped() {
        assert_eq!(strip_markup(r#"<img src="x" onerror="alert(1)">Hi"#), "Hi");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(strip_markup("   spaced  \n"), "spaced");
    }

    #[test]
    fn markup_only_input_becomes_empty() {
        assert_eq!(strip_markup("<script>steal()</script>"), "");
    }
}
