//! Tag-name extraction and self-closing classification.

use std::sync::LazyLock;

use regex::Regex;

/// Elements that never take a closing tag.
pub const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// `<` followed by the tag name, anchored at the start of the delimiter.
static TAG_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<(?P<name>[A-Za-z0-9_]+)").unwrap());

/// Whether `name` is a void element. Casing is ignored.
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

/// A delimiter is self-closing if it spells out `/>` or names a void element.
pub fn is_self_closing(raw_delimiter: &str, tag_name: &str) -> bool {
    raw_delimiter.contains("/>") || is_void_element(tag_name)
}

/// Pull the tag name out of a raw opening delimiter such as `<div class="a">`.
///
/// Returns None for closing delimiters, comments, and anything else that
/// doesn't start with `<` directly followed by word characters.
pub fn extract_tag_name(raw_delimiter: &str) -> Option<&str> {
    TAG_NAME_RE
        .captures(raw_delimiter)
        .and_then(|caps| caps.name("name"))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_elements_case_insensitive() {
        assert!(is_void_element("img"));
        assert!(is_void_element("IMG"));
        assert!(is_void_element("Br"));
        assert!(!is_void_element("div"));
        assert!(!is_void_element("image"));
    }

    #[test]
    fn test_explicit_slash_is_self_closing() {
        assert!(is_self_closing("<my-widget/>", "my"));
        assert!(is_self_closing("<br/>", "br"));
        assert!(is_self_closing("<Foo bar=\"1\" />", "Foo"));
        assert!(!is_self_closing("<div>", "div"));
    }

    #[test]
    fn test_extract_tag_name() {
        assert_eq!(extract_tag_name("<div>"), Some("div"));
        assert_eq!(extract_tag_name("<IMG src=\"a.png\">"), Some("IMG"));
        assert_eq!(extract_tag_name("<h1 id=x>"), Some("h1"));
        assert_eq!(extract_tag_name("<my_tag>"), Some("my_tag"));
    }

    #[test]
    fn test_extract_tag_name_rejects_non_openers() {
        assert_eq!(extract_tag_name("</div>"), None);
        assert_eq!(extract_tag_name("<!-- <div>"), None);
        assert_eq!(extract_tag_name("< div>"), None);
        assert_eq!(extract_tag_name("<>"), None);
        assert_eq!(extract_tag_name("div>"), None);
    }
}
