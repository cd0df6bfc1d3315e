//! Forward scans for the delimiter that closes an already-located opener.
//!
//! Matching is literal text matching. A `<` or `>` inside a quoted attribute
//! value is seen as markup like any other.

use crate::text::TextBuffer;
use crate::types::{CommentSpan, TagSpan};

pub(crate) const COMMENT_OPEN: &str = "<!--";
pub(crate) const COMMENT_CLOSE: &str = "-->";

/// Find the `</tag_name>` that balances an opener ending at
/// (`start_line`, `start_char`).
///
/// Same-named openers met along the way (`<tag_name` followed by whitespace
/// or `>`) increase the depth; each `</tag_name>` decreases it. The closer
/// that brings the depth to zero is returned.
pub fn find_closing_tag<B: TextBuffer + ?Sized>(
    buffer: &B,
    start_line: usize,
    start_char: usize,
    tag_name: &str,
) -> Option<TagSpan> {
    let name: Vec<char> = tag_name.chars().collect();
    let mut depth = 1usize;

    for line_idx in start_line..buffer.len_lines() {
        let Some(line) = buffer.line(line_idx) else {
            break;
        };
        let chars: Vec<char> = line.chars().collect();
        let from = if line_idx == start_line { start_char } else { 0 };

        for i in from..chars.len() {
            if chars[i] != '<' {
                continue;
            }
            let rest = &chars[i..];
            if is_same_name_opener(rest, &name) {
                depth += 1;
                tracing::trace!(tag = tag_name, line = line_idx, col = i, depth, "nested opener");
            } else if let Some(len) = same_name_closer_len(rest, &name) {
                depth -= 1;
                tracing::trace!(tag = tag_name, line = line_idx, col = i, depth, "closer");
                if depth == 0 {
                    return Some(TagSpan::new(line_idx, i, i + len));
                }
            }
        }
    }

    None
}

/// `<name` followed by whitespace or `>`.
fn is_same_name_opener(rest: &[char], name: &[char]) -> bool {
    rest.len() > name.len() + 1
        && rest[1..=name.len()] == *name
        && matches!(rest[name.len() + 1], c if c.is_whitespace() || c == '>')
}

/// Length of `</name>` if `rest` starts with it.
fn same_name_closer_len(rest: &[char], name: &[char]) -> Option<usize> {
    let len = name.len() + 3;
    let matches = rest.len() >= len
        && rest[1] == '/'
        && rest[2..2 + name.len()] == *name
        && rest[len - 1] == '>';
    matches.then_some(len)
}

/// Find the first `<!-- </tag_name> -->` at or after (`start_line`, `start_char`).
///
/// Only an exact closing comment is sought; same-named commented openers in
/// between are not counted.
pub fn find_closing_comment<B: TextBuffer + ?Sized>(
    buffer: &B,
    start_line: usize,
    start_char: usize,
    tag_name: &str,
) -> Option<CommentSpan> {
    let wanted = format!("</{tag_name}>");

    for line_idx in start_line..buffer.len_lines() {
        let Some(line) = buffer.line(line_idx) else {
            break;
        };
        let chars: Vec<char> = line.chars().collect();
        let mut col = if line_idx == start_line { start_char } else { 0 };

        while let Some(open) = find_marker(&chars, COMMENT_OPEN, col) {
            let Some(close) = find_marker(&chars, COMMENT_CLOSE, open + COMMENT_OPEN.len()) else {
                tracing::debug!(line = line_idx, col = open, "comment start without end on line");
                break;
            };
            let inner: String = chars[open + COMMENT_OPEN.len()..close].iter().collect();
            let inner = inner.trim();
            if inner == wanted {
                return Some(CommentSpan {
                    span: TagSpan::new(line_idx, open, close + COMMENT_CLOSE.len()),
                    inner: inner.into(),
                });
            }
            col = close + COMMENT_CLOSE.len();
        }
    }

    None
}

/// Char index of the first occurrence of `marker` at or after `from`.
pub(crate) fn find_marker(chars: &[char], marker: &str, from: usize) -> Option<usize> {
    let marker: Vec<char> = marker.chars().collect();
    if chars.len() < marker.len() {
        return None;
    }
    (from..=chars.len() - marker.len()).find(|&i| chars[i..i + marker.len()] == *marker)
}

/// Char index of the last occurrence of `marker` starting at or before `upto`.
pub(crate) fn rfind_marker(chars: &[char], marker: &str, upto: usize) -> Option<usize> {
    let marker: Vec<char> = marker.chars().collect();
    if chars.len() < marker.len() {
        return None;
    }
    let last = upto.min(chars.len() - marker.len());
    (0..=last)
        .rev()
        .find(|&i| chars[i..i + marker.len()] == *marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::EditorRope;

    #[test]
    fn test_nested_same_name_closes_outer() {
        let rope = EditorRope::from_str("<div><div>x</div></div>");
        let span = find_closing_tag(&rope, 0, 5, "div").unwrap();
        assert_eq!(span, TagSpan::new(0, 17, 23));
    }

    #[test]
    fn test_inner_opener_closes_inner() {
        let rope = EditorRope::from_str("<div><div>x</div></div>");
        let span = find_closing_tag(&rope, 0, 10, "div").unwrap();
        assert_eq!(span, TagSpan::new(0, 11, 17));
    }

    #[test]
    fn test_cross_line_closer() {
        let rope = EditorRope::from_str("<section>\n  <p>text</p>\n</section>");
        let span = find_closing_tag(&rope, 0, 9, "section").unwrap();
        assert_eq!(span, TagSpan::new(2, 0, 10));
    }

    #[test]
    fn test_name_boundary_is_enforced() {
        // `<divider>` and `</divider>` are not `div`.
        let rope = EditorRope::from_str("<div><divider></divider></div>");
        let span = find_closing_tag(&rope, 0, 5, "div").unwrap();
        assert_eq!(span, TagSpan::new(0, 24, 30));
    }

    #[test]
    fn test_opener_with_attributes_counts() {
        let rope = EditorRope::from_str("<ul>\n<ul class=\"x\">\n</ul>\n</ul>");
        let span = find_closing_tag(&rope, 0, 4, "ul").unwrap();
        assert_eq!(span.line, 3);
    }

    #[test]
    fn test_self_closing_same_name_not_counted() {
        let rope = EditorRope::from_str("<x><x/></x>");
        let span = find_closing_tag(&rope, 0, 3, "x").unwrap();
        assert_eq!(span, TagSpan::new(0, 7, 11));
    }

    #[test]
    fn test_case_sensitive_match() {
        let rope = EditorRope::from_str("<Div>x</div>");
        assert_eq!(find_closing_tag(&rope, 0, 5, "Div"), None);
    }

    #[test]
    fn test_unbalanced_returns_none() {
        let rope = EditorRope::from_str("<div>\n<div>\n</div>");
        assert_eq!(find_closing_tag(&rope, 0, 5, "div"), None);
    }

    #[test]
    fn test_closing_comment_exact_match() {
        let rope = EditorRope::from_str("<!-- <p> -->\ntext\n<!--   </p>   -->");
        let found = find_closing_comment(&rope, 0, 12, "p").unwrap();
        assert_eq!(found.span, TagSpan::new(2, 0, 17));
        assert_eq!(found.inner, "</p>");
    }

    #[test]
    fn test_closing_comment_skips_other_comments() {
        let rope = EditorRope::from_str("<!-- note --><!-- </span> --><!-- </p> -->");
        let found = find_closing_comment(&rope, 0, 0, "p").unwrap();
        assert_eq!(found.span, TagSpan::new(0, 29, 42));
    }

    #[test]
    fn test_closing_comment_first_match_wins_without_depth() {
        let rope = EditorRope::from_str(
            "<!-- <div> -->\n<!-- <div> -->\n<!-- </div> -->\n<!-- </div> -->",
        );
        let found = find_closing_comment(&rope, 0, 14, "div").unwrap();
        assert_eq!(found.span.line, 2);
    }

    #[test]
    fn test_unterminated_comment_is_skipped() {
        let rope = EditorRope::from_str("<!-- </p>\n<!-- </p> -->");
        let found = find_closing_comment(&rope, 0, 0, "p").unwrap();
        assert_eq!(found.span.line, 1);
    }

    #[test]
    fn test_find_marker_helpers() {
        let chars: Vec<char> = "a <!-- b --> c".chars().collect();
        assert_eq!(find_marker(&chars, COMMENT_OPEN, 0), Some(2));
        assert_eq!(find_marker(&chars, COMMENT_CLOSE, 6), Some(9));
        assert_eq!(rfind_marker(&chars, COMMENT_OPEN, 13), Some(2));
        assert_eq!(rfind_marker(&chars, COMMENT_OPEN, 1), None);
    }
}
