//! Resolve the tag at a cursor position.
//!
//! Both modes only ever look at the nearest opener to the left of the
//! cursor on the cursor's own line; the opener's `>` (or the comment's
//! `-->`) must be on that same line too. The matching closer can be any
//! number of lines further down.

use crate::classify::{extract_tag_name, is_self_closing};
use crate::error::{Result, ToggleError};
use crate::matcher::{
    COMMENT_CLOSE, COMMENT_OPEN, find_closing_comment, find_closing_tag, find_marker, rfind_marker,
};
use crate::text::TextBuffer;
use crate::types::{CommentSpan, LocatedComment, LocatedTag, Position, TagSpan};

/// Find the live tag pair around `position`.
///
/// `Ok(None)` means no opener resolves at the cursor. An opener whose closer
/// can't be found is reported as [`ToggleError::UnmatchedClosingTag`].
pub fn locate_tag<B: TextBuffer + ?Sized>(
    buffer: &B,
    position: Position,
) -> Result<Option<LocatedTag>> {
    let Some(line) = buffer.line(position.line) else {
        return Ok(None);
    };
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return Ok(None);
    }

    // Inclusive of the cursor column; a cursor past the end starts at the last char.
    let from = position.character.min(chars.len() - 1);
    let Some(open_start) =
        (0..=from).rev().find(|&i| chars[i] == '<' && (i == 0 || chars[i - 1] != '/'))
    else {
        return Ok(None);
    };
    let Some(open_end) = (open_start..chars.len()).find(|&i| chars[i] == '>') else {
        return Ok(None);
    };

    let raw: String = chars[open_start..=open_end].iter().collect();
    let Some(tag_name) = extract_tag_name(&raw) else {
        return Ok(None);
    };
    let open_tag = TagSpan::new(position.line, open_start, open_end + 1);

    if is_self_closing(&raw, tag_name) {
        tracing::debug!(tag = tag_name, %position, "self-closing tag");
        return Ok(Some(LocatedTag {
            tag_name: tag_name.into(),
            open_tag,
            close_tag: None,
        }));
    }

    match find_closing_tag(buffer, position.line, open_tag.end_char, tag_name) {
        Some(close_tag) => {
            tracing::debug!(
                tag = tag_name,
                open_line = open_tag.line,
                close_line = close_tag.line,
                "located tag pair"
            );
            Ok(Some(LocatedTag {
                tag_name: tag_name.into(),
                open_tag,
                close_tag: Some(close_tag),
            }))
        }
        None => {
            tracing::debug!(tag = tag_name, %position, "no closing tag before end of buffer");
            Err(ToggleError::UnmatchedClosingTag {
                tag_name: tag_name.into(),
            })
        }
    }
}

/// Find the commented-out tag pair around `position`.
///
/// The nearest `<!--` at or left of the cursor wins, even when the cursor
/// sits past its `-->`. A comment whose `-->` isn't on its own line, or
/// whose content isn't an opening tag, resolves to None, as does a missing
/// closing comment.
pub fn locate_comment<B: TextBuffer + ?Sized>(
    buffer: &B,
    position: Position,
) -> Option<LocatedComment> {
    let line = buffer.line(position.line)?;
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return None;
    }

    let anchor = position.character.min(chars.len() - 1);
    let open = rfind_marker(&chars, COMMENT_OPEN, anchor)?;
    let Some(close) = find_marker(&chars, COMMENT_CLOSE, open + COMMENT_OPEN.len()) else {
        tracing::debug!(line = position.line, col = open, "comment start without end on line");
        return None;
    };
    let end = close + COMMENT_CLOSE.len();

    let inner: String = chars[open + COMMENT_OPEN.len()..close].iter().collect();
    let inner = inner.trim();
    let tag_name = extract_tag_name(inner)?;
    let open_comment = CommentSpan {
        span: TagSpan::new(position.line, open, end),
        inner: inner.into(),
    };

    if is_self_closing(inner, tag_name) {
        tracing::debug!(tag = tag_name, %position, "self-closing commented tag");
        return Some(LocatedComment {
            tag_name: tag_name.into(),
            open_comment,
            close_comment: None,
        });
    }

    let Some(close_comment) = find_closing_comment(buffer, position.line, end, tag_name) else {
        tracing::debug!(tag = tag_name, %position, "no closing comment before end of buffer");
        return None;
    };
    tracing::debug!(
        tag = tag_name,
        open_line = open_comment.span.line,
        close_line = close_comment.span.line,
        "located commented pair"
    );
    Some(LocatedComment {
        tag_name: tag_name.into(),
        open_comment,
        close_comment: Some(close_comment),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::EditorRope;

    fn locate(text: &str, line: usize, character: usize) -> Result<Option<LocatedTag>> {
        locate_tag(&EditorRope::from_str(text), Position::new(line, character))
    }

    fn locate_commented(text: &str, line: usize, character: usize) -> Option<LocatedComment> {
        locate_comment(&EditorRope::from_str(text), Position::new(line, character))
    }

    #[test]
    fn test_nested_opener_matches_outer_closer() {
        let tag = locate("<div><div>x</div></div>", 0, 2).unwrap().unwrap();
        assert_eq!(tag.tag_name, "div");
        assert_eq!(tag.open_tag, TagSpan::new(0, 0, 5));
        assert_eq!(tag.close_tag, Some(TagSpan::new(0, 17, 23)));
    }

    #[test]
    fn test_cursor_on_angle_bracket_is_included() {
        let tag = locate("<p>hi</p>", 0, 0).unwrap().unwrap();
        assert_eq!(tag.open_tag, TagSpan::new(0, 0, 3));
        assert_eq!(tag.close_tag, Some(TagSpan::new(0, 5, 9)));
    }

    #[test]
    fn test_cursor_in_text_uses_nearest_opener_to_left() {
        let tag = locate("<p>hello</p>", 0, 5).unwrap().unwrap();
        assert_eq!(tag.tag_name, "p");
        assert_eq!(tag.open_tag, TagSpan::new(0, 0, 3));
    }

    #[test]
    fn test_cursor_before_any_tag() {
        assert_eq!(locate("text <p>x</p>", 0, 2).unwrap(), None);
    }

    #[test]
    fn test_cursor_on_closing_delimiter_is_not_found() {
        assert_eq!(locate("<b>x</b>", 0, 6).unwrap(), None);
    }

    #[test]
    fn test_opener_without_bracket_on_line() {
        assert_eq!(locate("<div\n class=\"a\">\n</div>", 0, 1).unwrap(), None);
    }

    #[test]
    fn test_cross_line_match() {
        let tag = locate("<section>\n  <p>text</p>\n</section>", 0, 3)
            .unwrap()
            .unwrap();
        assert_eq!(tag.close_tag, Some(TagSpan::new(2, 0, 10)));
    }

    #[test]
    fn test_void_element_is_self_closing() {
        let tag = locate("<img src=\"a.png\">", 0, 3).unwrap().unwrap();
        assert!(tag.is_self_closing());
        assert_eq!(tag.open_tag, TagSpan::new(0, 0, 17));
    }

    #[test]
    fn test_uppercase_void_element_keeps_casing() {
        let tag = locate("<IMG SRC=x>", 0, 1).unwrap().unwrap();
        assert!(tag.is_self_closing());
        assert_eq!(tag.tag_name, "IMG");
    }

    #[test]
    fn test_explicit_slash_self_closing() {
        let tag = locate("<br/>", 0, 0).unwrap().unwrap();
        assert!(tag.is_self_closing());
        let tag = locate("<Widget x=\"1\" />", 0, 4).unwrap().unwrap();
        assert!(tag.is_self_closing());
        assert_eq!(tag.tag_name, "Widget");
    }

    #[test]
    fn test_unmatched_closing_tag_is_error() {
        let err = locate("<div>\n<p>x</p>", 0, 1).unwrap_err();
        assert_eq!(
            err,
            ToggleError::UnmatchedClosingTag {
                tag_name: "div".into()
            }
        );
        assert_eq!(err.to_string(), "closing tag for <div> not found");
    }

    #[test]
    fn test_cursor_past_line_end_clamps() {
        let tag = locate("<br>", 0, 40).unwrap().unwrap();
        assert_eq!(tag.open_tag, TagSpan::new(0, 0, 4));
    }

    #[test]
    fn test_empty_or_missing_line() {
        assert_eq!(locate("", 0, 0).unwrap(), None);
        assert_eq!(locate("<br>", 5, 0).unwrap(), None);
    }

    #[test]
    fn test_locate_comment_pair() {
        let found = locate_commented("<!-- <div class=\"a\"> -->\n  x\n<!-- </div> -->", 0, 7)
            .unwrap();
        assert_eq!(found.tag_name, "div");
        assert_eq!(found.open_comment.span, TagSpan::new(0, 0, 24));
        assert_eq!(found.open_comment.inner, "<div class=\"a\">");
        let close = found.close_comment.unwrap();
        assert_eq!(close.span, TagSpan::new(2, 0, 15));
        assert_eq!(close.inner, "</div>");
    }

    #[test]
    fn test_locate_comment_self_closing() {
        let found = locate_commented("<!--<BR>-->", 0, 0).unwrap();
        assert!(found.is_self_closing());
        assert_eq!(found.open_comment.inner, "<BR>");
    }

    #[test]
    fn test_locate_comment_cursor_right_of_comment() {
        let found = locate_commented("<!-- <p> --> x\n<!-- </p> -->", 0, 13).unwrap();
        assert_eq!(found.tag_name, "p");
        assert_eq!(found.open_comment.span, TagSpan::new(0, 0, 12));
        assert_eq!(found.close_comment.unwrap().span, TagSpan::new(1, 0, 13));
    }

    #[test]
    fn test_locate_comment_in_commented_text_content() {
        let found = locate_commented("<!-- <p> -->hello<!-- </p> -->", 0, 14).unwrap();
        assert_eq!(found.open_comment.span, TagSpan::new(0, 0, 12));
        assert_eq!(found.close_comment.unwrap().span, TagSpan::new(0, 17, 30));
    }

    #[test]
    fn test_locate_comment_plain_comment_is_not_a_tag() {
        assert_eq!(locate_commented("<!-- just a note -->", 0, 6), None);
        assert_eq!(locate_commented("<!-- </p> -->", 0, 6), None);
    }

    #[test]
    fn test_locate_comment_without_end_marker() {
        assert_eq!(locate_commented("<!-- <p>\n-->", 0, 2), None);
    }

    #[test]
    fn test_locate_comment_without_closing_comment() {
        assert_eq!(locate_commented("<!-- <p> -->\n</p>", 0, 2), None);
    }
}
