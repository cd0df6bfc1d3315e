//! Core data model: positions, tag spans, located tags and text edits.
//!
//! Located records are built fresh from a live read of the buffer and go
//! stale as soon as the buffer changes. Never keep one across an edit.

use std::fmt;

use smol_str::SmolStr;

/// A cursor position: 0-based line and char column within that line.
#[derive(Clone, Debug, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Position {
    pub line: usize,
    /// Char offset within the line (NOT byte offset!)
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }

    /// Where this position ends up after `edits` were applied to the buffer.
    ///
    /// A position inside a replaced range moves to the start of that range.
    /// A position after a replaced range on the same line shifts by the
    /// range's length change. Edits spanning lines leave the column alone.
    pub fn map_through(self, edits: &[TextEdit]) -> Position {
        let mut ordered: Vec<&TextEdit> = edits
            .iter()
            .filter(|edit| edit.is_single_line() && edit.start.line == self.line)
            .collect();
        ordered.sort_by_key(|edit| edit.start);

        let mut delta: isize = 0;
        for edit in ordered {
            if self.character >= edit.end.character {
                delta += edit.char_delta();
            } else if self.character >= edit.start.character {
                return Position::new(
                    self.line,
                    (edit.start.character as isize + delta).max(0) as usize,
                );
            }
        }
        Position::new(
            self.line,
            (self.character as isize + delta).max(0) as usize,
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// A half-open char range on a single line.
///
/// Used for both a bare delimiter (`<div>`) and a comment-wrapped one
/// (`<!-- <div> -->`).
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash)]
pub struct TagSpan {
    pub line: usize,
    /// Inclusive start column.
    pub start_char: usize,
    /// Exclusive end column.
    pub end_char: usize,
}

impl TagSpan {
    pub fn new(line: usize, start_char: usize, end_char: usize) -> Self {
        Self {
            line,
            start_char,
            end_char,
        }
    }

    pub fn start(&self) -> Position {
        Position::new(self.line, self.start_char)
    }

    pub fn end(&self) -> Position {
        Position::new(self.line, self.end_char)
    }

    pub fn len(&self) -> usize {
        self.end_char.saturating_sub(self.start_char)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if a column on this span's line falls inside it.
    pub fn contains(&self, position: Position) -> bool {
        position.line == self.line
            && position.character >= self.start_char
            && position.character < self.end_char
    }
}

/// A comment-wrapped delimiter together with its decoded inner content.
///
/// `inner` is the text between `<!--` and `-->` with surrounding whitespace
/// trimmed; it is what gets written back on uncomment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentSpan {
    pub span: TagSpan,
    pub inner: SmolStr,
}

/// A live tag resolved at the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocatedTag {
    /// Tag name with its source casing.
    pub tag_name: SmolStr,
    pub open_tag: TagSpan,
    /// Absent exactly when the tag is self-closing.
    pub close_tag: Option<TagSpan>,
}

impl LocatedTag {
    pub fn is_self_closing(&self) -> bool {
        self.close_tag.is_none()
    }

    /// Spans in document order.
    pub fn spans(&self) -> impl Iterator<Item = &TagSpan> {
        std::iter::once(&self.open_tag).chain(self.close_tag.as_ref())
    }
}

/// A commented-out tag resolved at the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocatedComment {
    pub tag_name: SmolStr,
    pub open_comment: CommentSpan,
    /// Absent exactly when the commented tag is self-closing.
    pub close_comment: Option<CommentSpan>,
}

impl LocatedComment {
    pub fn is_self_closing(&self) -> bool {
        self.close_comment.is_none()
    }

    pub fn spans(&self) -> impl Iterator<Item = &CommentSpan> {
        std::iter::once(&self.open_comment).chain(self.close_comment.as_ref())
    }
}

/// A single replacement over the pre-edit document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub start: Position,
    pub end: Position,
    pub new_text: String,
}

impl TextEdit {
    pub fn new(start: Position, end: Position, new_text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            new_text: new_text.into(),
        }
    }

    /// Replace a tag span.
    pub fn replace_span(span: &TagSpan, new_text: impl Into<String>) -> Self {
        Self::new(span.start(), span.end(), new_text)
    }

    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line && !self.new_text.contains('\n')
    }

    /// Change in line length (in chars) caused by a single-line edit.
    pub fn char_delta(&self) -> isize {
        let removed = self.end.character.saturating_sub(self.start.character);
        self.new_text.chars().count() as isize - removed as isize
    }
}

impl fmt::Display for TextEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{} => {:?}", self.start, self.end, self.new_text)
    }
}
