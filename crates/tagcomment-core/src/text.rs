//! Text buffer abstraction for editor storage.
//!
//! The `TextBuffer` trait is the line-addressable view the tag locators read
//! from, plus the char-offset mutation surface the edit layer writes through.

use smol_str::{SmolStr, ToSmolStr};
use std::ops::Range;

/// A text buffer that supports line lookup, editing and offset conversion.
///
/// All offsets and columns are in Unicode scalar values (chars), not bytes or UTF-16.
pub trait TextBuffer {
    /// Total length in chars (Unicode scalar values).
    fn len_chars(&self) -> usize;

    /// Number of lines. A trailing line terminator starts one more (empty) line.
    fn len_lines(&self) -> usize;

    /// Check if empty.
    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Text of a line without its terminator. Returns None past the last line.
    fn line(&self, line_idx: usize) -> Option<SmolStr>;

    /// Char offset of the first char of a line. Returns None past the last line.
    fn line_to_char(&self, line_idx: usize) -> Option<usize>;

    /// Length of a line in chars, excluding its terminator.
    fn line_len_chars(&self, line_idx: usize) -> Option<usize> {
        self.line(line_idx).map(|line| line.chars().count())
    }

    /// Insert text at char offset.
    fn insert(&mut self, char_offset: usize, text: &str);

    /// Delete char range.
    fn delete(&mut self, char_range: Range<usize>);

    /// Replace char range with text.
    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        self.delete(char_range.clone());
        self.insert(char_range.start, text);
    }

    /// Get a slice as SmolStr. Returns None if range is invalid.
    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr>;

    /// Get character at offset. Returns None if out of bounds.
    fn char_at(&self, char_offset: usize) -> Option<char>;

    /// Convert entire buffer to String.
    fn to_string(&self) -> String;
}

/// Ropey-backed text buffer.
///
/// Provides O(log n) editing operations and line lookups.
#[derive(Clone, Default)]
pub struct EditorRope {
    rope: ropey::Rope,
}

impl EditorRope {
    /// Create a new empty rope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from string.
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: ropey::Rope::from_str(s),
        }
    }

    /// Get a reference to the underlying rope (for advanced operations).
    pub fn rope(&self) -> &ropey::Rope {
        &self.rope
    }
}

/// Strip a single trailing `\n` or `\r\n`.
fn strip_terminator(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

impl TextBuffer for EditorRope {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    fn line(&self, line_idx: usize) -> Option<SmolStr> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_smolstr();
        Some(strip_terminator(&line).to_smolstr())
    }

    fn line_to_char(&self, line_idx: usize) -> Option<usize> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        Some(self.rope.line_to_char(line_idx))
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        self.rope.insert(char_offset, text);
    }

    fn delete(&mut self, char_range: Range<usize>) {
        self.rope.remove(char_range);
    }

    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        if char_range.start > char_range.end || char_range.end > self.len_chars() {
            return None;
        }
        Some(self.rope.slice(char_range).to_smolstr())
    }

    fn char_at(&self, char_offset: usize) -> Option<char> {
        if char_offset >= self.len_chars() {
            return None;
        }
        Some(self.rope.char(char_offset))
    }

    fn to_string(&self) -> String {
        self.rope.to_string()
    }
}

impl From<&str> for EditorRope {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for EditorRope {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut rope = EditorRope::from_str("hello world");
        assert_eq!(rope.len_chars(), 11);
        assert_eq!(rope.to_string(), "hello world");

        rope.insert(5, " beautiful");
        assert_eq!(rope.to_string(), "hello beautiful world");

        rope.delete(5..15);
        assert_eq!(rope.to_string(), "hello world");
    }

    #[test]
    fn test_lines_strip_terminators() {
        let rope = EditorRope::from_str("<div>\r\n  <p>\n</div>");
        assert_eq!(rope.len_lines(), 3);
        assert_eq!(rope.line(0).as_deref(), Some("<div>"));
        assert_eq!(rope.line(1).as_deref(), Some("  <p>"));
        assert_eq!(rope.line(2).as_deref(), Some("</div>"));
        assert_eq!(rope.line(3), None);
    }

    #[test]
    fn test_trailing_newline_adds_empty_line() {
        let rope = EditorRope::from_str("<br>\n");
        assert_eq!(rope.len_lines(), 2);
        assert_eq!(rope.line(1).as_deref(), Some(""));
    }

    #[test]
    fn test_line_to_char() {
        let rope = EditorRope::from_str("ab\ncd\r\nef");
        assert_eq!(rope.line_to_char(0), Some(0));
        assert_eq!(rope.line_to_char(1), Some(3));
        assert_eq!(rope.line_to_char(2), Some(7));
        assert_eq!(rope.line_to_char(3), None);
        assert_eq!(rope.line_len_chars(1), Some(2));
    }

    #[test]
    fn test_char_at() {
        let rope = EditorRope::from_str("hello");
        assert_eq!(rope.char_at(0), Some('h'));
        assert_eq!(rope.char_at(4), Some('o'));
        assert_eq!(rope.char_at(5), None);
    }

    #[test]
    fn test_slice() {
        let rope = EditorRope::from_str("hello world");
        assert_eq!(rope.slice(0..5).as_deref(), Some("hello"));
        assert_eq!(rope.slice(6..11).as_deref(), Some("world"));
        assert_eq!(rope.slice(0..100), None);
    }

    #[test]
    fn test_multibyte_columns_are_chars() {
        let rope = EditorRope::from_str("<p>héllo</p>");
        assert_eq!(rope.line_len_chars(0), Some(12));
        assert_eq!(rope.slice(8..12).as_deref(), Some("</p>"));
    }

    #[test]
    fn test_replace() {
        let mut rope = EditorRope::from_str("hello world");
        rope.replace(6..11, "rust");
        assert_eq!(rope.to_string(), "hello rust");
    }
}
