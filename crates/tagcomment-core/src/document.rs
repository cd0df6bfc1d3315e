//! Core editor document trait and implementations.
//!
//! An `EditorDocument` pairs a buffer with the cursor the host reports. A
//! document without a cursor has no active context to act on.

use crate::edit::Editor;
use crate::text::TextBuffer;
use crate::types::Position;
use crate::undo::UndoManager;

/// Core trait for editor documents.
///
/// The buffer type must implement `TextBuffer` (reads), `Editor` (atomic
/// batches) and `UndoManager` (undo/redo).
pub trait EditorDocument {
    /// The buffer type used for text storage and undo.
    type Buffer: TextBuffer + Editor + UndoManager;

    /// Get a reference to the underlying buffer.
    fn buffer(&self) -> &Self::Buffer;

    /// Get a mutable reference to the underlying buffer.
    fn buffer_mut(&mut self) -> &mut Self::Buffer;

    /// Get the cursor, if the host has one.
    fn cursor(&self) -> Option<Position>;

    /// Set the cursor.
    fn set_cursor(&mut self, cursor: Option<Position>);

    /// Get the full content as a String.
    fn content_string(&self) -> String {
        self.buffer().to_string()
    }

    /// Number of lines in the buffer.
    fn len_lines(&self) -> usize {
        self.buffer().len_lines()
    }

    /// Clamp a position to an existing line and column.
    fn clamp_position(&self, position: Position) -> Position {
        let last_line = self.len_lines().saturating_sub(1);
        let line = position.line.min(last_line);
        let line_len = self.buffer().line_len_chars(line).unwrap_or(0);
        Position::new(line, position.character.min(line_len))
    }
}

/// Simple field-based implementation of EditorDocument.
#[derive(Clone)]
pub struct PlainEditor<T> {
    buffer: T,
    cursor: Option<Position>,
}

impl<T: TextBuffer + Editor + UndoManager + Default> Default for PlainEditor<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: TextBuffer + Editor + UndoManager> PlainEditor<T> {
    /// Create a new editor with the given buffer and no cursor.
    pub fn new(buffer: T) -> Self {
        Self {
            buffer,
            cursor: None,
        }
    }

    /// Create a new editor with the cursor already placed.
    pub fn with_cursor(buffer: T, cursor: Position) -> Self {
        Self {
            buffer,
            cursor: Some(cursor),
        }
    }

    /// Get direct access to the inner buffer.
    pub fn inner(&self) -> &T {
        &self.buffer
    }

    /// Consume the editor and return its buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }
}

impl<T: TextBuffer + Editor + UndoManager> EditorDocument for PlainEditor<T> {
    type Buffer = T;

    fn buffer(&self) -> &Self::Buffer {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut Self::Buffer {
        &mut self.buffer
    }

    fn cursor(&self) -> Option<Position> {
        self.cursor
    }

    fn set_cursor(&mut self, cursor: Option<Position>) {
        self.cursor = cursor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditorRope, UndoableBuffer};

    type TestEditor = PlainEditor<UndoableBuffer<EditorRope>>;

    fn make_editor(content: &str) -> TestEditor {
        PlainEditor::new(UndoableBuffer::new(EditorRope::from_str(content), 100))
    }

    #[test]
    fn test_new_editor_has_no_cursor() {
        let editor = make_editor("<p>");
        assert_eq!(editor.cursor(), None);
        assert_eq!(editor.content_string(), "<p>");
    }

    #[test]
    fn test_clamp_position() {
        let editor = make_editor("<div>\n<p>");
        assert_eq!(
            editor.clamp_position(Position::new(0, 99)),
            Position::new(0, 5)
        );
        assert_eq!(
            editor.clamp_position(Position::new(7, 1)),
            Position::new(1, 1)
        );
    }
}
