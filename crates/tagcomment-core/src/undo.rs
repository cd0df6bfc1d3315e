//! Undo/redo management for editor operations.
//!
//! Provides:
//! - `UndoManager` trait for abstracting undo implementations
//! - `UndoableBuffer<T>` - wraps a TextBuffer and provides undo/redo
//!
//! A batch applied through [`Editor::apply_edits`] is one undo step, so
//! undoing a toggle restores both delimiters together.

use std::ops::Range;

use smol_str::{SmolStr, ToSmolStr};

use crate::edit::{AppliedEdit, AppliedEdits, Editor, apply_resolved, resolve_edits};
use crate::error::Result;
use crate::text::TextBuffer;
use crate::types::TextEdit;

/// Trait for managing undo/redo operations.
///
/// Implementations must actually perform the undo/redo, not just track state.
pub trait UndoManager {
    /// Check if undo is available.
    fn can_undo(&self) -> bool;

    /// Check if redo is available.
    fn can_redo(&self) -> bool;

    /// Perform undo. Returns true if successful.
    fn undo(&mut self) -> bool;

    /// Perform redo. Returns true if successful.
    fn redo(&mut self) -> bool;

    /// Clear all undo/redo history.
    fn clear_history(&mut self);
}

/// One undo step: replacements in ascending order, in the char offsets of
/// the document they were applied to.
#[derive(Debug, Clone)]
struct UndoGroup {
    edits: Vec<AppliedEdit>,
}

impl UndoGroup {
    fn single(pos: usize, deleted: &str, inserted: &str) -> Self {
        Self {
            edits: vec![AppliedEdit {
                char_range: pos..pos + deleted.chars().count(),
                deleted: deleted.to_smolstr(),
                inserted: inserted.to_smolstr(),
            }],
        }
    }

    fn inverse(&self) -> Self {
        Self {
            edits: AppliedEdits {
                edits: self.edits.clone(),
            }
            .inverse(),
        }
    }
}

/// A TextBuffer wrapper that tracks edits and provides undo/redo.
///
/// All mutations go through this wrapper, which records them for undo.
pub struct UndoableBuffer<T> {
    buffer: T,
    undo_stack: Vec<UndoGroup>,
    redo_stack: Vec<UndoGroup>,
    max_steps: usize,
}

impl<T: Clone> Clone for UndoableBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            undo_stack: self.undo_stack.clone(),
            redo_stack: self.redo_stack.clone(),
            max_steps: self.max_steps,
        }
    }
}

impl<T: TextBuffer + Default> Default for UndoableBuffer<T> {
    fn default() -> Self {
        Self::new(T::default(), 100)
    }
}

impl<T: TextBuffer> UndoableBuffer<T> {
    /// Create a new undoable buffer wrapping the given buffer.
    pub fn new(buffer: T, max_steps: usize) -> Self {
        Self {
            buffer,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_steps,
        }
    }

    /// Get a reference to the inner buffer.
    pub fn inner(&self) -> &T {
        &self.buffer
    }

    /// Consume the wrapper, dropping history.
    pub fn into_inner(self) -> T {
        self.buffer
    }

    fn record(&mut self, group: UndoGroup) {
        self.redo_stack.clear();
        self.undo_stack.push(group);
        while self.undo_stack.len() > self.max_steps {
            self.undo_stack.remove(0);
        }
    }
}

impl<T: TextBuffer> TextBuffer for UndoableBuffer<T> {
    fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    fn len_lines(&self) -> usize {
        self.buffer.len_lines()
    }

    fn line(&self, line_idx: usize) -> Option<SmolStr> {
        self.buffer.line(line_idx)
    }

    fn line_to_char(&self, line_idx: usize) -> Option<usize> {
        self.buffer.line_to_char(line_idx)
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        self.record(UndoGroup::single(char_offset, "", text));
        self.buffer.insert(char_offset, text);
    }

    fn delete(&mut self, char_range: Range<usize>) {
        let deleted = self
            .buffer
            .slice(char_range.clone())
            .map(|s| s.to_string())
            .unwrap_or_default();
        self.record(UndoGroup::single(char_range.start, &deleted, ""));
        self.buffer.delete(char_range);
    }

    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        let deleted = self
            .buffer
            .slice(char_range.clone())
            .map(|s| s.to_string())
            .unwrap_or_default();
        self.record(UndoGroup::single(char_range.start, &deleted, text));
        self.buffer.replace(char_range, text);
    }

    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        self.buffer.slice(char_range)
    }

    fn char_at(&self, char_offset: usize) -> Option<char> {
        self.buffer.char_at(char_offset)
    }

    fn to_string(&self) -> String {
        self.buffer.to_string()
    }
}

impl<T: TextBuffer> Editor for UndoableBuffer<T> {
    fn apply_edits(&mut self, edits: &[TextEdit]) -> Result<AppliedEdits> {
        let resolved = resolve_edits(&self.buffer, edits)?;
        apply_resolved(&mut self.buffer, &resolved);
        if !resolved.is_empty() {
            self.record(UndoGroup {
                edits: resolved.clone(),
            });
        }
        Ok(AppliedEdits { edits: resolved })
    }
}

impl<T: TextBuffer> UndoManager for UndoableBuffer<T> {
    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn undo(&mut self) -> bool {
        let Some(group) = self.undo_stack.pop() else {
            return false;
        };
        apply_resolved(&mut self.buffer, &group.inverse().edits);
        self.redo_stack.push(group);
        true
    }

    fn redo(&mut self) -> bool {
        let Some(group) = self.redo_stack.pop() else {
            return false;
        };
        apply_resolved(&mut self.buffer, &group.edits);
        self.undo_stack.push(group);
        true
    }

    fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
