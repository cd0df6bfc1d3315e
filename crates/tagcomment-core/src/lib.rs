//! tagcomment-core: comment out and restore HTML/XML tag pairs at a cursor.
//!
//! This crate provides:
//! - `TextBuffer` trait for line-addressable text storage, `EditorRope` impl
//! - tag location at a cursor, for live tags and commented-out tags
//! - forward matching of the balancing closer, with same-name nesting
//! - `Editor` trait for atomic multi-range edits, with grouped undo
//! - `execute_action` dispatch over any `EditorDocument`
//!
//! No I/O and no global state; hosts inject the buffer and cursor.

pub mod actions;
pub mod classify;
pub mod document;
pub mod edit;
pub mod error;
pub mod execute;
pub mod locate;
pub mod matcher;
pub mod text;
pub mod types;
pub mod undo;

pub use actions::{ActionOutcome, EditorAction};
pub use classify::{VOID_ELEMENTS, extract_tag_name, is_self_closing, is_void_element};
pub use document::{EditorDocument, PlainEditor};
pub use edit::{AppliedEdit, AppliedEdits, Editor, comment_edits, uncomment_edits};
pub use error::{Result, ToggleError};
pub use execute::execute_action;
pub use locate::{locate_comment, locate_tag};
pub use matcher::{find_closing_comment, find_closing_tag};
pub use smol_str::SmolStr;
pub use text::{EditorRope, TextBuffer};
pub use types::{CommentSpan, LocatedComment, LocatedTag, Position, TagSpan, TextEdit};
pub use undo::{UndoManager, UndoableBuffer};
