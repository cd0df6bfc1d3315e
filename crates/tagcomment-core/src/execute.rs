//! Action execution for editor documents.
//!
//! `execute_action` applies an `EditorAction` to any `EditorDocument`. Each
//! call reads the buffer, resolves the tag, and hands one batch of edits to
//! the editor. Failures return before any edit is submitted.

use crate::actions::{ActionOutcome, EditorAction};
use crate::document::EditorDocument;
use crate::edit::{AppliedEdits, Editor, comment_edits, uncomment_edits};
use crate::error::{Result, ToggleError};
use crate::locate::{locate_comment, locate_tag};
use crate::types::{LocatedComment, LocatedTag, Position, TextEdit};
use crate::undo::UndoManager;

/// Execute an editor action on a document.
///
/// This is the central dispatch point for all editor operations.
pub fn execute_action<D: EditorDocument>(
    doc: &mut D,
    action: &EditorAction,
) -> Result<ActionOutcome> {
    let outcome = match action {
        EditorAction::ToggleTagComment => execute_toggle(doc),
        EditorAction::CommentTag => execute_comment(doc),
        EditorAction::UncommentTag => execute_uncomment(doc),
        EditorAction::MoveCursor { position } => Ok(execute_move_cursor(doc, *position)),
        EditorAction::Undo => Ok(execute_history(doc, |buf| buf.undo())),
        EditorAction::Redo => Ok(execute_history(doc, |buf| buf.redo())),
    };
    if let Err(err) = &outcome {
        tracing::debug!(?action, %err, "action failed");
    }
    outcome
}

fn active_cursor<D: EditorDocument>(doc: &D) -> Result<Position> {
    doc.cursor().ok_or(ToggleError::NoActiveContext)
}

/// Uncomment if the cursor is on a commented tag, otherwise comment out.
fn execute_toggle<D: EditorDocument>(doc: &mut D) -> Result<ActionOutcome> {
    let cursor = active_cursor(doc)?;
    if let Some(comment) = locate_comment(doc.buffer(), cursor) {
        return apply_uncomment(doc, cursor, comment);
    }
    match locate_tag(doc.buffer(), cursor)? {
        Some(tag) => apply_comment(doc, cursor, tag),
        None => Err(ToggleError::NoTagAtCursor),
    }
}

fn execute_comment<D: EditorDocument>(doc: &mut D) -> Result<ActionOutcome> {
    let cursor = active_cursor(doc)?;
    let tag = locate_tag(doc.buffer(), cursor)?.ok_or(ToggleError::NoTagAtCursor)?;
    apply_comment(doc, cursor, tag)
}

fn execute_uncomment<D: EditorDocument>(doc: &mut D) -> Result<ActionOutcome> {
    let cursor = active_cursor(doc)?;
    let comment = locate_comment(doc.buffer(), cursor).ok_or(ToggleError::NoTagAtCursor)?;
    apply_uncomment(doc, cursor, comment)
}

fn apply_comment<D: EditorDocument>(
    doc: &mut D,
    cursor: Position,
    tag: LocatedTag,
) -> Result<ActionOutcome> {
    let edits = comment_edits(doc.buffer(), &tag)?;
    let applied = submit(doc, cursor, &edits)?;
    tracing::debug!(tag = %tag.tag_name, self_closing = tag.is_self_closing(), "commented out tag");
    Ok(ActionOutcome::Commented {
        tag_name: tag.tag_name,
        edits,
        applied,
    })
}

fn apply_uncomment<D: EditorDocument>(
    doc: &mut D,
    cursor: Position,
    comment: LocatedComment,
) -> Result<ActionOutcome> {
    let edits = uncomment_edits(&comment);
    let applied = submit(doc, cursor, &edits)?;
    tracing::debug!(
        tag = %comment.tag_name,
        self_closing = comment.is_self_closing(),
        "uncommented tag"
    );
    Ok(ActionOutcome::Uncommented {
        tag_name: comment.tag_name,
        edits,
        applied,
    })
}

fn submit<D: EditorDocument>(
    doc: &mut D,
    cursor: Position,
    edits: &[TextEdit],
) -> Result<AppliedEdits> {
    let applied = doc.buffer_mut().apply_edits(edits)?;
    doc.set_cursor(Some(cursor.map_through(edits)));
    Ok(applied)
}

fn execute_move_cursor<D: EditorDocument>(doc: &mut D, position: Position) -> ActionOutcome {
    let position = doc.clamp_position(position);
    doc.set_cursor(Some(position));
    ActionOutcome::CursorMoved(position)
}

fn execute_history<D: EditorDocument>(
    doc: &mut D,
    step: impl FnOnce(&mut D::Buffer) -> bool,
) -> ActionOutcome {
    let changed = step(doc.buffer_mut());
    if changed {
        if let Some(cursor) = doc.cursor() {
            let clamped = doc.clamp_position(cursor);
            doc.set_cursor(Some(clamped));
        }
    }
    ActionOutcome::History(changed)
}
