//! Editor actions.
//!
//! Semantic operations on a document, decoupled from how the host triggers
//! them (command palette, key binding, CLI subcommand).

use smol_str::SmolStr;

use crate::edit::AppliedEdits;
use crate::types::{Position, TextEdit};

/// All possible editor actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Uncomment the commented tag at the cursor, or else comment out the live one.
    ToggleTagComment,
    /// Comment out the live tag at the cursor.
    CommentTag,
    /// Uncomment the commented tag at the cursor.
    UncommentTag,
    /// Place the cursor (clamped to the buffer).
    MoveCursor { position: Position },
    Undo,
    Redo,
}

/// What a successfully executed action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A live tag was wrapped in comments.
    Commented {
        tag_name: SmolStr,
        edits: Vec<TextEdit>,
        applied: AppliedEdits,
    },
    /// A commented tag was restored.
    Uncommented {
        tag_name: SmolStr,
        edits: Vec<TextEdit>,
        applied: AppliedEdits,
    },
    CursorMoved(Position),
    /// Undo/redo; false when there was nothing to do.
    History(bool),
}

impl ActionOutcome {
    /// Whether the buffer text changed.
    pub fn modified(&self) -> bool {
        match self {
            Self::Commented { applied, .. } | Self::Uncommented { applied, .. } => {
                !applied.is_empty()
            }
            Self::CursorMoved(_) => false,
            Self::History(changed) => *changed,
        }
    }

    /// The edits submitted to the editor, if any.
    pub fn edits(&self) -> &[TextEdit] {
        match self {
            Self::Commented { edits, .. } | Self::Uncommented { edits, .. } => edits,
            Self::CursorMoved(_) | Self::History(_) => &[],
        }
    }
}
