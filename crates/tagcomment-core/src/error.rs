//! Error types for tag toggling.
//!
//! Every variant is terminal for one invocation: the buffer is left
//! untouched and the error is handed back for the caller to report.

use miette::Diagnostic;
use smol_str::SmolStr;

use crate::types::Position;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ToggleError {
    /// No buffer or cursor to work with.
    #[error("no active editor")]
    #[diagnostic(code(tagcomment::no_active_context))]
    NoActiveContext,

    /// Neither a live nor a commented tag resolves at the cursor.
    #[error("no HTML tag found at cursor position")]
    #[diagnostic(
        code(tagcomment::no_tag_at_cursor),
        help("place the cursor on an opening tag such as `<div>` or on `<!-- <div> -->`")
    )]
    NoTagAtCursor,

    /// An opener was found but nothing balances it before end of buffer.
    #[error("closing tag for <{tag_name}> not found")]
    #[diagnostic(code(tagcomment::unmatched_closing_tag))]
    UnmatchedClosingTag { tag_name: SmolStr },

    /// An edit points outside the current buffer.
    #[error("edit {start}..{end} is outside the buffer")]
    #[diagnostic(code(tagcomment::edit_out_of_bounds))]
    EditOutOfBounds { start: Position, end: Position },

    /// Two edits in one batch touch the same text.
    #[error("edits at {first} and {second} overlap")]
    #[diagnostic(code(tagcomment::overlapping_edits))]
    OverlappingEdits { first: Position, second: Position },

    /// A located span no longer matches the buffer it was read from.
    #[error("tag span on line {line} no longer matches the buffer")]
    #[diagnostic(
        code(tagcomment::stale_span),
        help("located tags must be re-resolved after every edit")
    )]
    StaleSpan { line: usize },
}

pub type Result<T, E = ToggleError> = std::result::Result<T, E>;
