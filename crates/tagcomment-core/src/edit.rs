//! Edit computation for comment/uncomment, and atomic application of
//! multi-range edit batches.

use std::ops::Range;

use smol_str::SmolStr;

use crate::error::{Result, ToggleError};
use crate::text::TextBuffer;
use crate::types::{LocatedComment, LocatedTag, Position, TextEdit};

/// Wrap a delimiter in a markup comment: `<p>` becomes `<!-- <p> -->`.
pub fn wrap_in_comment(delimiter: &str) -> String {
    format!("<!-- {delimiter} -->")
}

/// Edits that comment out both delimiters of a live tag.
///
/// Delimiter text is read from `buffer` as-is, so casing and internal
/// spacing survive the round trip.
pub fn comment_edits<B: TextBuffer + ?Sized>(
    buffer: &B,
    tag: &LocatedTag,
) -> Result<Vec<TextEdit>> {
    tag.spans()
        .map(|span| {
            let line = buffer
                .line(span.line)
                .ok_or(ToggleError::StaleSpan { line: span.line })?;
            let text: String = line
                .chars()
                .skip(span.start_char)
                .take(span.len())
                .collect();
            if text.chars().count() != span.len() {
                return Err(ToggleError::StaleSpan { line: span.line });
            }
            Ok(TextEdit::replace_span(span, wrap_in_comment(&text)))
        })
        .collect()
}

/// Edits that restore both commented delimiters to their stored content.
pub fn uncomment_edits(comment: &LocatedComment) -> Vec<TextEdit> {
    comment
        .spans()
        .map(|c| TextEdit::replace_span(&c.span, c.inner.as_str()))
        .collect()
}

/// The editor capability: applies a batch of edits as one unit.
///
/// Edit positions refer to the document as it was before the batch. An
/// implementation either applies every edit or none of them.
pub trait Editor {
    fn apply_edits(&mut self, edits: &[TextEdit]) -> Result<AppliedEdits>;
}

/// One replacement as it landed in the buffer, in pre-edit char offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEdit {
    pub char_range: Range<usize>,
    pub deleted: SmolStr,
    pub inserted: SmolStr,
}

/// Record of an applied batch, ordered by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedEdits {
    pub edits: Vec<AppliedEdit>,
}

impl AppliedEdits {
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// The char-offset replacements that undo this batch, in the
    /// coordinates of the post-edit document.
    pub fn inverse(&self) -> Vec<AppliedEdit> {
        let mut shift: isize = 0;
        self.edits
            .iter()
            .map(|edit| {
                let start = (edit.char_range.start as isize + shift) as usize;
                let inserted_len = edit.inserted.chars().count();
                shift += inserted_len as isize - edit.char_range.len() as isize;
                AppliedEdit {
                    char_range: start..start + inserted_len,
                    deleted: edit.inserted.clone(),
                    inserted: edit.deleted.clone(),
                }
            })
            .collect()
    }
}

/// Convert a position to a char offset, checking it lies within its line.
fn position_to_char<B: TextBuffer + ?Sized>(buffer: &B, position: Position) -> Option<usize> {
    let line_start = buffer.line_to_char(position.line)?;
    let line_len = buffer.line_len_chars(position.line)?;
    (position.character <= line_len).then_some(line_start + position.character)
}

/// Validate a batch against `buffer` without touching it.
///
/// Returns the replacements sorted by start offset.
pub fn resolve_edits<B: TextBuffer + ?Sized>(
    buffer: &B,
    edits: &[TextEdit],
) -> Result<Vec<AppliedEdit>> {
    let mut resolved = Vec::with_capacity(edits.len());
    for edit in edits {
        let out_of_bounds = || ToggleError::EditOutOfBounds {
            start: edit.start,
            end: edit.end,
        };
        let start = position_to_char(buffer, edit.start).ok_or_else(out_of_bounds)?;
        let end = position_to_char(buffer, edit.end).ok_or_else(out_of_bounds)?;
        if start > end {
            return Err(out_of_bounds());
        }
        let deleted = buffer.slice(start..end).ok_or_else(out_of_bounds)?;
        resolved.push((
            edit.start,
            AppliedEdit {
                char_range: start..end,
                deleted,
                inserted: edit.new_text.as_str().into(),
            },
        ));
    }

    resolved.sort_by_key(|(_, e)| (e.char_range.start, e.char_range.end));
    for pair in resolved.windows(2) {
        let (first_pos, first) = &pair[0];
        let (second_pos, second) = &pair[1];
        if second.char_range.start < first.char_range.end
            || (second.char_range.start == first.char_range.start && !first.char_range.is_empty())
        {
            return Err(ToggleError::OverlappingEdits {
                first: *first_pos,
                second: *second_pos,
            });
        }
    }

    Ok(resolved.into_iter().map(|(_, e)| e).collect())
}

/// Apply already-resolved replacements back-to-front so earlier offsets stay valid.
pub(crate) fn apply_resolved<B: TextBuffer + ?Sized>(buffer: &mut B, edits: &[AppliedEdit]) {
    for edit in edits.iter().rev() {
        buffer.replace(edit.char_range.clone(), &edit.inserted);
    }
}

/// Validate then apply a batch to any text buffer.
pub fn apply_to_buffer<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    edits: &[TextEdit],
) -> Result<AppliedEdits> {
    let resolved = resolve_edits(buffer, edits)?;
    apply_resolved(buffer, &resolved);
    tracing::trace!(count = resolved.len(), "applied edit batch");
    Ok(AppliedEdits { edits: resolved })
}

impl Editor for crate::text::EditorRope {
    fn apply_edits(&mut self, edits: &[TextEdit]) -> Result<AppliedEdits> {
        apply_to_buffer(self, edits)
    }
}
