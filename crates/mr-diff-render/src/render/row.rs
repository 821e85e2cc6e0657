//! Rendered rows, before they are laid out as text.

use crate::model::{Comment, DiffLine, DiffSide, FileDiff, Hunk};

/// One unit of rendered output.
///
/// Rows borrow from the parsed diff and the comment index; turning them into
/// text is left to [`RowFormatter`](super::RowFormatter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderedRow<'a> {
    /// The `@@ ... @@` line opening a hunk.
    HunkHeader(&'a Hunk),
    /// A diff line, including metadata lines without numbers.
    Line(&'a DiffLine),
    /// A comment thread anchored to the preceding line on `side`.
    Thread {
        side: DiffSide,
        comments: &'a [Comment],
    },
}

impl RenderedRow<'_> {
    pub fn is_thread(&self) -> bool {
        matches!(self, RenderedRow::Thread { .. })
    }
}

/// A `commit:`/`File:` section and the rows printed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub file: &'a FileDiff,
    pub rows: Vec<RenderedRow<'a>>,
}
