//! Per-thread excerpts: each thread shown under its own section with only
//! the rows that lead up to the line it is anchored to.

use super::{render_file, RenderedRow, Section, ThreadOrder};
use crate::index::CommentIndex;
use crate::model::FileDiff;

/// One section per matched thread, in traversal order.
///
/// A section holds at most `context` rows of the hunk before the anchored
/// line, the anchored line itself and the thread. The hunk header is
/// included when the window reaches the start of the hunk.
pub fn excerpt_sections<'a>(
    files: &'a [FileDiff],
    index: &'a CommentIndex,
    order: ThreadOrder,
    context: usize,
) -> Vec<Section<'a>> {
    let mut sections = Vec::new();

    for file in files {
        // Rows of the current hunk so far, threads excluded.
        let mut hunk_rows: Vec<RenderedRow<'a>> = Vec::new();

        for row in render_file(file, index, order) {
            match row {
                RenderedRow::HunkHeader(_) => {
                    hunk_rows.clear();
                    hunk_rows.push(row);
                }
                RenderedRow::Line(_) => hunk_rows.push(row),
                RenderedRow::Thread { .. } => {
                    let anchored = hunk_rows.len() - 1;
                    let start = anchored.saturating_sub(context);
                    let mut rows = hunk_rows[start..].to_vec();
                    rows.push(row);
                    sections.push(Section { file, rows });
                }
            }
        }
    }

    log::debug!("built {} excerpt(s)", sections.len());
    sections
}
