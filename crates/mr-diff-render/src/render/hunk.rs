//! Walks a file's hunks and interleaves the threads anchored to each line.

use super::{RenderedRow, Section, ThreadOrder};
use crate::index::CommentIndex;
use crate::model::{DiffLine, FileDiff};

/// Render every hunk of `file`, each line followed by its threads.
///
/// A line is checked on the old side when it has an old number and on the
/// new side when it has a new number, so context lines are checked on both
/// in `order`. Metadata lines never match.
pub fn render_file<'a>(
    file: &'a FileDiff,
    index: &'a CommentIndex,
    order: ThreadOrder,
) -> Vec<RenderedRow<'a>> {
    let mut rows = Vec::new();

    for hunk in &file.hunks {
        rows.push(RenderedRow::HunkHeader(hunk));
        for line in &hunk.lines {
            rows.push(RenderedRow::Line(line));
            rows.extend(threads_for(file, index, line, order));
        }
    }

    rows
}

/// One section per file, in input order.
pub fn full_sections<'a>(
    files: &'a [FileDiff],
    index: &'a CommentIndex,
    order: ThreadOrder,
) -> Vec<Section<'a>> {
    files
        .iter()
        .map(|file| Section {
            file,
            rows: render_file(file, index, order),
        })
        .collect()
}

fn threads_for<'a>(
    file: &'a FileDiff,
    index: &'a CommentIndex,
    line: &'a DiffLine,
    order: ThreadOrder,
) -> impl Iterator<Item = RenderedRow<'a>> {
    order.sides().into_iter().filter_map(move |side| {
        let number = line.line_on(side)?;
        let comments = index.lookup(file.path_for(side), side, number);
        (!comments.is_empty()).then_some(RenderedRow::Thread { side, comments })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Anchor, Comment, DiffSide, Hunk};
    use chrono::{TimeZone, Utc};

    fn sample_file() -> FileDiff {
        let mut file = FileDiff::new("test");
        let mut hunk = Hunk::new(5, 4, 5, 4);
        hunk.lines = vec![
            DiffLine::context("line 5", 5, 5),
            DiffLine::deletion("line 6 old", 6),
            DiffLine::addition("line 6 new", 6),
            DiffLine::context("line 7", 7, 7),
            DiffLine::context("line 8", 8, 8),
            DiffLine::meta("\\ No newline at end of file"),
        ];
        file.hunks.push(hunk);
        file
    }

    fn comment(id: u64, anchor: Anchor) -> Comment {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Comment::new(id, "reviewer", "body", created, anchor)
    }

    /// Compact description of rows: `H`, `L<old>/<new>`, `T<side><id>`.
    fn shape(rows: &[RenderedRow<'_>]) -> Vec<String> {
        rows.iter()
            .map(|row| match row {
                RenderedRow::HunkHeader(_) => "H".to_string(),
                RenderedRow::Line(line) => format!(
                    "L{}/{}",
                    line.old_line.map_or("-".to_string(), |n| n.to_string()),
                    line.new_line.map_or("-".to_string(), |n| n.to_string())
                ),
                RenderedRow::Thread { side, comments } => {
                    format!("T{}{}", side.as_str(), comments[0].id)
                }
            })
            .collect()
    }

    #[test]
    fn test_deletion_matches_old_side_only() {
        let file = sample_file();
        let index = CommentIndex::build(vec![comment(1, Anchor::old("test", 6))]);
        let rows = render_file(&file, &index, ThreadOrder::OldFirst);

        assert_eq!(
            shape(&rows),
            vec!["H", "L5/5", "L6/-", "Told1", "L-/6", "L7/7", "L8/8", "L-/-"]
        );
    }

    #[test]
    fn test_addition_matches_new_side_only() {
        let file = sample_file();
        let index = CommentIndex::build(vec![comment(1, Anchor::new_side("test", 6))]);
        let rows = render_file(&file, &index, ThreadOrder::OldFirst);

        assert_eq!(
            shape(&rows),
            vec!["H", "L5/5", "L6/-", "L-/6", "Tnew1", "L7/7", "L8/8", "L-/-"]
        );
    }

    #[test]
    fn test_context_line_matches_both_sides_in_order() {
        let file = sample_file();
        let index = CommentIndex::build(vec![
            comment(1, Anchor::new_side("test", 7)),
            comment(2, Anchor::old("test", 7)),
        ]);

        let rows = render_file(&file, &index, ThreadOrder::OldFirst);
        assert_eq!(&shape(&rows)[4..7], ["L7/7", "Told2", "Tnew1"]);

        let rows = render_file(&file, &index, ThreadOrder::NewFirst);
        assert_eq!(&shape(&rows)[4..7], ["L7/7", "Tnew1", "Told2"]);
    }

    #[test]
    fn test_stale_anchor_renders_nothing() {
        let file = sample_file();
        let index = CommentIndex::build(vec![
            comment(1, Anchor::new_side("test", 99)),
            comment(2, Anchor::old("elsewhere", 5)),
        ]);
        let rows = render_file(&file, &index, ThreadOrder::OldFirst);
        assert!(!rows.iter().any(RenderedRow::is_thread));
        assert_eq!(rows.len(), 7);
    }

    #[test]
    fn test_renamed_file_uses_old_path_for_old_side() {
        let mut file = sample_file();
        file.path = "renamed".to_string();
        file.old_path = Some("test".to_string());

        let index = CommentIndex::build(vec![
            comment(1, Anchor::old("test", 6)),
            comment(2, Anchor::new_side("renamed", 8)),
        ]);
        let rows = render_file(&file, &index, ThreadOrder::OldFirst);
        let threads: Vec<(DiffSide, u64)> = rows
            .iter()
            .filter_map(|row| match row {
                RenderedRow::Thread { side, comments } => Some((*side, comments[0].id)),
                _ => None,
            })
            .collect();
        assert_eq!(threads, vec![(DiffSide::Old, 1), (DiffSide::New, 2)]);
    }
}
