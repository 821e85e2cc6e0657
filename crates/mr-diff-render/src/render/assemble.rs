//! Final text assembly.

use super::{excerpt_sections, full_sections, DiffView, RenderOptions, RowFormatter, Section};
use crate::index::CommentIndex;
use crate::model::FileDiff;

/// Concatenate sections into the final text.
///
/// Each section starts with `commit:<sha>` and `File:<path>` lines followed by
/// its rows. No blank line is added between sections.
pub fn assemble(commit_sha: &str, sections: &[Section<'_>], options: &RenderOptions) -> String {
    let formatter = RowFormatter::new(options);
    let mut out = String::new();

    for section in sections {
        out.push_str(&format!("commit:{}\nFile:{}\n", commit_sha, section.file.path));
        for row in &section.rows {
            formatter.write_row(&mut out, row);
        }
    }

    out
}

/// Render parsed files with their threads according to `options.view`.
pub fn render_diff(
    commit_sha: &str,
    files: &[FileDiff],
    index: &CommentIndex,
    options: &RenderOptions,
) -> String {
    let sections = match options.view {
        DiffView::Full => full_sections(files, index, options.thread_order),
        DiffView::Excerpts { context } => {
            excerpt_sections(files, index, options.thread_order, context)
        }
    };
    assemble(commit_sha, &sections, options)
}
