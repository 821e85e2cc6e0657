//! Lookup from diff anchors to the comment threads left there.

use crate::model::{Anchor, Comment, DiffSide, FileDiff};
use std::collections::HashMap;

/// Comment threads keyed by `(path, side, line)`.
///
/// Built once per render and read-only afterwards. Threads whose anchor is
/// never traversed by the renderer stay in the index without producing
/// output: review threads outlive the diff revision they were left on.
#[derive(Debug, Clone, Default)]
pub struct CommentIndex {
    /// Path → (side, line) → thread, so lookups borrow the path.
    threads: HashMap<String, HashMap<(DiffSide, u32), Vec<Comment>>>,
    len: usize,
}

impl CommentIndex {
    /// Group comments into threads.
    ///
    /// Each thread is ordered by creation time; comments created at the same
    /// instant keep their input order.
    pub fn build(comments: impl IntoIterator<Item = Comment>) -> Self {
        let mut index = Self::default();

        for comment in comments {
            let Anchor { path, side, line } = comment.anchor.clone();
            index
                .threads
                .entry(path)
                .or_default()
                .entry((side, line))
                .or_default()
                .push(comment);
            index.len += 1;
        }

        for thread in index.threads.values_mut().flat_map(|t| t.values_mut()) {
            thread.sort_by_key(|c| c.created_at);
        }

        log::debug!(
            "indexed {} comment(s) into {} thread(s)",
            index.len,
            index.thread_count()
        );
        index
    }

    /// The thread anchored at exactly `(path, side, line)`, possibly empty.
    pub fn lookup(&self, path: &str, side: DiffSide, line: u32) -> &[Comment] {
        self.threads
            .get(path)
            .and_then(|by_line| by_line.get(&(side, line)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of comments in the index.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct anchors.
    pub fn thread_count(&self) -> usize {
        self.threads.values().map(HashMap::len).sum()
    }

    /// Threads whose anchor does not fall on any numbered line of `files`.
    ///
    /// These are the threads a render of `files` leaves out. The result is
    /// sorted by anchor so it is stable across runs.
    pub fn orphaned(&self, files: &[FileDiff]) -> Vec<(Anchor, &[Comment])> {
        let mut orphans: Vec<(Anchor, &[Comment])> = self
            .threads
            .iter()
            .flat_map(|(path, by_line)| {
                by_line
                    .iter()
                    .map(move |(&(side, line), thread)| (path, side, line, thread))
            })
            .filter(|&(path, side, line, _)| {
                !files.iter().any(|file| {
                    file.path_for(side) == path
                        && file.hunks.iter().any(|h| h.contains(side, line))
                })
            })
            .map(|(path, side, line, thread)| {
                (Anchor::new(path.as_str(), side, line), thread.as_slice())
            })
            .collect();

        orphans.sort_by(|a, b| {
            (&a.0.path, a.0.side, a.0.line).cmp(&(&b.0.path, b.0.side, b.0.line))
        });
        orphans
    }
}
