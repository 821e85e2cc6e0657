//! Merge request records as returned by the review service.
//!
//! This crate reads discussions and changes exported as JSON and turns them
//! into the types the diff renderer works with:
//!
//! ```text
//! discussions.json ──► Vec<Discussion> ──► comments_from_discussions() ──► Vec<Comment>
//! changes.json     ──► MergeRequestChanges ──► file_diffs()            ──► Vec<FileDiff>
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use mr_client::{comments_from_discussions, load_changes, load_discussions};
//! use mr_diff_render::{render_diff, CommentIndex, RenderOptions};
//!
//! # fn example() -> anyhow::Result<()> {
//! let changes = load_changes("changes.json")?;
//! let discussions = load_discussions("discussions.json")?;
//!
//! let files = changes.file_diffs()?;
//! let index = CommentIndex::build(comments_from_discussions(&discussions));
//! print!("{}", render_diff(&changes.sha, &files, &index, &RenderOptions::default()));
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod types;

pub use loader::{load_changes, load_discussions, read_changes, read_discussions};
pub use types::{
    comments_from_discussions, Author, Change, Discussion, MergeRequestChanges, Note,
    NotePosition, POSITION_TYPE_TEXT,
};
