//! # mr-diff-render
//!
//! Renders a merge request's unified diff with its line-anchored discussion
//! threads interleaved, as plain text.
//!
//! ## Pipeline
//!
//! 1. [`parse_unified_diff`] turns diff text into [`FileDiff`]s with old and
//!    new line numbers assigned to every line.
//! 2. [`CommentIndex::build`] groups [`Comment`]s into threads by anchor.
//! 3. [`render_diff`] walks each hunk, places each thread right after the
//!    line it is anchored to and lays the rows out in the gutter format.
//!
//! The crate does no I/O: the diff and the comments are fetched by the
//! caller.
//!
//! ## Usage
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use mr_diff_render::{Anchor, Comment, CommentIndex, RenderOptions};
//!
//! let diff = "--- a/test\n+++ b/test\n@@ -1,2 +1,2 @@\n keep\n-old\n+new\n";
//! let files = mr_diff_render::parse_unified_diff(diff)?;
//!
//! let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
//! let index = CommentIndex::build(vec![Comment::new(
//!     1,
//!     "reviewer",
//!     "Why was this removed?",
//!     created,
//!     Anchor::old("test", 2),
//! )]);
//!
//! let text = mr_diff_render::render_diff("abc123", &files, &index, &RenderOptions::default());
//! assert!(text.contains("|  2     -old\n\n    Why was this removed?\n"));
//! # Ok::<(), mr_diff_render::ParseError>(())
//! ```

pub mod index;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use index::CommentIndex;
pub use model::{
    Anchor, Comment, CommentId, DiffLine, DiffSide, FileDiff, FileStatus, Hunk, LineKind,
};
pub use parser::{parse_file_patch, parse_unified_diff, ParseError};
pub use render::{render_diff, DiffView, RenderOptions, RenderedRow, ThreadOrder};

