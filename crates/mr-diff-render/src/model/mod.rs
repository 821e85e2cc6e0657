//! Data models for diff and discussion representation.

mod comment;
mod diff;

pub use comment::{Anchor, Comment, CommentId, DiffSide};
pub use diff::{DiffLine, FileDiff, FileStatus, Hunk, LineKind};
