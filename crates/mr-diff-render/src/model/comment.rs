//! Review comment data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to a comment by the review service.
pub type CommentId = u64;

/// A line-anchored review comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    /// Author's username.
    pub author: String,
    /// Comment body (may span several lines).
    pub body: String,
    pub created_at: DateTime<Utc>,
    /// Equal to `created_at` unless the comment was edited.
    pub updated_at: DateTime<Utc>,
    /// Where the comment is anchored in the diff.
    pub anchor: Anchor,
}

impl Comment {
    /// Create a comment that was never edited.
    pub fn new(
        id: CommentId,
        author: impl Into<String>,
        body: impl Into<String>,
        created_at: DateTime<Utc>,
        anchor: Anchor,
    ) -> Self {
        Self {
            id,
            author: author.into(),
            body: body.into(),
            created_at,
            updated_at: created_at,
            anchor,
        }
    }

    /// Mark the comment as edited at `updated_at`.
    pub fn edited_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// Whether the comment was edited after creation.
    pub fn is_edited(&self) -> bool {
        self.updated_at != self.created_at
    }
}

/// The (file, side, line) triple a comment is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Anchor {
    /// File path in the version named by `side`.
    pub path: String,
    /// Which side of the diff.
    pub side: DiffSide,
    /// Line number (in the respective file version).
    pub line: u32,
}

impl Anchor {
    pub fn new(path: impl Into<String>, side: DiffSide, line: u32) -> Self {
        Self {
            path: path.into(),
            side,
            line,
        }
    }

    /// Anchor on the pre-change version of a file.
    pub fn old(path: impl Into<String>, line: u32) -> Self {
        Self::new(path, DiffSide::Old, line)
    }

    /// Anchor on the post-change version of a file.
    pub fn new_side(path: impl Into<String>, line: u32) -> Self {
        Self::new(path, DiffSide::New, line)
    }
}

/// Which version of the file a line number refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffSide {
    /// Old file (deletions side).
    Old,
    /// New file (additions side).
    New,
}

impl DiffSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffSide::Old => "old",
            DiffSide::New => "new",
        }
    }
}
