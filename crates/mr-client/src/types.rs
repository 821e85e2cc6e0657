//! Review service data transfer objects
//!
//! These types mirror the JSON of merge request discussions and changes.
//! They are kept separate from the renderer's model; the conversions at the
//! bottom of each impl are the only place the two meet.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use mr_diff_render::{parse_file_patch, Anchor, Comment, FileDiff, FileStatus};
use serde::{Deserialize, Serialize};

/// Position type of notes attached to a line of text.
pub const POSITION_TYPE_TEXT: &str = "text";

/// A discussion: one or more notes replying to each other
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discussion {
    pub id: String,

    /// True for a standalone note that cannot be replied to
    #[serde(default)]
    pub individual_note: bool,

    #[serde(default)]
    pub notes: Vec<Note>,
}

/// A single note within a discussion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,

    pub body: String,

    pub author: Author,

    pub created_at: DateTime<Utc>,

    /// Missing on notes that were never edited
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Notes generated by the service itself (label changes, pushes, ...)
    #[serde(default)]
    pub system: bool,

    /// Where in the diff the note was left, if anywhere
    #[serde(default)]
    pub position: Option<NotePosition>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    pub username: String,

    #[serde(default)]
    pub name: String,
}

/// Diff position of a note
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotePosition {
    #[serde(default)]
    pub base_sha: Option<String>,

    #[serde(default)]
    pub start_sha: Option<String>,

    #[serde(default)]
    pub head_sha: Option<String>,

    #[serde(default)]
    pub old_path: Option<String>,

    #[serde(default)]
    pub new_path: Option<String>,

    /// "text" for line notes, "image" for notes on image diffs
    #[serde(default)]
    pub position_type: String,

    /// Set when the note is on a removed or unchanged line
    #[serde(default)]
    pub old_line: Option<u32>,

    /// Set when the note is on an added or unchanged line
    #[serde(default)]
    pub new_line: Option<u32>,
}

impl NotePosition {
    /// The diff anchor this position points at.
    ///
    /// The new side wins when both lines are set, as they are for notes on
    /// unchanged lines.
    pub fn anchor(&self) -> Option<Anchor> {
        if self.position_type != POSITION_TYPE_TEXT {
            return None;
        }

        if let Some(line) = self.new_line {
            let path = self.new_path.as_deref().or(self.old_path.as_deref())?;
            return Some(Anchor::new_side(path, line));
        }

        let line = self.old_line?;
        let path = self.old_path.as_deref().or(self.new_path.as_deref())?;
        Some(Anchor::old(path, line))
    }
}

impl Note {
    /// Convert into a renderer comment, if the note sits on a diff line.
    pub fn to_comment(&self) -> Option<Comment> {
        if self.system {
            return None;
        }
        let anchor = self.position.as_ref()?.anchor()?;

        let comment = Comment::new(
            self.id,
            self.author.username.clone(),
            self.body.clone(),
            self.created_at,
            anchor,
        );
        Some(match self.updated_at {
            Some(updated_at) => comment.edited_at(updated_at),
            None => comment,
        })
    }
}

/// Every line-anchored note of every discussion, in input order.
pub fn comments_from_discussions(discussions: &[Discussion]) -> Vec<Comment> {
    let comments: Vec<Comment> = discussions
        .iter()
        .flat_map(|discussion| discussion.notes.iter())
        .filter_map(Note::to_comment)
        .collect();

    log::debug!(
        "{} line comment(s) from {} discussion(s)",
        comments.len(),
        discussions.len()
    );
    comments
}

/// Changes of a merge request at one commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeRequestChanges {
    /// HEAD commit SHA the changes were taken at
    pub sha: String,

    #[serde(default)]
    pub changes: Vec<Change>,
}

/// The patch of a single file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Change {
    pub old_path: String,

    pub new_path: String,

    /// Hunks only, without file headers
    #[serde(default)]
    pub diff: String,

    #[serde(default)]
    pub new_file: bool,

    #[serde(default)]
    pub renamed_file: bool,

    #[serde(default)]
    pub deleted_file: bool,
}

impl Change {
    /// Status as flagged by the service.
    pub fn status(&self) -> FileStatus {
        if self.new_file {
            FileStatus::Added
        } else if self.deleted_file {
            FileStatus::Deleted
        } else if self.renamed_file {
            FileStatus::Renamed
        } else {
            FileStatus::Modified
        }
    }

    /// Parse the patch into a file diff.
    pub fn file_diff(&self) -> Result<FileDiff> {
        let old_path = self.renamed_file.then_some(self.old_path.as_str());
        let mut file = parse_file_patch(&self.new_path, old_path, &self.diff)
            .with_context(|| format!("Failed to parse diff of {}", self.new_path))?;

        file.status = self.status();
        if file.status != FileStatus::Renamed {
            file.old_path = None;
        }
        Ok(file)
    }
}

impl MergeRequestChanges {
    /// Parse every change, keeping the order the service returned them in.
    pub fn file_diffs(&self) -> Result<Vec<FileDiff>> {
        self.changes.iter().map(Change::file_diff).collect()
    }
}
