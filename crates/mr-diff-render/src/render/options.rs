//! Settings that shape the rendered text.

use crate::model::DiffSide;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

/// Default width of each line-number column.
pub const DEFAULT_GUTTER_WIDTH: usize = 3;

/// Default `chrono` format for comment timestamps.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Default number of rows shown before an anchored line in excerpt view.
pub const DEFAULT_EXCERPT_CONTEXT: usize = 5;

/// Options for rendering a diff with its discussion threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Width of the old and new line-number columns.
    pub gutter_width: usize,
    /// `chrono` format string for "commented at" lines.
    pub timestamp_format: String,
    /// Which thread comes first when a context line matches on both sides.
    pub thread_order: ThreadOrder,
    /// Prefix status lines with the comment author.
    pub show_author: bool,
    pub view: DiffView,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gutter_width: DEFAULT_GUTTER_WIDTH,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            thread_order: ThreadOrder::OldFirst,
            show_author: false,
            view: DiffView::Full,
        }
    }
}

impl RenderOptions {
    /// Whether `timestamp_format` is a format string `chrono` can render.
    pub fn has_valid_timestamp_format(&self) -> bool {
        !StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error))
    }
}

/// Order in which the two sides of a context line are checked for threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThreadOrder {
    #[default]
    OldFirst,
    NewFirst,
}

impl ThreadOrder {
    /// Sides in lookup order.
    pub fn sides(self) -> [DiffSide; 2] {
        match self {
            ThreadOrder::OldFirst => [DiffSide::Old, DiffSide::New],
            ThreadOrder::NewFirst => [DiffSide::New, DiffSide::Old],
        }
    }
}

/// What part of the diff is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffView {
    /// Every hunk of every file, threads interleaved.
    #[default]
    Full,
    /// One section per thread, showing only the rows leading up to it.
    Excerpts {
        /// Rows shown before the anchored line.
        context: usize,
    },
}
