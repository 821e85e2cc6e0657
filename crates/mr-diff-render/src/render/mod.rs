//! Aligns comment threads with diff lines and lays the result out as text.
//!
//! Rendering is two passes: [`render_file`] and [`excerpt_sections`] decide
//! which rows appear and where threads go, then [`assemble`] formats them.

mod assemble;
mod excerpt;
mod hunk;
mod layout;
mod options;
mod row;

pub use assemble::{assemble, render_diff};
pub use excerpt::excerpt_sections;
pub use hunk::{full_sections, render_file};
pub use layout::RowFormatter;
pub use options::{
    DiffView, RenderOptions, ThreadOrder, DEFAULT_EXCERPT_CONTEXT, DEFAULT_GUTTER_WIDTH,
    DEFAULT_TIMESTAMP_FORMAT,
};
pub use row::{RenderedRow, Section};
