//! Diff parsing utilities.

mod cursor;
mod unified;

pub use cursor::{LineCursor, Rejection};
pub use unified::{parse_file_patch, parse_unified_diff, ParseError};
