//! Parse unified diff format (as produced by `git diff` or the review service).

use super::cursor::{LineCursor, Rejection};
use crate::model::{DiffLine, FileDiff, FileStatus, Hunk};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

const DEV_NULL: &str = "/dev/null";

/// Signature separator `git format-patch` appends after the last hunk.
const PATCH_SIGNATURE: &str = "-- ";

/// Errors that can occur during diff parsing.
///
/// Line numbers are 1-based positions in the input text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: invalid hunk header `{text}`")]
    InvalidHunkHeader { line: usize, text: String },
    #[error("line {line}: unexpected `{text}` inside hunk body")]
    UnexpectedLine { line: usize, text: String },
    #[error(
        "line {line}: hunk `{header}` ended with {missing_old} old and {missing_new} new lines missing"
    )]
    TruncatedHunk {
        line: usize,
        header: String,
        missing_old: u32,
        missing_new: u32,
    },
    #[error("line {line}: `{text}` exceeds the line counts declared by `{header}`")]
    HunkOverflow {
        line: usize,
        header: String,
        text: String,
    },
    #[error("line {line}: file section has no recognizable path")]
    MissingPath { line: usize },
}

/// Parse a unified diff string into per-file diffs, in input order.
///
/// An empty input yields an empty list.
///
/// # Example
/// ```
/// let files = mr_diff_render::parse_unified_diff(
///     "--- a/notes.txt\n+++ b/notes.txt\n@@ -1 +1 @@\n-old\n+new\n",
/// )?;
/// assert_eq!(files[0].path, "notes.txt");
/// assert_eq!(files[0].hunks[0].lines.len(), 2);
/// # Ok::<(), mr_diff_render::ParseError>(())
/// ```
pub fn parse_unified_diff(diff_text: &str) -> Result<Vec<FileDiff>, ParseError> {
    let mut parser = Parser::new(None);
    parser.run(diff_text)?;
    log::debug!("parsed {} file(s) from unified diff", parser.files.len());
    Ok(parser.files)
}

/// Parse the hunks of a single file that come without file headers.
///
/// The review service returns each changed file as a bare list of hunks
/// alongside its old and new path; this turns one such entry into a
/// [`FileDiff`].
pub fn parse_file_patch(
    path: &str,
    old_path: Option<&str>,
    patch: &str,
) -> Result<FileDiff, ParseError> {
    let mut section = FileSection::new(0);
    section.new_path = Some(path.to_string());
    section.old_path = Some(old_path.unwrap_or(path).to_string());

    let mut parser = Parser::new(Some(section));
    parser.single_file = true;
    parser.run(patch)?;

    let file = parser.files.pop().unwrap_or_else(|| FileDiff::new(path));
    log::trace!("parsed {} hunk(s) for {}", file.hunks.len(), file.path);
    Ok(file)
}

/// A file section whose paths and hunks are still being collected.
#[derive(Debug)]
struct FileSection {
    /// Input line that opened the section.
    start_line: usize,
    old_path: Option<String>,
    new_path: Option<String>,
    status: Option<FileStatus>,
    /// Whether `---`/`+++` headers were already seen.
    has_markers: bool,
    hunks: Vec<Hunk>,
}

impl FileSection {
    fn new(start_line: usize) -> Self {
        Self {
            start_line,
            old_path: None,
            new_path: None,
            status: None,
            has_markers: false,
            hunks: Vec::new(),
        }
    }

    fn finish(self) -> Result<FileDiff, ParseError> {
        let old = self.old_path.filter(|p| !p.is_empty());
        let new = self.new_path.filter(|p| !p.is_empty());

        let mut file = match (old, new) {
            (Some(old), Some(new)) if new == DEV_NULL => {
                let mut file = FileDiff::new(old);
                file.status = FileStatus::Deleted;
                file
            }
            (Some(old), Some(new)) if old == DEV_NULL => {
                let mut file = FileDiff::new(new);
                file.status = FileStatus::Added;
                file
            }
            (Some(old), Some(new)) => {
                let mut file = FileDiff::new(new);
                if old != file.path {
                    file.old_path = Some(old);
                    file.status = FileStatus::Renamed;
                }
                file
            }
            (None, Some(path)) | (Some(path), None) if path != DEV_NULL => FileDiff::new(path),
            _ => {
                return Err(ParseError::MissingPath {
                    line: self.start_line,
                })
            }
        };

        if let Some(status) = self.status {
            file.status = status;
        }
        file.hunks = self.hunks;
        file.recalculate_stats();
        Ok(file)
    }
}

/// A hunk whose body is still being read.
#[derive(Debug)]
struct OpenHunk {
    /// Input line of the `@@` header.
    header_line: usize,
    hunk: Hunk,
    cursor: LineCursor,
}

struct Parser {
    files: Vec<FileDiff>,
    section: Option<FileSection>,
    hunk: Option<OpenHunk>,
    /// Reject file headers; used for bare per-file patches.
    single_file: bool,
}

impl Parser {
    fn new(section: Option<FileSection>) -> Self {
        Self {
            files: Vec::new(),
            section,
            hunk: None,
            single_file: false,
        }
    }

    fn run(&mut self, text: &str) -> Result<(), ParseError> {
        // Split on '\n' only: a '\r' before it belongs to the line content.
        let lines: Vec<&str> = text.split_terminator('\n').collect();
        let mut idx = 0;

        while idx < lines.len() {
            let line_no = idx + 1;
            let raw = lines[idx];
            // Headers are matched without the carriage return of CRLF input.
            let header = raw.strip_suffix('\r').unwrap_or(raw);
            idx += 1;

            if header.starts_with("@@") {
                self.close_hunk(line_no)?;
                self.open_hunk(line_no, header)?;
                continue;
            }

            let next_is_target = lines.get(idx).is_some_and(|l| l.starts_with("+++ "));
            let is_file_header = header.starts_with("diff --git ")
                || (header.starts_with("--- ") && next_is_target && self.hunk_is_complete());
            if is_file_header {
                if self.single_file {
                    return Err(ParseError::UnexpectedLine {
                        line: line_no,
                        text: header.to_string(),
                    });
                }
                self.close_hunk(line_no)?;
                if header.starts_with("diff --git ") {
                    self.start_section(line_no)?;
                    self.apply_git_header(header);
                } else {
                    self.apply_markers(line_no, header, lines[idx])?;
                    idx += 1;
                }
                continue;
            }

            match self.hunk.as_mut() {
                Some(open) if !open.cursor.is_exhausted() => open.push(line_no, raw)?,
                Some(open) => open.push_trailing(line_no, raw)?,
                None => self.apply_extended_header(header),
            }
        }

        self.close_hunk(lines.len() + 1)?;
        if let Some(section) = self.section.take() {
            self.files.push(section.finish()?);
        }
        Ok(())
    }

    fn hunk_is_complete(&self) -> bool {
        self.hunk.as_ref().map_or(true, |h| h.cursor.is_exhausted())
    }

    fn start_section(&mut self, line_no: usize) -> Result<(), ParseError> {
        if let Some(section) = self.section.take() {
            self.files.push(section.finish()?);
        }
        self.section = Some(FileSection::new(line_no));
        Ok(())
    }

    fn open_hunk(&mut self, line_no: usize, raw: &str) -> Result<(), ParseError> {
        if self.section.is_none() {
            return Err(ParseError::MissingPath { line: line_no });
        }
        let hunk = parse_hunk_header(line_no, raw)?;
        let cursor = LineCursor::start(&hunk);
        self.hunk = Some(OpenHunk {
            header_line: line_no,
            hunk,
            cursor,
        });
        Ok(())
    }

    /// Move the open hunk into the current section.
    ///
    /// `line_no` is the line that ended the hunk; it is reported when the
    /// hunk is shorter than its header declared.
    fn close_hunk(&mut self, line_no: usize) -> Result<(), ParseError> {
        let Some(open) = self.hunk.take() else {
            return Ok(());
        };
        if !open.cursor.is_exhausted() {
            let (missing_old, missing_new) = open.cursor.remaining();
            return Err(ParseError::TruncatedHunk {
                line: line_no,
                header: open.hunk.header(),
                missing_old,
                missing_new,
            });
        }
        if let Some(section) = self.section.as_mut() {
            section.hunks.push(open.hunk);
        }
        Ok(())
    }

    fn apply_git_header(&mut self, raw: &str) {
        let Some(section) = self.section.as_mut() else {
            return;
        };
        if let Some((old, new)) = parse_git_header_paths(raw) {
            section.old_path = Some(old);
            section.new_path = Some(new);
        }
    }

    /// Apply a `---`/`+++` pair, starting a new section unless it belongs to
    /// the `diff --git` header just seen.
    fn apply_markers(
        &mut self,
        line_no: usize,
        source: &str,
        target: &str,
    ) -> Result<(), ParseError> {
        let belongs_to_current = self
            .section
            .as_ref()
            .is_some_and(|s| !s.has_markers && s.hunks.is_empty());
        if !belongs_to_current {
            self.start_section(line_no)?;
        }
        if let Some(section) = self.section.as_mut() {
            section.old_path = Some(clean_path(&source[4..]));
            section.new_path = Some(clean_path(&target[4..]));
            section.has_markers = true;
        }
        Ok(())
    }

    fn apply_extended_header(&mut self, raw: &str) {
        let Some(section) = self.section.as_mut() else {
            log::trace!("skipping preamble line: {}", raw);
            return;
        };
        if let Some(path) = raw.strip_prefix("rename from ") {
            section.old_path = Some(unquote(path).to_string());
            section.status = Some(FileStatus::Renamed);
        } else if let Some(path) = raw.strip_prefix("rename to ") {
            section.new_path = Some(unquote(path).to_string());
            section.status = Some(FileStatus::Renamed);
        } else if raw.starts_with("new file mode") {
            section.status = Some(FileStatus::Added);
        } else if raw.starts_with("deleted file mode") {
            section.status = Some(FileStatus::Deleted);
        } else {
            log::trace!("skipping extended header: {}", raw);
        }
    }
}

impl OpenHunk {
    fn push(&mut self, line_no: usize, raw: &str) -> Result<(), ParseError> {
        match self.cursor.annotate(raw) {
            Ok((cursor, line)) => {
                self.cursor = cursor;
                self.hunk.lines.push(line);
                Ok(())
            }
            Err(Rejection::UnknownPrefix) => Err(ParseError::UnexpectedLine {
                line: line_no,
                text: raw.to_string(),
            }),
            Err(Rejection::ExceedsCounts) => Err(self.overflow(line_no, raw)),
            Err(Rejection::NumberOverflow) => Err(ParseError::InvalidHunkHeader {
                line: self.header_line,
                text: self.hunk.header(),
            }),
        }
    }

    /// Handle a line after the body has all its declared lines.
    fn push_trailing(&mut self, line_no: usize, raw: &str) -> Result<(), ParseError> {
        if raw.strip_suffix('\r').unwrap_or(raw) == PATCH_SIGNATURE {
            log::trace!("skipping patch signature separator");
            return Ok(());
        }
        match raw.chars().next() {
            Some('\\') => {
                self.hunk.lines.push(DiffLine::meta(raw));
                Ok(())
            }
            Some(' ' | '+' | '-') => Err(self.overflow(line_no, raw)),
            _ => {
                log::trace!("skipping trailing line: {}", raw);
                Ok(())
            }
        }
    }

    fn overflow(&self, line_no: usize, raw: &str) -> ParseError {
        ParseError::HunkOverflow {
            line: line_no,
            header: self.hunk.header(),
            text: raw.to_string(),
        }
    }
}

/// Parse `@@ -o[,p] +n[,q] @@[ section]`; omitted counts default to 1.
fn parse_hunk_header(line_no: usize, raw: &str) -> Result<Hunk, ParseError> {
    static HUNK_HEADER: OnceLock<Regex> = OnceLock::new();

    let re = HUNK_HEADER.get_or_init(|| {
        Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@(?: ?(.*))?$").unwrap()
    });

    let invalid = || ParseError::InvalidHunkHeader {
        line: line_no,
        text: raw.to_string(),
    };
    let captures = re.captures(raw).ok_or_else(invalid)?;
    let number = |idx: usize, default: Option<u32>| -> Result<u32, ParseError> {
        match captures.get(idx) {
            Some(m) => m.as_str().parse().map_err(|_| invalid()),
            None => default.ok_or_else(invalid),
        }
    };

    let (old_start, old_count) = (number(1, None)?, number(2, Some(1))?);
    let (new_start, new_count) = (number(3, None)?, number(4, Some(1))?);
    // Every line number the body can reach must fit in `u32`.
    if old_start.checked_add(old_count).is_none() || new_start.checked_add(new_count).is_none() {
        return Err(invalid());
    }

    let mut hunk = Hunk::new(old_start, old_count, new_start, new_count);
    hunk.section = captures
        .get(5)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Ok(hunk)
}

/// Extract the `a/` and `b/` paths from a `diff --git` line.
fn parse_git_header_paths(raw: &str) -> Option<(String, String)> {
    static GIT_HEADER: OnceLock<Regex> = OnceLock::new();

    let re = GIT_HEADER
        .get_or_init(|| Regex::new(r#"^diff --git "?a/(.+?)"? "?b/(.+?)"?$"#).unwrap());

    let captures = re.captures(raw)?;
    Some((captures[1].to_string(), captures[2].to_string()))
}

/// Clean the path of a `---`/`+++` marker.
///
/// Removes the a/b prefixes from git diff output, surrounding quotes and any
/// tab-separated timestamp.
fn clean_path(path: &str) -> String {
    let path = path.split('\t').next().unwrap_or(path).trim();
    let path = unquote(path);

    // Remove common prefixes
    if let Some(stripped) = path.strip_prefix("a/") {
        return stripped.to_string();
    }
    if let Some(stripped) = path.strip_prefix("b/") {
        return stripped.to_string();
    }

    path.to_string()
}

fn unquote(path: &str) -> &str {
    path.strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
        .unwrap_or(path)
}
