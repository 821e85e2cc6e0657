//! Diff data structures representing a merge request's changes.

use super::DiffSide;

/// A single file's diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    /// Current file path (after rename if applicable, the removed path for
    /// deleted files).
    pub path: String,
    /// Previous file path (if renamed).
    pub old_path: Option<String>,
    /// File status.
    pub status: FileStatus,
    /// Change hunks, in input order.
    pub hunks: Vec<Hunk>,
    /// Number of added lines.
    pub additions: usize,
    /// Number of deleted lines.
    pub deletions: usize,
}

impl FileDiff {
    /// Create a new file diff.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            old_path: None,
            status: FileStatus::Modified,
            hunks: Vec::new(),
            additions: 0,
            deletions: 0,
        }
    }

    /// Path that anchors on the given side refer to.
    pub fn path_for(&self, side: DiffSide) -> &str {
        match side {
            DiffSide::Old => self.old_path.as_deref().unwrap_or(&self.path),
            DiffSide::New => &self.path,
        }
    }

    /// Recalculate line statistics from hunks.
    pub fn recalculate_stats(&mut self) {
        self.additions = self
            .hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == LineKind::Addition)
            .count();
        self.deletions = self
            .hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == LineKind::Deletion)
            .count();
    }
}

/// File status in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

/// A contiguous region of changes (hunk).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// Old file starting line.
    pub old_start: u32,
    /// Number of lines in old version.
    pub old_count: u32,
    /// New file starting line.
    pub new_start: u32,
    /// Number of lines in new version.
    pub new_count: u32,
    /// Text after the closing `@@` (usually the enclosing function).
    pub section: Option<String>,
    /// Lines in this hunk.
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    /// Create a new hunk with the given header info.
    pub fn new(old_start: u32, old_count: u32, new_start: u32, new_count: u32) -> Self {
        Self {
            old_start,
            old_count,
            new_start,
            new_count,
            section: None,
            lines: Vec::new(),
        }
    }

    /// Create a hunk with a function context in header.
    pub fn with_section(
        old_start: u32,
        old_count: u32,
        new_start: u32,
        new_count: u32,
        section: impl Into<String>,
    ) -> Self {
        Self {
            section: Some(section.into()),
            ..Self::new(old_start, old_count, new_start, new_count)
        }
    }

    /// Header text with explicit counts, e.g. `@@ -10,5 +10,7 @@ fn example()`.
    pub fn header(&self) -> String {
        let range = format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_count, self.new_start, self.new_count
        );
        match &self.section {
            Some(section) => format!("{} {}", range, section),
            None => range,
        }
    }

    /// Whether any line of this hunk carries `line` on `side`.
    pub fn contains(&self, side: DiffSide, line: u32) -> bool {
        self.lines.iter().any(|l| l.line_on(side) == Some(line))
    }
}

/// A single line in the diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Line type.
    pub kind: LineKind,
    /// Line content (without leading +/-/ ).
    pub content: String,
    /// Line number in old file (for Context and Deletion).
    pub old_line: Option<u32>,
    /// Line number in new file (for Context and Addition).
    pub new_line: Option<u32>,
}

impl DiffLine {
    /// Create a new context line.
    pub fn context(content: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        Self {
            kind: LineKind::Context,
            content: content.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    /// Create a new addition line.
    pub fn addition(content: impl Into<String>, new_line: u32) -> Self {
        Self {
            kind: LineKind::Addition,
            content: content.into(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    /// Create a new deletion line.
    pub fn deletion(content: impl Into<String>, old_line: u32) -> Self {
        Self {
            kind: LineKind::Deletion,
            content: content.into(),
            old_line: Some(old_line),
            new_line: None,
        }
    }

    /// Create a metadata line such as `\ No newline at end of file`.
    ///
    /// The content keeps its leading backslash.
    pub fn meta(content: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Meta,
            content: content.into(),
            old_line: None,
            new_line: None,
        }
    }

    /// Line number on the given side.
    pub fn line_on(&self, side: DiffSide) -> Option<u32> {
        match side {
            DiffSide::Old => self.old_line,
            DiffSide::New => self.new_line,
        }
    }

    /// The line as it appears in a unified diff body.
    pub fn to_patch_line(&self) -> String {
        match self.kind {
            LineKind::Meta => self.content.clone(),
            kind => format!("{}{}", kind.prefix(), self.content),
        }
    }
}

/// Line type in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Unchanged line (for context).
    Context,
    /// Added line (+).
    Addition,
    /// Removed line (-).
    Deletion,
    /// Marker line carrying no line number (`\ No newline at end of file`).
    Meta,
}

impl LineKind {
    /// Get the prefix character for this line type.
    pub fn prefix(&self) -> char {
        match self {
            LineKind::Context => ' ',
            LineKind::Addition => '+',
            LineKind::Deletion => '-',
            LineKind::Meta => '\\',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for_side() {
        let mut file = FileDiff::new("src/new.rs");
        assert_eq!(file.path_for(DiffSide::Old), "src/new.rs");

        file.old_path = Some("src/old.rs".to_string());
        file.status = FileStatus::Renamed;
        assert_eq!(file.path_for(DiffSide::Old), "src/old.rs");
        assert_eq!(file.path_for(DiffSide::New), "src/new.rs");
    }

    #[test]
    fn test_hunk_header_format() {
        let hunk = Hunk::new(10, 5, 10, 7);
        assert_eq!(hunk.header(), "@@ -10,5 +10,7 @@");

        let hunk = Hunk::with_section(10, 5, 10, 7, "fn example()");
        assert_eq!(hunk.header(), "@@ -10,5 +10,7 @@ fn example()");
    }

    #[test]
    fn test_diff_line_kinds() {
        let ctx = DiffLine::context("unchanged", 5, 5);
        assert_eq!(ctx.kind, LineKind::Context);
        assert_eq!(ctx.line_on(DiffSide::Old), Some(5));
        assert_eq!(ctx.line_on(DiffSide::New), Some(5));

        let add = DiffLine::addition("new line", 10);
        assert_eq!(add.old_line, None);
        assert_eq!(add.new_line, Some(10));
        assert_eq!(add.to_patch_line(), "+new line");

        let del = DiffLine::deletion("removed line", 8);
        assert_eq!(del.old_line, Some(8));
        assert_eq!(del.new_line, None);
        assert_eq!(del.to_patch_line(), "-removed line");

        let meta = DiffLine::meta("\\ No newline at end of file");
        assert_eq!(meta.line_on(DiffSide::Old), None);
        assert_eq!(meta.to_patch_line(), "\\ No newline at end of file");
    }

    #[test]
    fn test_recalculate_stats() {
        let mut file = FileDiff::new("a.txt");
        let mut hunk = Hunk::new(1, 2, 1, 2);
        hunk.lines = vec![
            DiffLine::context("a", 1, 1),
            DiffLine::deletion("b", 2),
            DiffLine::addition("c", 2),
        ];
        file.hunks.push(hunk);
        file.recalculate_stats();
        assert_eq!(file.additions, 1);
        assert_eq!(file.deletions, 1);
    }
}
