//! Text layout of rendered rows.
//!
//! ```text
//! |        @@ -5,7 +5,7 @@
//! |  7   7  <context>
//! |  8     -<deleted>
//! |      8 +<added>
//! ```

use super::{RenderOptions, RenderedRow, DEFAULT_TIMESTAMP_FORMAT};
use crate::model::{Comment, DiffLine, LineKind};
use chrono::{DateTime, Utc};

/// Indentation of comment bodies and status lines.
const COMMENT_INDENT: &str = "    ";

/// Lays out rows as text using the gutter and timestamp settings.
#[derive(Debug, Clone, Copy)]
pub struct RowFormatter<'o> {
    options: &'o RenderOptions,
    /// `options.timestamp_format`, or the default when chrono cannot use it.
    timestamp_format: &'o str,
}

impl<'o> RowFormatter<'o> {
    pub fn new(options: &'o RenderOptions) -> Self {
        let timestamp_format = if options.has_valid_timestamp_format() {
            options.timestamp_format.as_str()
        } else {
            log::warn!(
                "invalid timestamp format {:?}, using {:?}",
                options.timestamp_format,
                DEFAULT_TIMESTAMP_FORMAT
            );
            DEFAULT_TIMESTAMP_FORMAT
        };
        Self {
            options,
            timestamp_format,
        }
    }

    /// Append `row` to `out`, newline-terminated.
    pub fn write_row(&self, out: &mut String, row: &RenderedRow<'_>) {
        match row {
            RenderedRow::HunkHeader(hunk) => {
                out.push('|');
                out.push_str(&self.blank_gutter());
                out.push_str(&hunk.header());
                out.push('\n');
            }
            RenderedRow::Line(line) => self.write_line(out, line),
            RenderedRow::Thread { comments, .. } => {
                for comment in comments.iter() {
                    self.write_comment(out, comment);
                }
            }
        }
    }

    fn write_line(&self, out: &mut String, line: &DiffLine) {
        if line.kind == LineKind::Meta {
            out.push('|');
            out.push_str(&self.blank_gutter());
            out.push_str(&line.content);
            out.push('\n');
            return;
        }

        out.push_str(&format!(
            "|{} {} {}{}\n",
            self.number(line.old_line),
            self.number(line.new_line),
            line.kind.prefix(),
            line.content
        ));
    }

    /// The body is re-indented line by line, so line endings are normalised.
    fn write_comment(&self, out: &mut String, comment: &Comment) {
        out.push('\n');
        for body_line in comment.body.lines() {
            if !body_line.is_empty() {
                out.push_str(COMMENT_INDENT);
                out.push_str(body_line);
            }
            out.push('\n');
        }
        out.push('\n');

        self.write_status(out, comment, "commented", comment.created_at);
        if comment.is_edited() {
            self.write_status(out, comment, "updated comment", comment.updated_at);
        }
    }

    fn write_status(&self, out: &mut String, comment: &Comment, verb: &str, at: DateTime<Utc>) {
        out.push_str(COMMENT_INDENT);
        if self.options.show_author {
            out.push_str(&comment.author);
            out.push(' ');
        }
        out.push_str(&format!(
            "{} at {}\n",
            verb,
            at.format(self.timestamp_format)
        ));
    }

    /// Right-justified line number, or spaces when the side has no line.
    fn number(&self, number: Option<u32>) -> String {
        let width = self.options.gutter_width;
        match number {
            Some(n) => format!("{:>width$}", n, width = width),
            None => " ".repeat(width),
        }
    }

    /// Spaces covering both number columns and their separators.
    fn blank_gutter(&self) -> String {
        " ".repeat(self.options.gutter_width * 2 + 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Anchor, DiffSide, Hunk};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn format_rows(options: &RenderOptions, rows: &[RenderedRow<'_>]) -> String {
        let formatter = RowFormatter::new(options);
        let mut out = String::new();
        for row in rows {
            formatter.write_row(&mut out, row);
        }
        out
    }

    #[test]
    fn test_line_rows_align_under_header() {
        let hunk = Hunk::new(5, 7, 5, 7);
        let context = DiffLine::context("line 6 text", 6, 6);
        let deletion = DiffLine::deletion("line 8 old", 8);
        let addition = DiffLine::addition("line 8 new", 8);
        let wide = DiffLine::context("line 10", 10, 10);
        let blank = DiffLine::context("", 7, 7);

        let out = format_rows(
            &RenderOptions::default(),
            &[
                RenderedRow::HunkHeader(&hunk),
                RenderedRow::Line(&context),
                RenderedRow::Line(&blank),
                RenderedRow::Line(&deletion),
                RenderedRow::Line(&addition),
                RenderedRow::Line(&wide),
            ],
        );

        let expected = [
            "|        @@ -5,7 +5,7 @@",
            "|  6   6  line 6 text",
            "|  7   7  ",
            "|  8     -line 8 old",
            "|      8 +line 8 new",
            "| 10  10  line 10",
            "",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_header_keeps_section_and_meta_uses_gutter() {
        let hunk = Hunk::with_section(1, 1, 1, 1, "fn main()");
        let meta = DiffLine::meta("\\ No newline at end of file");
        let options = RenderOptions {
            gutter_width: 4,
            ..RenderOptions::default()
        };

        let out = format_rows(
            &options,
            &[RenderedRow::HunkHeader(&hunk), RenderedRow::Line(&meta)],
        );
        assert_eq!(
            out,
            "|          @@ -1,1 +1,1 @@ fn main()\n|          \\ No newline at end of file\n"
        );
    }

    #[test]
    fn test_comment_block_with_edit() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 5, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap();
        let comments = vec![
            Comment::new(
                1,
                "alice",
                "First line.\n\nSecond paragraph.",
                created,
                Anchor::new_side("f", 1),
            ),
            Comment::new(2, "bob", "Agreed.", created, Anchor::new_side("f", 1))
                .edited_at(updated),
        ];

        let out = format_rows(
            &RenderOptions::default(),
            &[RenderedRow::Thread {
                side: DiffSide::New,
                comments: &comments,
            }],
        );

        let expected = [
            "",
            "    First line.",
            "",
            "    Second paragraph.",
            "",
            "    commented at 2024-05-01 12:05:00 UTC",
            "",
            "    Agreed.",
            "",
            "    commented at 2024-05-01 12:05:00 UTC",
            "    updated comment at 2024-05-01 13:00:00 UTC",
            "",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_status_lines_with_author() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 5, 0).unwrap();
        let comments = vec![Comment::new(1, "alice", "Hm.", created, Anchor::old("f", 1))];
        let options = RenderOptions {
            show_author: true,
            timestamp_format: "%Y-%m-%d".to_string(),
            ..RenderOptions::default()
        };

        let out = format_rows(
            &options,
            &[RenderedRow::Thread {
                side: DiffSide::Old,
                comments: &comments,
            }],
        );
        assert_eq!(out, "\n    Hm.\n\n    alice commented at 2024-05-01\n");
    }

    #[test]
    fn test_invalid_timestamp_format_falls_back_to_default() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 5, 0).unwrap();
        let comments = vec![Comment::new(1, "alice", "Hm.", created, Anchor::old("f", 1))];
        let options = RenderOptions {
            timestamp_format: "%Q".to_string(),
            ..RenderOptions::default()
        };

        let out = format_rows(
            &options,
            &[RenderedRow::Thread {
                side: DiffSide::Old,
                comments: &comments,
            }],
        );
        assert_eq!(out, "\n    Hm.\n\n    commented at 2024-05-01 12:05:00 UTC\n");
    }
}
