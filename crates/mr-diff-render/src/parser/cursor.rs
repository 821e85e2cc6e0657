//! Line-number assignment for hunk bodies.
//!
//! A [`LineCursor`] is the running `(old, new)` position inside a hunk.
//! Each call to [`LineCursor::annotate`] consumes one raw body line and
//! returns the numbered [`DiffLine`] together with the advanced cursor, so a
//! hunk body is numbered by folding its lines through the cursor.

use crate::model::{DiffLine, Hunk};

/// Why a raw line could not be placed in the current hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The line does not start with ` `, `-`, `+` or `\`.
    UnknownPrefix,
    /// The line would take the hunk past its declared counts.
    ExceedsCounts,
    /// The next line number does not fit in `u32`.
    NumberOverflow,
}

/// Position inside a hunk body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCursor {
    old: u32,
    new: u32,
    old_remaining: u32,
    new_remaining: u32,
}

impl LineCursor {
    /// Cursor positioned at the first line of `hunk`.
    pub fn start(hunk: &Hunk) -> Self {
        Self {
            old: hunk.old_start,
            new: hunk.new_start,
            old_remaining: hunk.old_count,
            new_remaining: hunk.new_count,
        }
    }

    /// Whether every line declared by the hunk header has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.old_remaining == 0 && self.new_remaining == 0
    }

    /// Old and new lines still expected, in that order.
    pub fn remaining(&self) -> (u32, u32) {
        (self.old_remaining, self.new_remaining)
    }

    /// Number one raw body line and advance.
    ///
    /// An empty line counts as an empty context line, since some tools strip
    /// the single space that marks it. A lone `\r` is the same line taken
    /// from CRLF input and keeps the `\r` as its content.
    pub fn annotate(self, raw: &str) -> Result<(Self, DiffLine), Rejection> {
        let (prefix, content) = if raw == "\r" {
            (None, raw)
        } else {
            let mut chars = raw.chars();
            (chars.next(), chars.as_str())
        };

        let next = |n: u32| n.checked_add(1).ok_or(Rejection::NumberOverflow);

        match prefix {
            None | Some(' ') => {
                if self.old_remaining == 0 || self.new_remaining == 0 {
                    return Err(Rejection::ExceedsCounts);
                }
                let line = DiffLine::context(content, self.old, self.new);
                Ok((
                    Self {
                        old: next(self.old)?,
                        new: next(self.new)?,
                        old_remaining: self.old_remaining - 1,
                        new_remaining: self.new_remaining - 1,
                    },
                    line,
                ))
            }
            Some('-') => {
                if self.old_remaining == 0 {
                    return Err(Rejection::ExceedsCounts);
                }
                let line = DiffLine::deletion(content, self.old);
                Ok((
                    Self {
                        old: next(self.old)?,
                        old_remaining: self.old_remaining - 1,
                        ..self
                    },
                    line,
                ))
            }
            Some('+') => {
                if self.new_remaining == 0 {
                    return Err(Rejection::ExceedsCounts);
                }
                let line = DiffLine::addition(content, self.new);
                Ok((
                    Self {
                        new: next(self.new)?,
                        new_remaining: self.new_remaining - 1,
                        ..self
                    },
                    line,
                ))
            }
            Some('\\') => Ok((self, DiffLine::meta(raw))),
            Some(_) => Err(Rejection::UnknownPrefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineKind;

    fn number_lines<'a>(
        hunk: &Hunk,
        body: impl IntoIterator<Item = &'a str>,
    ) -> Result<(Vec<DiffLine>, LineCursor), (usize, Rejection)> {
        body.into_iter().enumerate().try_fold(
            (Vec::new(), LineCursor::start(hunk)),
            |(mut lines, cursor), (idx, raw)| {
                let (next, line) = cursor.annotate(raw).map_err(|r| (idx, r))?;
                lines.push(line);
                Ok((lines, next))
            },
        )
    }

    #[test]
    fn test_first_line_carries_hunk_start() {
        let hunk = Hunk::new(5, 3, 7, 3);
        let (_, line) = LineCursor::start(&hunk).annotate(" same").unwrap();
        assert_eq!(line.old_line, Some(5));
        assert_eq!(line.new_line, Some(7));
        assert_eq!(line.content, "same");
    }

    #[test]
    fn test_counters_diverge_on_changes() {
        let hunk = Hunk::new(5, 7, 5, 7);
        let body = [
            " ", " line 6", " ", "-line 8 old", "+line 8 new", " ", " line 10",
        ];
        let (lines, cursor) = number_lines(&hunk, body).unwrap();

        let numbers: Vec<_> = lines.iter().map(|l| (l.old_line, l.new_line)).collect();
        assert_eq!(
            numbers,
            vec![
                (Some(5), Some(5)),
                (Some(6), Some(6)),
                (Some(7), Some(7)),
                (Some(8), None),
                (None, Some(8)),
                (Some(9), Some(9)),
                (Some(10), Some(10)),
            ]
        );
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_sequences_strictly_increase() {
        let hunk = Hunk::new(1, 4, 1, 5);
        let body = ["-a", "-b", "+c", "+d", "+e", " f", " g"];
        let (lines, _) = number_lines(&hunk, body).unwrap();

        let olds: Vec<u32> = lines.iter().filter_map(|l| l.old_line).collect();
        let news: Vec<u32> = lines.iter().filter_map(|l| l.new_line).collect();
        assert_eq!(olds, vec![1, 2, 3, 4]);
        assert_eq!(news, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_meta_line_has_no_numbers() {
        let hunk = Hunk::new(1, 1, 1, 1);
        let cursor = LineCursor::start(&hunk);
        let (next, line) = cursor.annotate("\\ No newline at end of file").unwrap();
        assert_eq!(line.kind, LineKind::Meta);
        assert_eq!(line.old_line, None);
        assert_eq!(line.new_line, None);
        assert_eq!(next, cursor);
    }

    #[test]
    fn test_empty_line_is_empty_context() {
        let hunk = Hunk::new(3, 1, 3, 1);
        let (next, line) = LineCursor::start(&hunk).annotate("").unwrap();
        assert_eq!(line, DiffLine::context("", 3, 3));
        assert!(next.is_exhausted());
    }

    #[test]
    fn test_rejections() {
        let hunk = Hunk::new(1, 1, 1, 0);
        let cursor = LineCursor::start(&hunk);
        assert_eq!(cursor.annotate("*bogus"), Err(Rejection::UnknownPrefix));
        assert_eq!(cursor.annotate("+added"), Err(Rejection::ExceedsCounts));
        assert_eq!(cursor.annotate(" context"), Err(Rejection::ExceedsCounts));
        assert_eq!(cursor.remaining(), (1, 0));

        let err = number_lines(&hunk, ["-gone", "-again"]).unwrap_err();
        assert_eq!(err, (1, Rejection::ExceedsCounts));
    }

    #[test]
    fn test_crlf_empty_line_keeps_carriage_return() {
        let hunk = Hunk::new(3, 1, 3, 1);
        let (_, line) = LineCursor::start(&hunk).annotate("\r").unwrap();
        assert_eq!(line, DiffLine::context("\r", 3, 3));
    }

    #[test]
    fn test_number_past_u32_max_is_rejected() {
        let hunk = Hunk::new(u32::MAX, 1, 1, 1);
        let cursor = LineCursor::start(&hunk);
        assert_eq!(cursor.annotate(" same"), Err(Rejection::NumberOverflow));
        assert_eq!(cursor.annotate("-gone"), Err(Rejection::NumberOverflow));
        assert!(cursor.annotate("+added").is_ok());
    }
}
