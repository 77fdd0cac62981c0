//! Restrict a transcript to the message groups inside a [`DateRange`].
//!
//! A transcript is a sequence of *date-marker lines* (starting with a
//! `YYYY-MM-DD` token) each followed by zero or more *continuation lines*. The
//! filter is a fold over the lines that carries a [`DateCursor`]: the date of
//! the most recent marker. Range membership is decided once per marker and
//! applied to every line of its group, so a continuation line never survives
//! unless its marker did. Lines before the first marker have no cursor and are
//! always dropped.
//!
//! # Example
//!
//! ```
//! use chatdigest::core::{DateRange, filter_by_date};
//!
//! # fn main() -> chatdigest::Result<()> {
//! let text = "header\n2025-03-18 10:00:00 A\nhello\n2025-03-19 09:00:00 B\nbye";
//! let range = DateRange::parse("2025-03-18")?;
//! assert_eq!(filter_by_date(text, &range), "2025-03-18 10:00:00 A\nhello");
//! # Ok(())
//! # }
//! ```

use chrono::NaiveDate;

use crate::core::date::extract_line_date;
use crate::core::range::DateRange;

/// Date context of the line being examined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateCursor(pub Option<NaiveDate>);

impl DateCursor {
    /// Advances the cursor past `line` and reports whether the line is kept.
    ///
    /// A marker line moves the cursor to its own date; any other line
    /// inherits the current one. The line is kept iff the resulting cursor
    /// exists and lies in `range`.
    pub fn step(self, line: &str, range: &DateRange) -> (Self, bool) {
        let cursor = match extract_line_date(line) {
            Some(date) => DateCursor(Some(date)),
            None => self,
        };
        let keep = cursor.0.is_some_and(|date| range.contains(date));
        (cursor, keep)
    }
}

/// Keeps only the lines whose effective date lies in `range`.
///
/// Surviving lines are returned verbatim, in their original order, joined
/// with `\n`.
pub fn filter_by_date(text: &str, range: &DateRange) -> String {
    let (_, kept) = text.split('\n').fold(
        (DateCursor::default(), Vec::new()),
        |(cursor, mut kept), line| {
            let (cursor, keep) = cursor.step(line, range);
            if keep {
                kept.push(line);
            }
            (cursor, kept)
        },
    );
    kept.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(d: u32) -> DateRange {
        DateRange::single(ymd(2025, 3, d))
    }

    #[test]
    fn test_step_marker_in_range() {
        let (cursor, keep) = DateCursor::default().step("2025-03-18 10:00:00 A", &day(18));
        assert_eq!(cursor, DateCursor(Some(ymd(2025, 3, 18))));
        assert!(keep);
    }

    #[test]
    fn test_step_marker_out_of_range_moves_cursor() {
        let start = DateCursor(Some(ymd(2025, 3, 18)));
        let (cursor, keep) = start.step("2025-03-19 09:00:00 B", &day(18));
        assert_eq!(cursor, DateCursor(Some(ymd(2025, 3, 19))));
        assert!(!keep);
    }

    #[test]
    fn test_step_continuation_inherits() {
        let start = DateCursor(Some(ymd(2025, 3, 18)));
        assert_eq!(start.step("hello", &day(18)), (start, true));
        assert_eq!(start.step("hello", &day(19)), (start, false));
    }

    #[test]
    fn test_step_without_cursor_drops() {
        let (cursor, keep) = DateCursor::default().step("preamble", &day(18));
        assert_eq!(cursor, DateCursor(None));
        assert!(!keep);
    }

    #[test]
    fn test_groups_straddling_boundaries() {
        let text = "\
2025-03-17 23:59:00 A
late night
2025-03-18 00:01:00 B
early
morning
2025-03-19 00:00:00 C
next day";
        assert_eq!(
            filter_by_date(text, &day(18)),
            "2025-03-18 00:01:00 B\nearly\nmorning"
        );
    }

    #[test]
    fn test_multi_day_range() {
        let text = "2025-03-17 x A\na\n2025-03-18 x B\nb\n2025-03-19 x C\nc\n2025-03-20 x D\nd";
        let range = DateRange::new(ymd(2025, 3, 18), ymd(2025, 3, 19));
        assert_eq!(
            filter_by_date(text, &range),
            "2025-03-18 x B\nb\n2025-03-19 x C\nc"
        );
    }

    #[test]
    fn test_blank_continuation_lines_are_kept_verbatim() {
        let text = "2025-03-18 10:00:00 A\n\n  indented\r\n";
        assert_eq!(filter_by_date(text, &day(18)), text);
    }

    #[test]
    fn test_reversed_range_keeps_nothing() {
        let text = "2025-03-18 10:00:00 A\nhello";
        let range = DateRange::new(ymd(2025, 3, 19), ymd(2025, 3, 17));
        assert_eq!(filter_by_date(text, &range), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(filter_by_date("", &day(18)), "");
    }
}
