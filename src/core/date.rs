//! `YYYY-MM-DD` date tokens in transcript text.
//!
//! Two extraction modes are provided:
//!
//! - [`extract_line_date`] is **anchored**: it only matches a token at the very
//!   start of a line and is used to classify date-marker lines.
//! - [`scan_dates`] / [`last_date`] **scan** a whole block and find every
//!   occurrence, wherever it appears.
//!
//! Tokens are converted to [`NaiveDate`], so calendar-impossible tokens such as
//! `2025-02-31` are not dates: an anchored line starting with one is treated as
//! a continuation line, and the scanner skips it.
//!
//! # Example
//!
//! ```
//! use chatdigest::core::date::{extract_line_date, last_date};
//! use chrono::NaiveDate;
//!
//! let d = NaiveDate::from_ymd_opt(2025, 3, 18).unwrap();
//! assert_eq!(extract_line_date("2025-03-18 10:08:26 Alice"), Some(d));
//! assert_eq!(extract_line_date("said on 2025-03-18"), None);
//! assert_eq!(last_date("from 2025-03-01 until 2025-03-18"), Some(d));
//! ```

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

static LINE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})").unwrap());

static ANY_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{4})-([0-9]{2})-([0-9]{2})").unwrap());

/// Returns the date a line starts with, if any.
pub fn extract_line_date(line: &str) -> Option<NaiveDate> {
    LINE_DATE.captures(line).and_then(|caps| to_date(&caps))
}

/// Returns `true` if the line is a date-marker line.
pub fn is_date_marker(line: &str) -> bool {
    extract_line_date(line).is_some()
}

/// Iterates over every valid date token in `text`, in order of appearance.
pub fn scan_dates(text: &str) -> impl Iterator<Item = NaiveDate> + '_ {
    ANY_DATE.captures_iter(text).filter_map(|caps| to_date(&caps))
}

/// Returns the last valid date token in `text`.
pub fn last_date(text: &str) -> Option<NaiveDate> {
    scan_dates(text).last()
}

fn to_date(caps: &Captures<'_>) -> Option<NaiveDate> {
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
