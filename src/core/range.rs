//! Inclusive date windows and their resolution from user input.
//!
//! A range string takes one of two forms:
//!
//! | Input | Resolved range |
//! |-------|----------------|
//! | `2025-03-18` | `2025-03-18 ..= 2025-03-18` |
//! | `2025-03-18=2025-03-20` | `2025-03-18 ..= 2025-03-20` |
//! | *(empty)* | last date found in the transcript, or today |
//!
//! Reversed ranges (`start > end`) are accepted as written. They simply match
//! no lines.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::date::last_date;
use crate::error::{ChatdigestError, Result};

/// Separator between the start and end of a range string.
pub const RANGE_SEPARATOR: char = '=';

static STRICT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

/// An inclusive `[start, end]` calendar-date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range from explicit bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Creates a one-day range.
    pub fn single(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Returns `true` if `date` lies within the range, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns `true` if the range covers exactly one day.
    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `start > end`; such a range matches nothing.
    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }

    /// Parses an explicit range string (`YYYY-MM-DD` or `YYYY-MM-DD=YYYY-MM-DD`).
    ///
    /// Whitespace around either date is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ChatdigestError::InvalidDate`] if either side is not a valid
    /// `YYYY-MM-DD` date.
    ///
    /// # Example
    ///
    /// ```
    /// use chatdigest::core::DateRange;
    ///
    /// # fn main() -> chatdigest::Result<()> {
    /// let range = DateRange::parse(" 2025-03-18 = 2025-03-20 ")?;
    /// assert_eq!(range.to_string(), "2025-03-18=2025-03-20");
    /// assert!(DateRange::parse("2025/03/18").is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse(spec: &str) -> Result<Self> {
        match spec.split_once(RANGE_SEPARATOR) {
            Some((start, end)) => Ok(Self::new(parse_date(start)?, parse_date(end)?)),
            None => parse_date(spec).map(Self::single),
        }
    }

    /// Resolves the date window for one cleaning run, using the local date as
    /// "today".
    ///
    /// See [`resolve_at`](Self::resolve_at) for the rules.
    pub fn resolve(spec: Option<&str>, transcript: Option<&str>) -> Result<Self> {
        Self::resolve_at(spec, transcript, Local::now().date_naive())
    }

    /// Resolves the date window for one cleaning run.
    ///
    /// - A non-empty `spec` is parsed with [`parse`](Self::parse).
    /// - Otherwise the last date token appearing anywhere in `transcript` is
    ///   used for both bounds.
    /// - With no spec and no date in the transcript, both bounds are `today`.
    pub fn resolve_at(
        spec: Option<&str>,
        transcript: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self> {
        match spec.map(str::trim).filter(|s| !s.is_empty()) {
            Some(spec) => Self::parse(spec),
            None => Ok(Self::single(transcript.and_then(last_date).unwrap_or(today))),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_day() {
            write!(f, "{}", self.start.format("%Y-%m-%d"))
        } else {
            write!(
                f,
                "{}{}{}",
                self.start.format("%Y-%m-%d"),
                RANGE_SEPARATOR,
                self.end.format("%Y-%m-%d")
            )
        }
    }
}

impl std::str::FromStr for DateRange {
    type Err = ChatdigestError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parses a strict, zero-padded `YYYY-MM-DD` date.
fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if !STRICT_DATE.is_match(trimmed) {
        return Err(ChatdigestError::invalid_date(input));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| ChatdigestError::invalid_date(input))
}
