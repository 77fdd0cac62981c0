//! User-defined removal rules loaded from a rule file.
//!
//! # Rule file format
//!
//! ```text
//! # comments and blank lines are ignored
//! ADVERTISEMENT
//! \d+px
//! ```
//!
//! Each remaining line (trimmed) is one rule, applied in file order. A line
//! starting with a backslash is a regular expression; the backslash is part of
//! the pattern (`\d+px` matches `12px`). Every other line is a literal
//! substring. A pattern that does not compile is kept as a literal instead.
//!
//! Every match of every rule is deleted.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{ChatdigestError, Result};

/// Default rule file name, looked up relative to the working directory.
pub const DEFAULT_RULES_FILE: &str = "filter_keywords.txt";

/// Marks a rule line as a regular expression.
const PATTERN_MARKER: char = '\\';

/// A single removal rule, classified once when it is created.
#[derive(Debug, Clone)]
pub enum FilterRule {
    /// Exact substring; every occurrence is deleted.
    Literal(String),
    /// Regular expression; every match is deleted.
    Pattern(Regex),
}

impl FilterRule {
    /// Parses one rule-file line. Blank and `#` comment lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        if line.starts_with(PATTERN_MARKER) {
            Some(Self::pattern(line))
        } else {
            Some(Self::literal(line))
        }
    }

    /// Creates a literal rule.
    pub fn literal(text: impl Into<String>) -> Self {
        FilterRule::Literal(text.into())
    }

    /// Creates a pattern rule, degrading to a literal if `source` does not
    /// compile.
    pub fn pattern(source: &str) -> Self {
        match Regex::new(source) {
            Ok(regex) => FilterRule::Pattern(regex),
            Err(e) => {
                debug!(rule = source, error = %e, "rule is not a valid pattern, matching literally");
                FilterRule::Literal(source.to_string())
            }
        }
    }

    /// Returns the rule text as written.
    pub fn as_str(&self) -> &str {
        match self {
            FilterRule::Literal(text) => text,
            FilterRule::Pattern(regex) => regex.as_str(),
        }
    }

    /// Returns `true` for a compiled pattern rule.
    pub fn is_pattern(&self) -> bool {
        matches!(self, FilterRule::Pattern(_))
    }

    /// Deletes every match of this rule from `text`.
    pub fn apply(&self, text: &str) -> String {
        match self {
            FilterRule::Literal(needle) if needle.is_empty() => text.to_string(),
            FilterRule::Literal(needle) => text.replace(needle.as_str(), ""),
            FilterRule::Pattern(regex) => regex.replace_all(text, "").into_owned(),
        }
    }
}

impl PartialEq for FilterRule {
    fn eq(&self, other: &Self) -> bool {
        self.is_pattern() == other.is_pattern() && self.as_str() == other.as_str()
    }
}

impl fmt::Display for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered list of [`FilterRule`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterRules {
    rules: Vec<FilterRule>,
}

impl FilterRules {
    /// Creates an empty rule list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses rule-file content.
    ///
    /// # Example
    ///
    /// ```
    /// use chatdigest::core::FilterRules;
    ///
    /// let rules = FilterRules::parse("# sizes\n\\d+px\nADVERTISEMENT\n");
    /// assert_eq!(rules.len(), 2);
    /// assert_eq!(rules.apply("ADVERTISEMENT 12px banner"), "  banner");
    /// ```
    pub fn parse(content: &str) -> Self {
        content.lines().filter_map(FilterRule::parse).collect()
    }

    /// Loads rules from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatdigestError::MissingOptionalResource`] if the file does not
    /// exist, or [`ChatdigestError::Io`] if it cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ChatdigestError::missing_optional(path))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Loads rules from `path`, treating a missing file as an empty rule list.
    ///
    /// The missing file is logged as a warning.
    pub fn load_or_empty(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(e) if e.is_non_fatal() => {
                warn!("{e}; continuing without custom filter rules");
                Ok(Self::new())
            }
            other => other,
        }
    }

    /// Applies every rule in declaration order.
    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }

    pub fn push(&mut self, rule: FilterRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterRule> {
        self.rules.iter()
    }
}

impl FromIterator<FilterRule> for FilterRules {
    fn from_iter<I: IntoIterator<Item = FilterRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FilterRules {
    type Item = &'a FilterRule;
    type IntoIter = std::slice::Iter<'a, FilterRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
