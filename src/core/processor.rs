//! File-level cleaning: read a transcript, clean it, write the result.
//!
//! The in-memory pipeline is [`clean_text`]: resolve the date window, keep the
//! message groups inside it, then [`normalize`]. [`clean_file`] and
//! [`clean_directory`] wrap it with I/O and output-path conventions.
//!
//! # Output paths
//!
//! Without an explicit output, `inputs/chat.txt` cleaned for 2025-03-18 is
//! written to `inputs/../outputs/cleaned_chat_2025-03-18.txt`; a multi-day
//! window gives `cleaned_chat_2025-03-18=2025-03-20.txt`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::CleanConfig;
use crate::core::normalize::normalize;
use crate::core::range::DateRange;
use crate::core::rules::FilterRules;
use crate::core::window::filter_by_date;
use crate::error::{ChatdigestError, Result};

/// File name prefix of cleaned transcripts.
pub const CLEANED_PREFIX: &str = "cleaned_";

/// Default batch input directory.
pub const DEFAULT_INPUT_DIR: &str = "inputs";

/// Name of the derived output directory, a sibling of the input directory.
pub const OUTPUT_DIR_NAME: &str = "outputs";

/// Extension of transcripts picked up in batch mode.
const TRANSCRIPT_EXTENSION: &str = "txt";

/// Line counts before and after cleaning, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanStats {
    pub original_lines: usize,
    pub cleaned_lines: usize,
}

impl CleanStats {
    /// Counts lines in the raw and cleaned text.
    pub fn from_texts(original: &str, cleaned: &str) -> Self {
        Self {
            original_lines: count_lines(original),
            cleaned_lines: count_lines(cleaned),
        }
    }

    pub fn removed_lines(&self) -> usize {
        self.original_lines.saturating_sub(self.cleaned_lines)
    }

    /// Share of lines removed, in percent.
    pub fn reduction_percent(&self) -> f64 {
        if self.original_lines == 0 {
            return 0.0;
        }
        self.removed_lines() as f64 / self.original_lines as f64 * 100.0
    }
}

/// Number of `\n`-separated lines; an empty text counts as one line.
pub fn count_lines(text: &str) -> usize {
    text.matches('\n').count() + 1
}

/// Result of cleaning a text in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Cleaned {
    pub text: String,
    pub range: DateRange,
    pub stats: CleanStats,
}

/// A cleaned transcript as handed to the summarization stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedTranscript {
    /// Output file name without the `cleaned_` prefix and extension,
    /// e.g. `chat_2025-03-18`
    pub base_name: String,
    pub text: String,
}

/// Outcome of cleaning one file.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub range: DateRange,
    pub stats: CleanStats,
    pub rule_count: usize,
    pub transcript: CleanedTranscript,
}

/// Outcome of a batch run. Per-item failures never abort the batch.
#[derive(Debug, Default)]
pub struct BatchReport<T> {
    pub completed: Vec<T>,
    pub failures: Vec<(PathBuf, ChatdigestError)>,
}

impl<T> BatchReport<T> {
    pub fn new() -> Self {
        Self {
            completed: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.completed.len()
    }

    pub fn total(&self) -> usize {
        self.completed.len() + self.failures.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Cleans `text` for the window described by `range_spec`.
///
/// # Errors
///
/// Returns [`ChatdigestError::InvalidDate`] if `range_spec` is malformed.
///
/// # Example
///
/// ```
/// use chatdigest::core::{FilterRules, clean_text};
///
/// # fn main() -> chatdigest::Result<()> {
/// let text = "\
/// 2025-03-18 10:08:26 Alice
/// (10001)Hello[图片] @Bob hi
/// 2025-03-19 09:00:00 Bob
/// (10002)Good morning";
///
/// let cleaned = clean_text(text, Some("2025-03-18=2025-03-18"), &FilterRules::new())?;
/// assert_eq!(cleaned.text, "Hello hi");
/// assert_eq!(cleaned.stats.original_lines, 4);
/// # Ok(())
/// # }
/// ```
pub fn clean_text(text: &str, range_spec: Option<&str>, rules: &FilterRules) -> Result<Cleaned> {
    let range = DateRange::resolve(range_spec, Some(text))?;
    Ok(clean_with_range(text, &range, rules))
}

/// Cleans `text` for an already resolved window.
pub fn clean_with_range(text: &str, range: &DateRange, rules: &FilterRules) -> Cleaned {
    let windowed = filter_by_date(text, range);
    debug!(%range, kept_bytes = windowed.len(), total_bytes = text.len(), "date window applied");
    let cleaned = normalize(&windowed, rules);
    Cleaned {
        stats: CleanStats::from_texts(text, &cleaned),
        text: cleaned,
        range: *range,
    }
}

/// Cleans one transcript file and writes the result.
///
/// The rule file named in `config` is optional; when it is missing a warning
/// is logged and no custom rules are applied.
///
/// # Errors
///
/// - [`ChatdigestError::NotFound`] if `input` does not exist
/// - [`ChatdigestError::InvalidDate`] if the configured range is malformed
/// - [`ChatdigestError::Io`] on read/write failures
pub fn clean_file(input: &Path, config: &CleanConfig) -> Result<CleanReport> {
    let rules = FilterRules::load_or_empty(&config.rules_path)?;
    clean_file_with_rules(input, config, &rules)
}

/// Cleans one transcript file with preloaded rules.
pub fn clean_file_with_rules(
    input: &Path,
    config: &CleanConfig,
    rules: &FilterRules,
) -> Result<CleanReport> {
    if !input.exists() {
        return Err(ChatdigestError::not_found(input));
    }
    let content = fs::read_to_string(input)?.replace("\r\n", "\n");
    let range = DateRange::resolve(config.date_range.as_deref(), Some(content.as_str()))?;
    let cleaned = clean_with_range(&content, &range, rules);

    let output = match &config.output {
        Some(path) => path.clone(),
        None => derive_output_path(input, &range, config.output_dir.as_deref()),
    };
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output, &cleaned.text)?;
    info!(input = %input.display(), output = %output.display(), "cleaned transcript written");

    Ok(CleanReport {
        input: input.to_path_buf(),
        transcript: CleanedTranscript {
            base_name: base_name(&output),
            text: cleaned.text,
        },
        output,
        range,
        stats: cleaned.stats,
        rule_count: rules.len(),
    })
}

/// Cleans every transcript in `dir`.
///
/// Picks up `*.txt` files whose names do not start with `cleaned_`, in name
/// order. Failures are recorded in the report and logged; an explicit output
/// path in `config` is ignored. A missing directory yields an empty report.
///
/// # Errors
///
/// Returns an error only if the rule file or the directory listing cannot be
/// read.
pub fn clean_directory(dir: &Path, config: &CleanConfig) -> Result<BatchReport<CleanReport>> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "input directory does not exist");
        return Ok(BatchReport::new());
    }

    let rules = FilterRules::load_or_empty(&config.rules_path)?;
    let config = CleanConfig {
        output: None,
        ..config.clone()
    };

    let mut report = BatchReport::new();
    for path in transcript_files(dir)? {
        match clean_file_with_rules(&path, &config, &rules) {
            Ok(done) => report.completed.push(done),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "failed to clean transcript");
                report.failures.push((path, e));
            }
        }
    }
    Ok(report)
}

/// Lists batch-mode transcripts in `dir`, sorted by name.
pub fn transcript_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let is_transcript = path
            .extension()
            .is_some_and(|ext| ext == TRANSCRIPT_EXTENSION);
        if path.is_file() && is_transcript && !name.starts_with(CLEANED_PREFIX) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Default output path for `input` cleaned over `range`.
///
/// `output_dir` defaults to the `outputs` directory next to the input's
/// directory.
pub fn derive_output_path(input: &Path, range: &DateRange, output_dir: Option<&Path>) -> PathBuf {
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => {
            let parent = input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            parent.join("..").join(OUTPUT_DIR_NAME)
        }
    };

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let extension = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    dir.join(format!(
        "{CLEANED_PREFIX}{stem}_{}{extension}",
        date_suffix(range)
    ))
}

/// `YYYY-MM-DD` for a one-day range, `YYYY-MM-DD=YYYY-MM-DD` otherwise.
pub fn date_suffix(range: &DateRange) -> String {
    range.to_string()
}

/// File name of `path` without the `cleaned_` prefix and the extension.
///
/// ```
/// use chatdigest::core::processor::base_name;
/// use std::path::Path;
///
/// assert_eq!(base_name(Path::new("outputs/cleaned_chat_2025-03-18.txt")), "chat_2025-03-18");
/// assert_eq!(base_name(Path::new("notes.md")), "notes");
/// ```
pub fn base_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.strip_prefix(CLEANED_PREFIX) {
        Some(rest) => rest.to_string(),
        None => stem,
    }
}
