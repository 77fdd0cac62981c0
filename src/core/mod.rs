//! Core cleaning logic for chatdigest.
//!
//! This module contains:
//! - [`date`] - Date tokens in transcript lines
//! - [`range`] - [`DateRange`] parsing and resolution
//! - [`window`] - Restricting a transcript to a date window
//! - [`rules`] - User removal rules from a rule file
//! - [`normalize`] - The fixed noise-removal pipeline
//! - [`processor`] - File and batch cleaning with statistics
//!
//! # Quick Start
//!
//! ```rust
//! use chatdigest::core::{DateRange, FilterRules, filter_by_date, normalize};
//!
//! # fn main() -> chatdigest::Result<()> {
//! let text = "2025-03-18 10:08:26 Alice\n(10001)Hello[图片]";
//! let range = DateRange::parse("2025-03-18")?;
//! let cleaned = normalize(&filter_by_date(text, &range), &FilterRules::new());
//! assert_eq!(cleaned, "Hello");
//! # Ok(())
//! # }
//! ```

pub mod date;
pub mod normalize;
pub mod processor;
pub mod range;
pub mod rules;
pub mod window;

// Re-export main types for convenience
pub use date::{extract_line_date, is_date_marker, last_date};
pub use normalize::{PIPELINE, Step, normalize, run_steps};
pub use processor::{
    BatchReport, CleanReport, CleanStats, Cleaned, CleanedTranscript, clean_directory,
    clean_file, clean_text, clean_with_range, derive_output_path,
};
pub use range::DateRange;
pub use rules::{FilterRule, FilterRules};
pub use window::{DateCursor, filter_by_date};
