//! # Chatdigest
//!
//! A Rust library for cleaning exported QQ group chat transcripts and
//! summarizing them with large language models.
//!
//! ## Overview
//!
//! A QQ text export is a header followed by messages, each a
//! `YYYY-MM-DD HH:MM:SS <sender>(<id>)` line and the lines of its body.
//! Chatdigest turns that into compact prose for a chosen day or span of
//! days:
//!
//! 1. **Date window** - keep only message groups whose date lies in an
//!    inclusive range (by default the last date in the transcript)
//! 2. **Normalization** - drop the export header, timestamp lines,
//!    numeric ids, mentions, image placeholders and sticker markup
//! 3. **Custom rules** - delete user-supplied literals or patterns from a
//!    rule file
//! 4. **Summaries** (feature `summarize`) - send the cleaned text to one or
//!    more providers in parallel and collect a Markdown report
//!
//! ## Quick Start
//!
//! ```rust
//! use chatdigest::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let transcript = "\
//! 2025-03-18 10:08:26 Alice
//! (10001)Hello[图片] @Bob hi
//! 2025-03-19 09:00:00 Bob
//! (10002)Good morning";
//!
//!     let rules = FilterRules::parse("# no custom rules yet\n");
//!     let cleaned = clean_text(transcript, Some("2025-03-18"), &rules)?;
//!
//!     assert_eq!(cleaned.text, "Hello hi");
//!     Ok(())
//! }
//! ```
//!
//! ## Files and Batches
//!
//! ```rust,no_run
//! use chatdigest::config::CleanConfig;
//! use chatdigest::core::{clean_directory, clean_file};
//! use std::path::Path;
//!
//! # fn main() -> chatdigest::Result<()> {
//! // inputs/chat.txt -> outputs/cleaned_chat_2025-03-18.txt
//! let config = CleanConfig::new().with_date_range("2025-03-18");
//! let report = clean_file(Path::new("inputs/chat.txt"), &config)?;
//! println!("{} -> {}", report.input.display(), report.output.display());
//!
//! // Every *.txt in inputs/, failures collected rather than raised
//! let batch = clean_directory(Path::new("inputs"), &CleanConfig::new())?;
//! println!("{}/{} cleaned", batch.succeeded(), batch.total());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`core`] - The cleaning pipeline
//!   - [`core::range`] - [`DateRange`](core::DateRange) parsing and defaults
//!   - [`core::window`] - [`filter_by_date`](core::filter_by_date)
//!   - [`core::rules`] - [`FilterRules`](core::FilterRules) from a rule file
//!   - [`core::normalize`] - [`normalize`](core::normalize()) and its steps
//!   - [`core::processor`] - [`clean_file`](core::clean_file),
//!     [`clean_directory`](core::clean_directory)
//! - [`config`] - [`CleanConfig`](config::CleanConfig) and provider settings
//! - `summarize` - Provider clients and reports (feature `summarize`)
//! - `cli` - Argument definitions for the binaries (feature `cli`)
//! - [`error`] - Unified error types ([`ChatdigestError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
#[cfg(feature = "summarize")]
pub mod summarize;

// Re-export the main types at the crate root for convenience
pub use error::{ChatdigestError, Result};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatdigest::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{ChatdigestError, Result};

    // Configuration
    pub use crate::config::CleanConfig;
    #[cfg(feature = "summarize")]
    pub use crate::config::{ApiConfig, ProviderConfig};

    // Dates and windows
    pub use crate::core::range::DateRange;
    pub use crate::core::window::filter_by_date;

    // Rules and normalization
    pub use crate::core::normalize::{Step, normalize};
    pub use crate::core::rules::{FilterRule, FilterRules};

    // Processing
    pub use crate::core::processor::{
        BatchReport, CleanReport, CleanStats, CleanedTranscript, clean_directory, clean_file,
        clean_text,
    };

    // Summaries
    #[cfg(feature = "summarize")]
    pub use crate::summarize::{
        HttpSummarizer, Prompts, Provider, Summarizer, generate_conclusion, process_all,
    };
}
