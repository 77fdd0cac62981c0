//! Summarization of cleaned transcripts by remote model providers.
//!
//! This module is only available with the `summarize` feature.
//!
//! - [`provider`] - [`Provider`] identities and built-in defaults
//! - [`client`] - the [`Summarizer`] trait and its HTTP implementation
//! - [`report`] - parallel fan-out and Markdown report files
//!
//! # Example
//!
//! ```rust,no_run
//! use chatdigest::config::ApiConfig;
//! use chatdigest::summarize::{HttpSummarizer, Prompts, Provider, generate_conclusion};
//! use std::path::Path;
//!
//! # fn main() -> chatdigest::Result<()> {
//! let api = ApiConfig::load(Path::new("api_keys.toml"))?;
//! let providers = [Provider::SiliconFlow, Provider::OpenAi];
//! api.ensure_keys(&providers)?;
//!
//! let summarizers = HttpSummarizer::from_config(&api, &providers, &Prompts::default());
//! generate_conclusion(
//!     Path::new("outputs/cleaned_chat_2025-03-18.txt"),
//!     Path::new("conclusion"),
//!     &summarizers,
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod provider;
pub mod report;

pub use client::{
    DEFAULT_PROMPT, DEFAULT_SYSTEM_PROMPT, HttpSummarizer, Prompts, Summarizer,
};
pub use provider::Provider;
pub use report::{
    Conclusion, DEFAULT_CONCLUSION_DIR, DEFAULT_SUMMARY_INPUT_DIR, ProviderOutcome,
    cleaned_files, generate_conclusion, original_name, process_all, render_report,
    summarize_all,
};
