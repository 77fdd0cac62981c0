//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`CleanArgs`] - arguments of the `chatdigest` cleaning tool
//! - [`SummarizeArgs`] - arguments of the `chatdigest-summarize` tool
//!   (feature `summarize`)
//! - [`ApiSource`] - provider names accepted on the command line
//! - [`init_tracing`] - stderr log output shared by both binaries
//!
//! # Turning arguments into library configuration
//!
//! ```rust
//! use chatdigest::cli::CleanArgs;
//! use clap::Parser;
//!
//! let args = CleanArgs::parse_from(["chatdigest", "-f", "inputs/chat.txt", "-t", "2025-03-18"]);
//! let config = args.to_config();
//! assert_eq!(config.date_range.as_deref(), Some("2025-03-18"));
//! ```

use std::path::PathBuf;

use clap::Parser;
#[cfg(feature = "summarize")]
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

use crate::config::CleanConfig;
use crate::core::processor::DEFAULT_INPUT_DIR;
use crate::core::rules::DEFAULT_RULES_FILE;

/// Clean exported QQ chat transcripts: keep one day (or a span of days) and
/// strip timestamps, ids, mentions, images and stickers.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatdigest")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatdigest                                   # every *.txt in inputs/, last day
    chatdigest -f inputs/group.txt -t 2025-03-18
    chatdigest -f group.txt -t 2025-03-18=2025-03-20 -o digest.txt
    chatdigest -d exports/ -k my_rules.txt -v")]
pub struct CleanArgs {
    /// Transcript to clean
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Directory of transcripts to clean (used when no file is given)
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_INPUT_DIR)]
    pub directory: PathBuf,

    /// Output file (single-file mode only)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Rule file with extra text to remove
    #[arg(short = 'k', long = "keywords", value_name = "PATH", default_value = DEFAULT_RULES_FILE)]
    pub keywords: PathBuf,

    /// Date or date range to keep: YYYY-MM-DD or YYYY-MM-DD=YYYY-MM-DD
    /// (default: last date in the transcript)
    #[arg(short = 't', long = "date", value_name = "RANGE")]
    pub date: Option<String>,
}

impl CleanArgs {
    /// Library configuration for these arguments.
    pub fn to_config(&self) -> CleanConfig {
        let mut config = CleanConfig::new().with_rules_path(&self.keywords);
        if let Some(date) = &self.date {
            config = config.with_date_range(date.as_str());
        }
        if let Some(output) = &self.output {
            config = config.with_output(output);
        }
        config
    }
}

#[cfg(feature = "summarize")]
pub use summarize_args::{ApiSource, SummarizeArgs};

#[cfg(feature = "summarize")]
mod summarize_args {
    use super::{Parser, PathBuf, ValueEnum};
    use serde::{Deserialize, Serialize};

    use crate::config::DEFAULT_API_CONFIG_FILE;
    use crate::summarize::{DEFAULT_CONCLUSION_DIR, DEFAULT_SUMMARY_INPUT_DIR, Prompts, Provider};

    /// Summarize cleaned chat transcripts with one or more LLM providers.
    #[derive(Parser, Debug, Clone)]
    #[command(name = "chatdigest-summarize")]
    #[command(version, about, long_about = None)]
    #[command(after_help = "EXAMPLES:
    chatdigest-summarize                                  # every cleaned_* in outputs/
    chatdigest-summarize -f outputs/cleaned_group_2025-03-18.txt
    chatdigest-summarize -a siliconflow openai anthropic
    chatdigest-summarize -m Qwen/Qwen2.5-7B-Instruct -c keys.toml

API keys are read from api_keys.toml or SILICONFLOW_API_KEY,
OPENAI_API_KEY and ANTHROPIC_API_KEY.")]
    pub struct SummarizeArgs {
        /// Cleaned transcript to summarize
        #[arg(short, long, value_name = "PATH")]
        pub file: Option<PathBuf>,

        /// Directory of cleaned transcripts (used when no file is given)
        #[arg(short = 'd', long, value_name = "DIR", default_value = DEFAULT_SUMMARY_INPUT_DIR)]
        pub input_dir: PathBuf,

        /// Directory for summary reports
        #[arg(short = 'o', long, value_name = "DIR", default_value = DEFAULT_CONCLUSION_DIR)]
        pub output_dir: PathBuf,

        /// Providers to ask, in report order
        #[arg(short = 'a', long = "api", value_enum, num_args = 1.., default_values_t = [ApiSource::SiliconFlow])]
        pub api: Vec<ApiSource>,

        /// Instruction placed before the transcript
        #[arg(short, long)]
        pub prompt: Option<String>,

        /// System prompt sent to every provider
        #[arg(short, long)]
        pub system_prompt: Option<String>,

        /// SiliconFlow model override
        #[arg(short, long)]
        pub model: Option<String>,

        /// Provider configuration file
        #[arg(short, long, value_name = "PATH", default_value = DEFAULT_API_CONFIG_FILE)]
        pub config: PathBuf,

        /// Show debug logging on stderr
        #[arg(short, long)]
        pub verbose: bool,
    }

    impl SummarizeArgs {
        /// Selected providers, first occurrence wins.
        pub fn providers(&self) -> Vec<Provider> {
            let mut providers: Vec<Provider> = Vec::new();
            for source in &self.api {
                let provider = Provider::from(*source);
                if !providers.contains(&provider) {
                    providers.push(provider);
                }
            }
            providers
        }

        /// Prompts with any command-line overrides applied.
        pub fn prompts(&self) -> Prompts {
            let mut prompts = Prompts::default();
            if let Some(system) = &self.system_prompt {
                prompts = prompts.with_system(system.as_str());
            }
            if let Some(user) = &self.prompt {
                prompts = prompts.with_user(user.as_str());
            }
            prompts
        }
    }

    /// Provider names accepted by `--api`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum ApiSource {
        /// SiliconFlow (OpenAI-compatible)
        #[value(name = "siliconflow", alias = "sf")]
        #[serde(alias = "sf")]
        SiliconFlow,

        /// OpenAI
        #[value(name = "openai")]
        OpenAi,

        /// Anthropic Claude
        #[value(alias = "claude")]
        #[serde(alias = "claude")]
        Anthropic,
    }

    impl std::fmt::Display for ApiSource {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", Provider::from(*self))
        }
    }
}

/// Installs the stderr log subscriber used by the binaries.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output for this crate with `verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "chatdigest=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
