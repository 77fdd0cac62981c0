//! Remote model providers.

use serde::{Deserialize, Serialize};

/// A remote model provider that can summarize a transcript.
///
/// # Example
///
/// ```rust
/// use chatdigest::summarize::Provider;
/// use std::str::FromStr;
///
/// let provider = Provider::from_str("openai").unwrap();
/// assert_eq!(provider, Provider::OpenAi);
/// assert_eq!(provider.env_var(), "OPENAI_API_KEY");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// SiliconFlow, OpenAI-compatible chat completions
    #[serde(alias = "sf")]
    SiliconFlow,

    /// OpenAI chat completions
    OpenAi,

    /// Anthropic messages API
    #[serde(alias = "claude")]
    Anthropic,
}

impl Provider {
    /// Returns all providers, in the order used for reports.
    pub fn all() -> &'static [Provider] {
        &[Provider::SiliconFlow, Provider::OpenAi, Provider::Anthropic]
    }

    /// Returns all accepted names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &["siliconflow", "sf", "openai", "anthropic", "claude"]
    }

    /// Lowercase identifier used in config tables and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Provider::SiliconFlow => "siliconflow",
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
        }
    }

    /// Environment variable consulted when the config has no key.
    pub fn env_var(self) -> &'static str {
        match self {
            Provider::SiliconFlow => "SILICONFLOW_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn default_url(self) -> &'static str {
        match self {
            Provider::SiliconFlow => "https://api.siliconflow.cn/v1/chat/completions",
            Provider::OpenAi => "https://api.openai.com/v1/chat/completions",
            Provider::Anthropic => "https://api.anthropic.com/v1/messages",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::SiliconFlow => "deepseek-ai/DeepSeek-R1-Distill-Qwen-7B",
            Provider::OpenAi => "gpt-3.5-turbo",
            Provider::Anthropic => "claude-3-sonnet-20240229",
        }
    }

    /// Returns `true` if the provider speaks the OpenAI chat completions API.
    pub fn is_openai_compatible(self) -> bool {
        matches!(self, Provider::SiliconFlow | Provider::OpenAi)
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::SiliconFlow => write!(f, "SiliconFlow"),
            Provider::OpenAi => write!(f, "OpenAI"),
            Provider::Anthropic => write!(f, "Anthropic"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "siliconflow" | "sf" => Ok(Provider::SiliconFlow),
            "openai" => Ok(Provider::OpenAi),
            "anthropic" | "claude" => Ok(Provider::Anthropic),
            _ => Err(format!(
                "Unknown provider: '{}'. Expected one of: {}",
                s,
                Provider::all_names().join(", ")
            )),
        }
    }
}

// Conversion from CLI ApiSource to Provider (only with cli feature)
#[cfg(feature = "cli")]
impl From<crate::cli::ApiSource> for Provider {
    fn from(source: crate::cli::ApiSource) -> Self {
        match source {
            crate::cli::ApiSource::SiliconFlow => Provider::SiliconFlow,
            crate::cli::ApiSource::OpenAi => Provider::OpenAi,
            crate::cli::ApiSource::Anthropic => Provider::Anthropic,
        }
    }
}
