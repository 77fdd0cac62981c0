//! Configuration types for cleaning and summarization.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`CleanConfig`] - date window, rule file and output location for a
//!   cleaning run
//! - [`ApiConfig`] - endpoints, keys and models of the summary providers
//!   (feature `summarize`)
//!
//! # Example
//!
//! ```rust
//! use chatdigest::config::CleanConfig;
//!
//! let config = CleanConfig::new()
//!     .with_date_range("2025-03-18=2025-03-20")
//!     .with_rules_path("my_rules.txt");
//! assert_eq!(config.date_range.as_deref(), Some("2025-03-18=2025-03-20"));
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::rules::DEFAULT_RULES_FILE;

/// Configuration for one cleaning run (single file or batch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanConfig {
    /// `YYYY-MM-DD` or `YYYY-MM-DD=YYYY-MM-DD`; `None` uses the transcript's
    /// last date (default: None)
    pub date_range: Option<String>,

    /// Rule file with extra removal rules (default: `filter_keywords.txt`)
    pub rules_path: PathBuf,

    /// Explicit output file; ignored in batch mode (default: None)
    pub output: Option<PathBuf>,

    /// Directory for derived output paths (default: `<input dir>/../outputs`)
    pub output_dir: Option<PathBuf>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            date_range: None,
            rules_path: PathBuf::from(DEFAULT_RULES_FILE),
            output: None,
            output_dir: None,
        }
    }
}

impl CleanConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the date range string.
    #[must_use]
    pub fn with_date_range(mut self, range: impl Into<String>) -> Self {
        self.date_range = Some(range.into());
        self
    }

    /// Sets the rule file path.
    #[must_use]
    pub fn with_rules_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rules_path = path.into();
        self
    }

    /// Sets an explicit output file.
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Sets the directory used for derived output paths.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

#[cfg(feature = "summarize")]
pub use api::{ApiConfig, DEFAULT_API_CONFIG_FILE, ProviderConfig};

#[cfg(feature = "summarize")]
mod api {
    use std::collections::BTreeMap;
    use std::fs;
    use std::io;
    use std::path::Path;

    use serde::{Deserialize, Serialize};

    use crate::error::{ChatdigestError, Result};
    use crate::summarize::Provider;

    /// Default provider configuration file.
    pub const DEFAULT_API_CONFIG_FILE: &str = "api_keys.toml";

    /// Endpoint, key and model for one provider.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ProviderConfig {
        pub api_url: String,
        pub api_key: String,
        pub model: String,
    }

    impl ProviderConfig {
        /// Built-in defaults for `provider`, without a key.
        pub fn defaults(provider: Provider) -> Self {
            Self {
                api_url: provider.default_url().to_string(),
                api_key: String::new(),
                model: provider.default_model().to_string(),
            }
        }

        pub fn has_key(&self) -> bool {
            !self.api_key.trim().is_empty()
        }
    }

    /// A provider table as written in the config file; every field optional.
    #[derive(Debug, Default, Deserialize)]
    struct ProviderTable {
        api_url: Option<String>,
        api_key: Option<String>,
        model: Option<String>,
    }

    /// Settings for every supported provider.
    ///
    /// # File format
    ///
    /// ```toml
    /// [siliconflow]
    /// api_key = "sk-..."
    /// model = "Qwen/Qwen2.5-7B-Instruct"
    ///
    /// [openai]
    /// api_url = "https://api.openai.com/v1/chat/completions"
    /// ```
    ///
    /// Missing tables and fields fall back to built-in defaults. An empty key
    /// is taken from `<PROVIDER>_API_KEY` in the environment.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ApiConfig {
        providers: BTreeMap<Provider, ProviderConfig>,
    }

    impl Default for ApiConfig {
        fn default() -> Self {
            Self {
                providers: Provider::all()
                    .iter()
                    .map(|&p| (p, ProviderConfig::defaults(p)))
                    .collect(),
            }
        }
    }

    impl ApiConfig {
        /// Loads `path`, filling empty keys from the process environment.
        ///
        /// A missing file yields the defaults plus environment keys.
        pub fn load(path: &Path) -> Result<Self> {
            Self::load_with_env(path, |name| std::env::var(name).ok())
        }

        /// Loads `path`, resolving empty keys with `env`.
        pub fn load_with_env(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
                Err(e) => return Err(e.into()),
            };
            Self::parse(&content, env).map_err(|e| ChatdigestError::config(path, e.to_string()))
        }

        /// Parses TOML config content, resolving empty keys with `env`.
        pub fn parse(
            content: &str,
            env: impl Fn(&str) -> Option<String>,
        ) -> std::result::Result<Self, toml::de::Error> {
            let mut tables: BTreeMap<String, ProviderTable> = toml::from_str(content)?;
            let providers = Provider::all()
                .iter()
                .map(|&provider| {
                    let table = tables.remove(provider.name()).unwrap_or_default();
                    let defaults = ProviderConfig::defaults(provider);
                    let api_key = table
                        .api_key
                        .filter(|k| !k.trim().is_empty())
                        .or_else(|| env(provider.env_var()))
                        .unwrap_or_default();
                    let config = ProviderConfig {
                        api_url: table.api_url.unwrap_or(defaults.api_url),
                        api_key,
                        model: table
                            .model
                            .filter(|m| !m.trim().is_empty())
                            .unwrap_or(defaults.model),
                    };
                    (provider, config)
                })
                .collect();
            Ok(Self { providers })
        }

        /// Returns the settings for `provider`.
        pub fn get(&self, provider: Provider) -> &ProviderConfig {
            &self.providers[&provider]
        }

        /// Overrides the model used for `provider`.
        pub fn set_model(&mut self, provider: Provider, model: impl Into<String>) {
            if let Some(config) = self.providers.get_mut(&provider) {
                config.model = model.into();
            }
        }

        /// Returns the providers in `selected` that have no key.
        pub fn missing_keys(&self, selected: &[Provider]) -> Vec<Provider> {
            selected
                .iter()
                .copied()
                .filter(|&p| !self.get(p).has_key())
                .collect()
        }

        /// Fails with [`ChatdigestError::MissingApiKeys`] unless every provider
        /// in `selected` has a key.
        pub fn ensure_keys(&self, selected: &[Provider]) -> Result<()> {
            let missing = self.missing_keys(selected);
            if missing.is_empty() {
                Ok(())
            } else {
                Err(ChatdigestError::MissingApiKeys {
                    providers: missing.iter().map(|p| p.name().to_string()).collect(),
                })
            }
        }
    }
}
