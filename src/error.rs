//! Unified error types for chatdigest.
//!
//! This module provides a single [`ChatdigestError`] enum that covers all error
//! cases in the library, from reading transcripts to calling remote model
//! providers.
//!
//! # Fatal and non-fatal errors
//!
//! Most variants abort the operation that produced them. The exception is
//! [`ChatdigestError::MissingOptionalResource`]: callers are expected to log it
//! as a warning and continue with defaults (see
//! [`is_non_fatal`](ChatdigestError::is_non_fatal)).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatdigest operations.
///
/// # Example
///
/// ```rust
/// use chatdigest::error::Result;
/// use chatdigest::core::DateRange;
///
/// fn my_function() -> Result<DateRange> {
///     DateRange::parse("2025-03-18")
/// }
/// # assert!(my_function().is_ok());
/// ```
pub type Result<T> = std::result::Result<T, ChatdigestError>;

/// The error type for all chatdigest operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatdigestError {
    /// An I/O error occurred while reading or writing a file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A required input file or directory does not exist.
    #[error("Input not found: {}", path.display())]
    NotFound {
        /// The path that was looked up
        path: PathBuf,
    },

    /// A date or date range string could not be parsed.
    ///
    /// Ranges expect `YYYY-MM-DD` or `YYYY-MM-DD=YYYY-MM-DD`.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// An optional resource (such as the rule file) is absent.
    ///
    /// Never fatal: processing continues with defaults.
    #[error("Optional resource not found: {}", path.display())]
    MissingOptionalResource {
        /// The path that was looked up
        path: PathBuf,
    },

    /// The provider configuration file could not be read or parsed.
    #[error("Invalid config {}: {message}", path.display())]
    Config {
        /// The configuration file
        path: PathBuf,
        /// Description of what's wrong
        message: String,
    },

    /// One or more selected providers have no API key configured.
    #[error("No API key configured for: {}", providers.join(", "))]
    MissingApiKeys {
        /// Names of the providers without a key
        providers: Vec<String>,
    },

    /// A remote model provider call failed.
    #[error("{provider} request failed: {message}")]
    Provider {
        /// Provider display name
        provider: String,
        /// Status code, server message or transport error
        message: String,
    },

    /// Every provider failed for a transcript, so no report was written.
    #[error("No provider returned a summary for {}", path.display())]
    NoSummary {
        /// The transcript that was summarized
        path: PathBuf,
    },

    /// JSON serialization error.
    #[cfg(feature = "summarize")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatdigestError {
    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatdigestError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD or YYYY-MM-DD=YYYY-MM-DD",
        }
    }

    /// Creates a not-found error for a required input.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ChatdigestError::NotFound { path: path.into() }
    }

    /// Creates a missing optional resource error.
    pub fn missing_optional(path: impl Into<PathBuf>) -> Self {
        ChatdigestError::MissingOptionalResource { path: path.into() }
    }

    /// Creates a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ChatdigestError::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a provider call error.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        ChatdigestError::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatdigestError::Io(_))
    }

    /// Returns `true` if a required input was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ChatdigestError::NotFound { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatdigestError::InvalidDate { .. })
    }

    /// Returns `true` if this is a provider call error.
    pub fn is_provider(&self) -> bool {
        matches!(self, ChatdigestError::Provider { .. })
    }

    /// Returns `true` if processing may continue after logging this error.
    pub fn is_non_fatal(&self) -> bool {
        matches!(self, ChatdigestError::MissingOptionalResource { .. })
    }
}
