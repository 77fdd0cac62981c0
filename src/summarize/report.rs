//! Fan a transcript out to several providers and write the Markdown report.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};

use crate::core::processor::{BatchReport, CLEANED_PREFIX, base_name};
use crate::error::{ChatdigestError, Result};
use crate::summarize::client::Summarizer;
use crate::summarize::provider::Provider;

/// Default directory holding cleaned transcripts.
pub const DEFAULT_SUMMARY_INPUT_DIR: &str = "outputs";

/// Default directory for summary reports.
pub const DEFAULT_CONCLUSION_DIR: &str = "conclusion";

/// File name prefix of summary reports.
pub const CONCLUSION_PREFIX: &str = "conclusion_";

const REPORT_TITLE: &str = "# QQ chat summary";

/// Outcome of one provider call.
pub type ProviderOutcome = (Provider, Result<String>);

/// Outcome of summarizing one transcript.
#[derive(Debug)]
pub struct Conclusion {
    pub input: PathBuf,
    pub output: PathBuf,
    pub succeeded: Vec<Provider>,
    pub failed: Vec<(Provider, ChatdigestError)>,
}

/// Sends `transcript` to every summarizer at once.
///
/// Each call runs on its own scoped thread; a failing provider does not stop
/// the others. Outcomes are returned in the order of `summarizers`.
pub fn summarize_all(summarizers: &[Box<dyn Summarizer>], transcript: &str) -> Vec<ProviderOutcome> {
    thread::scope(|scope| {
        let handles: Vec<_> = summarizers
            .iter()
            .map(|s| (s.provider(), scope.spawn(move || s.summarize(transcript))))
            .collect();

        handles
            .into_iter()
            .map(|(provider, handle)| {
                let outcome = handle.join().unwrap_or_else(|_| {
                    Err(ChatdigestError::provider(provider.to_string(), "worker thread panicked"))
                });
                match &outcome {
                    Ok(summary) => info!(%provider, chars = summary.chars().count(), "summary received"),
                    Err(e) => warn!(%provider, error = %e, "provider failed"),
                }
                (provider, outcome)
            })
            .collect()
    })
}

/// Name of a cleaned transcript without `cleaned_` and the extension.
///
/// The date suffix is kept: `cleaned_chat_2025-03-18.txt` gives
/// `chat_2025-03-18`.
pub fn original_name(cleaned_file_name: &str) -> String {
    base_name(Path::new(cleaned_file_name))
}

/// Renders the Markdown report for `file_name`.
///
/// Only successful providers get a section, in the order of `results`.
pub fn render_report(
    file_name: &str,
    results: &[ProviderOutcome],
    generated_at: NaiveDateTime,
) -> String {
    let mut report = format!(
        "{REPORT_TITLE}\n\n*Generated: {}*\n\n*Source file: {file_name}*\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    for (provider, outcome) in results {
        if let Ok(summary) = outcome {
            report += &format!("## {provider} summary\n\n{summary}\n\n");
        }
    }
    report
}

/// Summarizes one cleaned transcript and writes
/// `<output_dir>/conclusion_<original name>.md`.
///
/// Returns `Ok(None)` without writing anything when every provider failed.
///
/// # Errors
///
/// Returns [`ChatdigestError::NotFound`] if `input` does not exist, or an IO
/// error if it cannot be read or the report cannot be written.
pub fn generate_conclusion(
    input: &Path,
    output_dir: &Path,
    summarizers: &[Box<dyn Summarizer>],
) -> Result<Option<Conclusion>> {
    if !input.exists() {
        return Err(ChatdigestError::not_found(input));
    }
    let transcript = fs::read_to_string(input)?;
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let results = summarize_all(summarizers, &transcript);
    if results.iter().all(|(_, outcome)| outcome.is_err()) {
        warn!(file = %input.display(), "no provider returned a summary");
        return Ok(None);
    }

    let report = render_report(&file_name, &results, Local::now().naive_local());
    fs::create_dir_all(output_dir)?;
    let output = output_dir.join(format!(
        "{CONCLUSION_PREFIX}{}.md",
        original_name(&file_name)
    ));
    fs::write(&output, report)?;
    info!(output = %output.display(), "summary report written");

    let mut succeeded = Vec::new();
    let mut failed = Vec::new();
    for (provider, outcome) in results {
        match outcome {
            Ok(_) => succeeded.push(provider),
            Err(e) => failed.push((provider, e)),
        }
    }
    Ok(Some(Conclusion {
        input: input.to_path_buf(),
        output,
        succeeded,
        failed,
    }))
}

/// Lists the cleaned transcripts in `dir`, sorted by name.
pub fn cleaned_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_cleaned = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(CLEANED_PREFIX));
        if is_cleaned && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Summarizes every cleaned transcript in `input_dir`.
///
/// A transcript for which every provider failed is recorded as a
/// [`ChatdigestError::NoSummary`] failure. A missing input directory yields
/// an empty report.
pub fn process_all(
    input_dir: &Path,
    output_dir: &Path,
    summarizers: &[Box<dyn Summarizer>],
) -> Result<BatchReport<Conclusion>> {
    if !input_dir.is_dir() {
        warn!(dir = %input_dir.display(), "input directory does not exist");
        return Ok(BatchReport::new());
    }

    let mut report = BatchReport::new();
    for path in cleaned_files(input_dir)? {
        match generate_conclusion(&path, output_dir, summarizers) {
            Ok(Some(conclusion)) => report.completed.push(conclusion),
            Ok(None) => {
                let error = ChatdigestError::NoSummary { path: path.clone() };
                report.failures.push((path, error));
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "failed to summarize transcript");
                report.failures.push((path, e));
            }
        }
    }
    Ok(report)
}
