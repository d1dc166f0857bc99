//! Batch controller
//!
//! Runs up to [`MAX_BATCH_SIZE`] URLs through the pipeline in one call.
//!
//! A batch is all-or-nothing: every selected URL is analyzed before anything
//! is written, and the first failure abandons the batch with the ledger
//! untouched.

use crate::core::error::VerifyError;
use crate::core::models::Verdict;

use super::analyzer::Analyzer;
use super::verifier::analyze_url;

/// Maximum number of URLs processed per batch; the rest are ignored
pub const MAX_BATCH_SIZE: usize = 10;

/// The part of `urls` a batch will process
#[must_use]
pub fn select_batch<S: AsRef<str>>(urls: &[S]) -> &[S] {
    &urls[..urls.len().min(MAX_BATCH_SIZE)]
}

/// Read a URL list: one URL per line, blank lines and `#` comments skipped
#[must_use]
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Analyze the first [`MAX_BATCH_SIZE`] URLs, in order
///
/// Nothing is written here. On failure the error names the zero-based
/// position and URL that failed, and the verdicts gathered so far are dropped.
pub fn analyze_batch<S: AsRef<str>>(
    analyzer: &Analyzer,
    urls: &[S],
) -> Result<Vec<Verdict>, VerifyError> {
    let selected = select_batch(urls);
    if selected.len() < urls.len() {
        log::debug!("batch of {} urls truncated to {}", urls.len(), selected.len());
    }

    selected
        .iter()
        .enumerate()
        .map(|(index, url)| {
            let url = url.as_ref();
            analyze_url(analyzer, url).map_err(|source| VerifyError::Batch {
                index,
                url: url.to_string(),
                source: Box::new(source),
            })
        })
        .collect()
}
