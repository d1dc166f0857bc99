//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `html` - HTML to readable text extraction
//! - `consensus` - Local quorum reconciler with liberal equivalence
//! - `context` - Wall-clock execution context
//! - `runtime` - Shared async runtime for the HTTP adapters (feature `llm`)
//! - `web` - HTTP page fetcher (feature `llm`)
//! - `gemini` - Gemini model executor (feature `llm`)

pub mod consensus;
pub mod context;
#[cfg(feature = "llm")]
pub mod gemini;
pub mod html;
#[cfg(feature = "llm")]
pub mod runtime;
#[cfg(feature = "llm")]
pub mod web;

pub use consensus::QuorumReconciler;
pub use context::SystemContext;

use crate::config::AppConfig;
use crate::core::services::Analyzer;

/// Build the production analyzer described by `config`
///
/// Requires the `llm` feature and a model API key.
#[cfg(feature = "llm")]
pub fn analyzer_from_config(config: &AppConfig) -> anyhow::Result<Analyzer> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        anyhow::anyhow!("no model API key: set {} to verify content", crate::config::ENV_API_KEY)
    })?;

    let runtime = runtime::shared_runtime()?;
    let fetcher = web::HttpPageFetcher::new(&config.fetch, runtime.clone())?;
    let model = gemini::GeminiExecutor::new(&config.model, api_key, runtime)?;
    let reconciler =
        QuorumReconciler::from_settings(config.consensus.validators, config.consensus.tolerance);

    Ok(Analyzer::new(Box::new(fetcher), Box::new(model), Box::new(reconciler)))
}

/// Build the production analyzer described by `config`
///
/// Always fails: this build has no HTTP adapters.
#[cfg(not(feature = "llm"))]
pub fn analyzer_from_config(_config: &AppConfig) -> anyhow::Result<Analyzer> {
    anyhow::bail!("authgate was built without the `llm` feature; rebuild with --features llm")
}
