//! Pipeline services
//!
//! Orchestration over the domain models and ports:
//!
//! - [`prompt`] - Build the analysis prompt from fetched content
//! - [`analyzer`] - Obtain one reconciled raw model answer
//! - [`normalizer`] - Turn the raw answer into an [`Analysis`](crate::core::models::Analysis)
//! - [`batch`] - Run several URLs through the pipeline at once
//! - [`verifier`] - The public verification surface

pub mod analyzer;
pub mod batch;
pub mod normalizer;
pub mod prompt;
pub mod verifier;

pub use analyzer::Analyzer;
pub use batch::{MAX_BATCH_SIZE, parse_url_list, select_batch};
pub use normalizer::{FALLBACK_SUMMARY, normalize, parse_analysis};
pub use prompt::{MAX_CONTENT_CHARS, build_prompt, truncate_content};
pub use verifier::ContentVerifier;
