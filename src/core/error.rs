//! Pipeline errors
//!
//! Everything here is fail-hard: when one of these is returned, nothing was
//! written to the ledger (in memory or on disk) and the identifier counter
//! did not move. Malformed
//! model output is not an error (see [`crate::core::services::normalizer`]).

use thiserror::Error;

use crate::core::ledger::LedgerFull;

/// Boxed collaborator error
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by the verification pipeline
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The submitted URL was empty or whitespace
    #[error("url must not be empty")]
    EmptyUrl,

    /// The page could not be fetched
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        /// The URL that was requested
        url: String,
        /// Underlying fetch error
        source: BoxError,
    },

    /// The language model call failed
    #[error("model execution failed: {0}")]
    Model(#[source] BoxError),

    /// Independent executions did not agree
    #[error("validators disagreed (validator {validator}): {reason}")]
    Disagreement {
        /// Index of the first validator whose answer was rejected
        validator: usize,
        /// Why the answers were judged different
        reason: String,
    },

    /// One URL of a batch failed; the whole batch was abandoned
    #[error("batch aborted at item {index} ({url}): {source}")]
    Batch {
        /// Zero-based position of the failing URL in the batch
        index: usize,
        /// The failing URL
        url: String,
        /// The error raised for that URL
        source: Box<VerifyError>,
    },

    /// The ledger has no identifiers left
    #[error(transparent)]
    Ledger(#[from] LedgerFull),

    /// The ledger could not be loaded or saved around a write
    #[error("failed to persist ledger: {0}")]
    Storage(#[source] BoxError),
}

impl VerifyError {
    /// Wrap a fetch failure
    pub fn fetch(url: &str, err: impl Into<BoxError>) -> Self {
        Self::Fetch {
            url: url.to_string(),
            source: err.into(),
        }
    }

    /// Wrap a model execution failure
    pub fn model(err: impl Into<BoxError>) -> Self {
        Self::Model(err.into())
    }

    /// Wrap a ledger store failure, keeping its context chain in the message
    pub fn storage(err: &anyhow::Error) -> Self {
        Self::Storage(format!("{err:#}").into())
    }

    /// Whether the failure came from an external collaborator
    /// (fetch, model, or reconciliation) rather than from the request itself
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        match self {
            Self::EmptyUrl | Self::Ledger(_) | Self::Storage(_) => false,
            Self::Fetch { .. } | Self::Model(_) | Self::Disagreement { .. } => true,
            Self::Batch { source, .. } => source.is_upstream(),
        }
    }

    /// Whether the failure lies with the ledger rather than the request
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Ledger(_) | Self::Storage(_))
    }
}
