//! Domain models for authgate
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Analysis`] - The normalized six-field answer of the language model
//! - [`Verdict`] - An analysis not yet written to the ledger
//! - [`VerificationRecord`] - One immutable entry of the ledger

mod analysis;
mod record;

pub use analysis::{
    Analysis, DEFAULT_DEEPFAKE, DEFAULT_ORIGINALITY, DEFAULT_PLAGIARISM, DEFAULT_SENTIMENT,
    SENTIMENTS, Verdict,
};
pub use record::{STATUS_COMPLETED, VerificationRecord};
