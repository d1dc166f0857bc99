//! Verification record model
//!
//! A record is created exactly once, when a verification write succeeds,
//! and is never mutated afterwards.

use serde::{Deserialize, Serialize};

use super::Analysis;

/// The only status produced by a successful write
pub const STATUS_COMPLETED: &str = "completed";

/// One entry of the verification ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Ledger identifier (starts at 1)
    pub id: u64,
    /// The analyzed source
    pub url: String,
    /// Originality score
    pub originality: u64,
    /// Plagiarism risk
    pub plagiarism: u64,
    /// AI-generation confidence
    pub deepfake: u64,
    /// Overall tone
    pub sentiment: String,
    /// Content summary
    pub summary: String,
    /// Explanation of the scores
    pub reasoning: String,
    /// When the record was written (seconds since the Unix epoch)
    pub timestamp: u64,
    /// Identity of the caller that submitted the write
    pub validator: String,
    /// Always `"completed"`
    pub status: String,
}

impl VerificationRecord {
    /// Build a completed record from a normalized analysis
    #[must_use]
    pub fn completed(
        id: u64,
        url: String,
        analysis: Analysis,
        timestamp: u64,
        validator: String,
    ) -> Self {
        Self {
            id,
            url,
            originality: analysis.originality,
            plagiarism: analysis.plagiarism,
            deepfake: analysis.deepfake,
            sentiment: analysis.sentiment,
            summary: analysis.summary,
            reasoning: analysis.reasoning,
            timestamp,
            validator,
            status: STATUS_COMPLETED.to_string(),
        }
    }

    /// The analysis fields of this record
    #[must_use]
    pub fn analysis(&self) -> Analysis {
        Analysis {
            originality: self.originality,
            plagiarism: self.plagiarism,
            deepfake: self.deepfake,
            sentiment: self.sentiment.clone(),
            summary: self.summary.clone(),
            reasoning: self.reasoning.clone(),
        }
    }

    /// The write time as RFC 3339, if the timestamp is representable
    #[must_use]
    pub fn timestamp_rfc3339(&self) -> Option<String> {
        let secs = i64::try_from(self.timestamp).ok()?;
        chrono::DateTime::from_timestamp(secs, 0).map(|t| t.to_rfc3339())
    }
}
