//! Normalized analysis model
//!
//! The six fields the model is asked to return, after defaults have been
//! applied by the normalizer.

use serde::{Deserialize, Serialize};

/// Originality score used when the model omits it
pub const DEFAULT_ORIGINALITY: u64 = 75;

/// Plagiarism risk used when the model omits it
pub const DEFAULT_PLAGIARISM: u64 = 25;

/// AI-generation confidence used when the model omits it
pub const DEFAULT_DEEPFAKE: u64 = 20;

/// Sentiment used when the model omits it
pub const DEFAULT_SENTIMENT: &str = "Neutral";

/// The sentiments the model is asked to choose from.
///
/// Membership is requested in the prompt but never enforced.
pub const SENTIMENTS: [&str; 3] = ["Positive", "Neutral", "Negative"];

/// A normalized model answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// How original the content is (100 = highly original)
    pub originality: u64,
    /// Likelihood the content is plagiarized (100 = high risk)
    pub plagiarism: u64,
    /// Likelihood the content is AI-generated or synthetic (100 = definitely)
    pub deepfake: u64,
    /// Overall tone, expected to be one of [`SENTIMENTS`]
    pub sentiment: String,
    /// Short summary of the content
    pub summary: String,
    /// Why the scores were given
    pub reasoning: String,
}

impl Default for Analysis {
    fn default() -> Self {
        Self {
            originality: DEFAULT_ORIGINALITY,
            plagiarism: DEFAULT_PLAGIARISM,
            deepfake: DEFAULT_DEEPFAKE,
            sentiment: DEFAULT_SENTIMENT.to_string(),
            summary: String::new(),
            reasoning: String::new(),
        }
    }
}

impl Analysis {
    /// Whether every score lies in 0..=100 and the sentiment is a known one.
    ///
    /// Informational only: out-of-range answers are still stored verbatim.
    #[must_use]
    pub fn is_within_domain(&self) -> bool {
        [self.originality, self.plagiarism, self.deepfake].iter().all(|s| *s <= 100)
            && SENTIMENTS.contains(&self.sentiment.as_str())
    }
}

/// An analyzed URL waiting to be written to the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// The trimmed URL that was analyzed
    pub url: String,
    /// Its normalized analysis
    pub analysis: Analysis,
}
