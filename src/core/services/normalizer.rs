//! Response normalizer
//!
//! Converts the untrusted raw model answer into an [`Analysis`]. Parsing is
//! fail-soft: [`normalize`] always produces an analysis, falling back to a
//! fixed record when the answer cannot be read.
//!
//! Scores and sentiment are passed through unchecked. A model answering
//! `"originality": 250` or `"sentiment": "Ecstatic"` is stored as such.

use serde::Deserialize;
use serde_json::Value;

use crate::core::models::{
    Analysis, DEFAULT_DEEPFAKE, DEFAULT_ORIGINALITY, DEFAULT_PLAGIARISM, DEFAULT_SENTIMENT,
};

/// Summary stored when the model answer could not be parsed
pub const FALLBACK_SUMMARY: &str = "Content analyzed but response format was invalid";

/// Wire shape of the model answer; `null` counts as absent
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    #[serde(default)]
    originality: Option<u64>,
    #[serde(default)]
    plagiarism: Option<u64>,
    #[serde(default)]
    deepfake: Option<u64>,
    #[serde(default)]
    sentiment: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    reasoning: Option<String>,
}

impl From<RawAnalysis> for Analysis {
    fn from(raw: RawAnalysis) -> Self {
        Self {
            originality: raw.originality.unwrap_or(DEFAULT_ORIGINALITY),
            plagiarism: raw.plagiarism.unwrap_or(DEFAULT_PLAGIARISM),
            deepfake: raw.deepfake.unwrap_or(DEFAULT_DEEPFAKE),
            sentiment: raw.sentiment.unwrap_or_else(|| DEFAULT_SENTIMENT.to_string()),
            summary: raw.summary.unwrap_or_default(),
            reasoning: raw.reasoning.unwrap_or_default(),
        }
    }
}

/// Why a model answer could not be parsed
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// Not valid JSON, or a field had the wrong type
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON, but not an object
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Remove a surrounding markdown code fence and its `json` tag
///
/// Text that does not start with a fence is only trimmed. For fenced text
/// the part between the opening fence and the next fence (or the end) is
/// kept.
#[must_use]
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let body = rest.split("```").next().unwrap_or_default();
    body.strip_prefix("json").unwrap_or(body).trim()
}

/// Parse a model answer, reporting failures instead of falling back
pub fn parse_analysis(raw: &str) -> Result<Analysis, NormalizeError> {
    let value: Value = serde_json::from_str(strip_code_fence(raw))?;
    if !value.is_object() {
        return Err(NormalizeError::NotAnObject(json_kind(&value)));
    }
    let parsed: RawAnalysis = serde_json::from_value(value)?;
    Ok(parsed.into())
}

/// Parse a model answer, substituting the fixed fallback on any failure
#[must_use]
pub fn normalize(raw: &str) -> Analysis {
    match parse_analysis(raw) {
        Ok(analysis) => analysis,
        Err(err) => {
            log::warn!("model answer could not be parsed, storing fallback: {err}");
            fallback(&err)
        },
    }
}

/// The record stored when parsing fails
#[must_use]
pub fn fallback(err: &NormalizeError) -> Analysis {
    Analysis {
        summary: FALLBACK_SUMMARY.to_string(),
        reasoning: format!("Parse error: {err}"),
        ..Analysis::default()
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
