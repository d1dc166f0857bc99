//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use serde::{Deserialize, Serialize};

use crate::core::models::VerificationRecord;

use super::error::ApiErrorData;

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for verifying one URL
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// The URL to analyze
    pub url: String,
}

/// Request body for verifying several URLs
#[derive(Debug, Deserialize)]
pub struct BatchVerifyRequest {
    /// URLs to analyze; only the first ten are processed
    pub urls: Vec<String>,
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

/// Service status
#[derive(Debug, Serialize)]
pub struct StatusData {
    /// Crate version
    pub version: String,
    /// Model used for analysis
    pub model: String,
    /// Executions compared per analysis
    pub validators: usize,
    /// Records in the ledger
    pub verifications: usize,
    /// Id the next write will receive
    pub next_id: u64,
    /// URLs processed per batch
    pub batch_limit: usize,
    /// Characters of page content sent to the model
    pub content_limit: usize,
    /// Ledger snapshot location
    pub ledger: String,
}

/// A list of verification records
#[derive(Debug, Serialize)]
pub struct VerificationsData {
    /// Records, ascending by id
    pub verifications: Vec<VerificationRecord>,
    /// Number of records returned
    pub count: usize,
}

impl From<Vec<VerificationRecord>> for VerificationsData {
    fn from(verifications: Vec<VerificationRecord>) -> Self {
        Self {
            count: verifications.len(),
            verifications,
        }
    }
}

/// Number of stored records
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CountData {
    /// Record count
    pub count: usize,
}
