//! Pure API handlers
//!
//! These handlers contain business logic and are HTTP-agnostic.
//! They take typed input and return `Result<T, ApiError>`.
//!
//! Writes go through the given [`LedgerStore`]: new records become visible
//! only once they are saved, and a failed save reports an internal error
//! with nothing changed.

use crate::core::models::VerificationRecord;
use crate::core::ports::LedgerStore;
use crate::core::services::{ContentVerifier, MAX_BATCH_SIZE, MAX_CONTENT_CHARS};

use super::error::ApiError;
use super::types::{BatchVerifyRequest, CountData, StatusData, VerificationsData, VerifyRequest};

// =============================================================================
// STATUS
// =============================================================================

/// Get service status
pub fn get_status(
    verifier: &ContentVerifier,
    store: &dyn LedgerStore,
) -> Result<StatusData, ApiError> {
    let analyzer = verifier.analyzer();
    let ledger = verifier.ledger();

    Ok(StatusData {
        version: crate::VERSION.to_string(),
        model: analyzer.model_name(),
        validators: analyzer.validators(),
        verifications: ledger.count(),
        next_id: ledger.next_id(),
        batch_limit: MAX_BATCH_SIZE,
        content_limit: MAX_CONTENT_CHARS,
        ledger: store.location(),
    })
}

// =============================================================================
// QUERIES
// =============================================================================

/// List every verification, ascending by id
pub fn list_verifications(verifier: &ContentVerifier) -> Result<VerificationsData, ApiError> {
    Ok(verifier.get_all_verifications().into())
}

/// Get a single verification by id
pub fn get_verification(
    verifier: &ContentVerifier,
    id: &str,
) -> Result<VerificationRecord, ApiError> {
    let parsed: u64 = id
        .trim()
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid verification id: {id}")))?;

    verifier
        .get_verification(parsed)
        .ok_or_else(|| ApiError::not_found(format!("Verification not found: {parsed}")))
}

/// Count stored verifications
pub fn count_verifications(verifier: &ContentVerifier) -> Result<CountData, ApiError> {
    Ok(CountData {
        count: verifier.get_verification_count(),
    })
}

// =============================================================================
// WRITES
// =============================================================================

/// Verify one URL and persist the new record
pub fn create_verification(
    verifier: &mut ContentVerifier,
    store: &dyn LedgerStore,
    req: &VerifyRequest,
) -> Result<VerificationRecord, ApiError> {
    Ok(verifier.verify_content_to(store, &req.url)?)
}

/// Verify up to ten URLs and persist the new records
pub fn batch_verify(
    verifier: &mut ContentVerifier,
    store: &dyn LedgerStore,
    req: &BatchVerifyRequest,
) -> Result<VerificationsData, ApiError> {
    if req.urls.is_empty() {
        return Err(ApiError::bad_request("urls must not be empty"));
    }

    Ok(verifier.batch_verify_to(store, &req.urls)?.into())
}
