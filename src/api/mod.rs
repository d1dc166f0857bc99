//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and pure handlers
//! over a [`ContentVerifier`](crate::core::services::ContentVerifier) that
//! can be used by any HTTP server implementation or directly by clients.
//!
//! ## Design
//!
//! - **Handlers are pure functions**: Take typed input, return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ApiErrorData, ErrorCode};
pub use handlers::{
    batch_verify, count_verifications, create_verification, get_status, get_verification,
    list_verifications,
};
pub use types::{
    ApiResponse, BatchVerifyRequest, CountData, StatusData, VerificationsData, VerifyRequest,
};
