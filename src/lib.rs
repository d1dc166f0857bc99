//! authgate - AI-derived authenticity verification for web content
//!
//! This library fetches a page, asks a language model to score it for
//! originality, plagiarism risk and AI-generation likelihood, reconciles the
//! answer across independent executions, and records the result in an
//! append-only ledger.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
#[cfg(feature = "server")]
pub mod server;
pub mod storage;
