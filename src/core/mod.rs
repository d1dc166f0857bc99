//! Core domain logic for authgate
//!
//! This module contains the verification pipeline with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Analysis, VerificationRecord)
//! - `ledger` - The identifier-keyed, append-only record store
//! - `services/` - Prompt, analyzer, normalizer, batch and verifier
//! - `ports/` - Trait definitions for external collaborators
//! - `error` - Fail-hard pipeline errors

pub mod error;
pub mod ledger;
pub mod models;
pub mod ports;
pub mod services;
