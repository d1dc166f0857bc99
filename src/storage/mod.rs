//! Storage backends for the verification ledger
//!
//! - `file`: a JSON snapshot on the local filesystem (default)

mod file;

pub use file::FileLedgerStore;

use std::path::Path;

use crate::core::ports::LedgerStore;

/// Get the ledger store for a snapshot path
#[must_use]
pub fn ledger_store(path: &Path) -> Box<dyn LedgerStore> {
    Box::new(FileLedgerStore::new(path))
}
