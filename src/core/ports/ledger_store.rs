//! Ledger store port
//!
//! Defines the interface for persisting the ledger between invocations.

use crate::core::ledger::Ledger;

/// A change applied to the stored ledger by [`LedgerStore::update`]
pub type LedgerChange<'a> = dyn FnMut(&mut Ledger) -> anyhow::Result<()> + 'a;

/// Persistence backend for the ledger
pub trait LedgerStore: Send + Sync {
    /// Load the ledger, returning an empty one when nothing was saved yet
    fn load(&self) -> anyhow::Result<Ledger>;

    /// Persist the whole ledger
    fn save(&self, ledger: &Ledger) -> anyhow::Result<()>;

    /// Apply `change` to the latest stored ledger and persist the result
    ///
    /// Load, change and save happen while holding the store exclusively, so
    /// concurrent writers never hand out the same identifier. Returns the
    /// saved ledger. When `change` or the save fails, the stored ledger is
    /// left as it was and the error is returned unchanged.
    fn update(&self, change: &mut LedgerChange<'_>) -> anyhow::Result<Ledger>;

    /// Where the ledger is kept, for display
    fn location(&self) -> String;
}
