//! Port traits (interfaces) for external collaborators
//!
//! These traits define the boundaries between the verification pipeline and
//! the systems it depends on: the web, the language model, the consensus
//! mechanism, the execution environment, and ledger persistence.
//!
//! Implementations live in the `adapters` and `storage` modules.
//!
//! ## Design Principle
//!
//! The core depends only on these traits, never on concrete
//! implementations, so tests can swap in deterministic stubs for every
//! non-deterministic call.

mod context;
mod fetcher;
mod ledger_store;
mod model;
mod reconciler;

pub use context::ExecutionContext;
pub use fetcher::{FetchMode, PageFetcher};
pub use ledger_store::{LedgerChange, LedgerStore};
pub use model::ModelExecutor;
pub use reconciler::{Reconciler, UnitOfWork};
