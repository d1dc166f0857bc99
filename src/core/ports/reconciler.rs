//! Reconciler port
//!
//! The consensus boundary of the system. A reconciler runs the same unit of
//! work several times (possibly on independent executors) and accepts the
//! outcome only when the independent outputs are judged equivalent.

use crate::core::error::VerifyError;

/// A zero-argument unit of work producing a raw model answer
///
/// The pipeline guarantees that the work is a pure function of the URL and
/// the fetched content, so comparing repeated runs is meaningful.
pub type UnitOfWork<'a> = dyn Fn() -> Result<String, VerifyError> + 'a;

/// Runs a unit of work under an equivalence-consensus protocol
pub trait Reconciler: Send + Sync {
    /// Run and reconcile `work`, returning the agreed output
    ///
    /// Fails when the work itself fails or when agreement cannot be reached.
    fn reconcile(&self, work: &UnitOfWork<'_>) -> Result<String, VerifyError>;

    /// Number of independent executions per reconciliation
    fn validators(&self) -> usize;
}
