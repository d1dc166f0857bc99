//! Execution context port
//!
//! Supplies the facts a write needs from its surroundings.

/// The environment a ledger write executes in
pub trait ExecutionContext: Send + Sync {
    /// The environment's notion of "now", in seconds since the Unix epoch
    fn timestamp(&self) -> u64;

    /// Identity of the entity submitting the write
    fn caller(&self) -> String;
}
