//! Wall-clock execution context

use crate::core::ports::ExecutionContext;

/// Stamps writes with the system clock and a configured identity
#[derive(Debug, Clone)]
pub struct SystemContext {
    caller: String,
}

impl SystemContext {
    /// Context writing as `caller`
    #[must_use]
    pub fn new(caller: impl Into<String>) -> Self {
        Self {
            caller: caller.into(),
        }
    }
}

impl ExecutionContext for SystemContext {
    fn timestamp(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
    }

    fn caller(&self) -> String {
        self.caller.clone()
    }
}
