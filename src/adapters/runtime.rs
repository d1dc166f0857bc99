//! Shared async runtime for the HTTP adapters
//!
//! The pipeline is synchronous; the reqwest-based adapters drive their
//! futures to completion on this runtime. Callers must not already be inside
//! a tokio runtime.

use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};

/// Build a runtime to share between adapters
pub fn shared_runtime() -> anyhow::Result<Arc<Runtime>> {
    let runtime = Builder::new_multi_thread().worker_threads(2).enable_all().build()?;
    Ok(Arc::new(runtime))
}
