//! Status command - show configuration and ledger overview

use authgate::core::services::{MAX_BATCH_SIZE, MAX_CONTENT_CHARS};
use authgate::output::{OutputMode, StatusResult};

use super::{GlobalArgs, Workspace};

/// Show current authgate status
///
/// Works without an API key; nothing is fetched or analyzed.
pub fn status(global: &GlobalArgs, mode: OutputMode) -> anyhow::Result<()> {
    let workspace = Workspace::open(global)?;
    let ledger = workspace.ledger()?;
    let config = &workspace.config;

    StatusResult {
        version: authgate::VERSION.to_string(),
        model: config.model.name.clone(),
        validators: config.consensus.validators,
        api_key_configured: config.has_api_key(),
        ledger: workspace.ledger_path().display().to_string(),
        verifications: ledger.count(),
        next_id: ledger.next_id(),
        batch_limit: MAX_BATCH_SIZE,
        content_limit: MAX_CONTENT_CHARS,
    }
    .render(mode);
    Ok(())
}
