//! Count command

use authgate::output::{CountResult, OutputMode};

use super::{GlobalArgs, Workspace};

/// Print the number of stored verifications
pub fn count(global: &GlobalArgs, mode: OutputMode) -> anyhow::Result<()> {
    let ledger = Workspace::open(global)?.ledger()?;
    CountResult {
        count: ledger.count(),
    }
    .render(mode);
    Ok(())
}
