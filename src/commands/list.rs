//! List command

use authgate::output::{OutputMode, RecordListResult};

use super::{GlobalArgs, Workspace};

/// Print every verification, ascending by id
pub fn list(global: &GlobalArgs, mode: OutputMode) -> anyhow::Result<()> {
    let ledger = Workspace::open(global)?.ledger()?;
    RecordListResult::from(ledger.list_all()).render(mode);
    Ok(())
}
