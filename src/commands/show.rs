//! Show command - print one verification

use authgate::output::{OperationResult, OutputMode, RecordResult};

use super::{GlobalArgs, Workspace};

/// Print verification `id`, or a notice when it does not exist
pub fn show(global: &GlobalArgs, id: u64, mode: OutputMode) -> anyhow::Result<()> {
    let ledger = Workspace::open(global)?.ledger()?;

    match ledger.get(id) {
        Some(record) => RecordResult::from(record.clone()).render(mode),
        None => OperationResult {
            success: false,
            message: format!("Verification {id} not found."),
        }
        .render(mode),
    }
    Ok(())
}
