//! Verify command - run one URL through the pipeline

use authgate::output::{OutputMode, RecordResult};

use super::{GlobalArgs, Workspace};

/// Verify `url` and persist the new record
pub fn verify(global: &GlobalArgs, url: &str, mode: OutputMode) -> anyhow::Result<()> {
    let workspace = Workspace::open(global)?;
    let mut verifier = workspace.verifier()?;

    let record = verifier.verify_content_to(workspace.store.as_ref(), url)?;

    RecordResult::from(record).render(mode);
    Ok(())
}
