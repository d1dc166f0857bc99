//! Batch command - verify several URLs in one all-or-nothing run

use std::fs;
use std::path::Path;

use anyhow::Context;

use authgate::core::services::{MAX_BATCH_SIZE, parse_url_list};
use authgate::output::{OutputMode, RecordListResult};

use super::{GlobalArgs, Workspace};

/// Verify `urls` (plus any listed in `file`) and persist the new records
pub fn batch(
    global: &GlobalArgs,
    mut urls: Vec<String>,
    file: Option<&Path>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    if let Some(path) = file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read url list {}", path.display()))?;
        urls.extend(parse_url_list(&content));
    }

    if urls.is_empty() {
        anyhow::bail!("no urls given; pass them as arguments or with --file");
    }
    if urls.len() > MAX_BATCH_SIZE {
        log::warn!(
            "{} urls given, only the first {MAX_BATCH_SIZE} will be verified",
            urls.len()
        );
    }

    let workspace = Workspace::open(global)?;
    let mut verifier = workspace.verifier()?;

    let records = verifier.batch_verify_to(workspace.store.as_ref(), &urls)?;

    RecordListResult::from(records).render(mode);
    Ok(())
}
