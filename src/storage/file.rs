//! File-based ledger storage
//!
//! The whole ledger lives in one pretty-printed JSON snapshot
//! (`.authgate/ledger.json` by default). Saves go through a temporary file
//! that is renamed over the snapshot, so a crash mid-write leaves the
//! previous snapshot intact.
//!
//! Writers serialize on an exclusive lock held on a sibling `.lock` file.
//! The snapshot itself cannot carry the lock because every save replaces it.

use std::ffi::OsStr;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::Context;
use fs4::fs_std::FileExt;

use crate::core::ledger::Ledger;
use crate::core::ports::{LedgerChange, LedgerStore};

/// JSON snapshot store
#[derive(Debug, Clone)]
pub struct FileLedgerStore {
    path: PathBuf,
}

impl FileLedgerStore {
    /// Store the ledger at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Snapshot location
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name().map(OsStr::to_os_string).unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    /// Take the writer lock, creating the ledger directory if needed
    ///
    /// The lock is released when the returned file is dropped.
    fn lock(&self) -> anyhow::Result<File> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let lock_path = self.sibling(".lock");
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("failed to open {}", lock_path.display()))?;
        file.lock_exclusive()
            .with_context(|| format!("failed to lock {}", lock_path.display()))?;
        Ok(file)
    }

    fn write_snapshot(&self, ledger: &Ledger) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(ledger)?;
        let temp = self.sibling(".tmp");
        fs::write(&temp, content).with_context(|| format!("failed to write {}", temp.display()))?;
        fs::rename(&temp, &self.path)
            .with_context(|| format!("failed to replace ledger {}", self.path.display()))?;

        log::debug!("saved {} record(s) to {}", ledger.count(), self.path.display());
        Ok(())
    }
}

impl LedgerStore for FileLedgerStore {
    fn load(&self) -> anyhow::Result<Ledger> {
        if !self.path.exists() {
            log::debug!("no ledger at {}, starting empty", self.path.display());
            return Ok(Ledger::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read ledger {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("corrupt ledger {}", self.path.display()))
    }

    fn save(&self, ledger: &Ledger) -> anyhow::Result<()> {
        let _lock = self.lock()?;
        self.write_snapshot(ledger)
    }

    fn update(&self, change: &mut LedgerChange<'_>) -> anyhow::Result<Ledger> {
        let _lock = self.lock()?;

        let mut ledger = self.load()?;
        change(&mut ledger)?;
        self.write_snapshot(&ledger)?;
        Ok(ledger)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
