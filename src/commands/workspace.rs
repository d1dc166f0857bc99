//! Shared command setup: configuration, ledger store and verifier

use std::path::{Path, PathBuf};

use authgate::adapters::{self, SystemContext};
use authgate::config::AppConfig;
use authgate::core::ledger::Ledger;
use authgate::core::ports::LedgerStore;
use authgate::core::services::ContentVerifier;
use authgate::storage;

/// Options every command accepts
#[derive(Debug, Default)]
pub struct GlobalArgs {
    /// Explicit config file
    pub config: Option<PathBuf>,
    /// Ledger file overriding the configured one
    pub ledger: Option<PathBuf>,
}

/// Loaded configuration plus the ledger store it points at
pub struct Workspace {
    pub config: AppConfig,
    pub store: Box<dyn LedgerStore>,
}

impl Workspace {
    /// Resolve configuration and open the ledger store
    pub fn open(global: &GlobalArgs) -> anyhow::Result<Self> {
        let mut config = AppConfig::load(global.config.as_deref())?;
        if let Some(ledger) = &global.ledger {
            config.ledger.path.clone_from(ledger);
        }

        let store = storage::ledger_store(&config.ledger.path);
        Ok(Self { config, store })
    }

    /// Current ledger contents
    pub fn ledger(&self) -> anyhow::Result<Ledger> {
        self.store.load()
    }

    /// Ledger location for display
    pub fn ledger_path(&self) -> &Path {
        &self.config.ledger.path
    }

    /// A verifier over the stored ledger, wired to the production adapters
    ///
    /// Fails before touching the network when no API key is configured.
    pub fn verifier(&self) -> anyhow::Result<ContentVerifier> {
        let analyzer = adapters::analyzer_from_config(&self.config)?;
        let context = SystemContext::new(self.config.caller.identity.clone());
        Ok(ContentVerifier::with_ledger(analyzer, Box::new(context), self.ledger()?))
    }
}
