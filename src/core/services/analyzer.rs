//! Consensus-backed analyzer
//!
//! Packages fetch, prompt construction and model execution into a single
//! unit of work and hands it to the [`Reconciler`]. The reconciler decides
//! how many times the work runs and whether the outputs agree; the analyzer
//! only guarantees that the work depends on nothing but the URL and the
//! fetched page.

use crate::core::error::VerifyError;
use crate::core::ports::{FetchMode, ModelExecutor, PageFetcher, Reconciler};

use super::prompt::build_prompt;

/// Produces one agreed raw model answer per URL
pub struct Analyzer {
    fetcher: Box<dyn PageFetcher>,
    model: Box<dyn ModelExecutor>,
    reconciler: Box<dyn Reconciler>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("model", &self.model.name())
            .field("validators", &self.reconciler.validators())
            .finish_non_exhaustive()
    }
}

impl Analyzer {
    /// Assemble an analyzer from its collaborators
    #[must_use]
    pub fn new(
        fetcher: Box<dyn PageFetcher>,
        model: Box<dyn ModelExecutor>,
        reconciler: Box<dyn Reconciler>,
    ) -> Self {
        Self {
            fetcher,
            model,
            reconciler,
        }
    }

    /// Fetch `url`, ask the model about it under reconciliation, and return
    /// the agreed raw answer
    ///
    /// Fetch, model and reconciliation failures are returned unchanged.
    pub fn analyze(&self, url: &str) -> Result<String, VerifyError> {
        let work = || -> Result<String, VerifyError> {
            let content = self
                .fetcher
                .fetch(url, FetchMode::Text)
                .map_err(|e| VerifyError::fetch(url, e))?;
            let prompt = build_prompt(url, &content);
            self.model.execute(&prompt).map_err(VerifyError::model)
        };

        log::debug!(
            "analyzing {url} with {} across {} validator(s)",
            self.model.name(),
            self.reconciler.validators()
        );
        self.reconciler.reconcile(&work)
    }

    /// Name of the model in use
    #[must_use]
    pub fn model_name(&self) -> String {
        self.model.name()
    }

    /// Number of independent executions per analysis
    #[must_use]
    pub fn validators(&self) -> usize {
        self.reconciler.validators()
    }
}
