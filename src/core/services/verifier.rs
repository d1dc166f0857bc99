//! Content verifier
//!
//! The public surface of the pipeline: one [`ContentVerifier`] owns an
//! [`Analyzer`], an [`ExecutionContext`] and the [`Ledger`] it writes to.
//!
//! ```text
//! url -> prompt -> analyzer (reconciled) -> normalizer -> ledger.write -> record
//! ```
//!
//! The `*_to` variants write through a [`LedgerStore`] instead: analysis
//! runs first, then the store applies the write to its latest ledger under
//! its own lock. The verifier adopts that ledger only once it has been saved.

use crate::core::error::VerifyError;
use crate::core::ledger::{Ledger, LedgerFull};
use crate::core::models::{Verdict, VerificationRecord};
use crate::core::ports::{ExecutionContext, LedgerStore};

use super::analyzer::Analyzer;
use super::batch::analyze_batch;
use super::normalizer::normalize;

/// Reject empty URLs, returning the trimmed URL otherwise
pub fn validate_url(url: &str) -> Result<&str, VerifyError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(VerifyError::EmptyUrl);
    }
    Ok(url)
}

/// Validate, analyze and normalize one URL without recording it
pub fn analyze_url(analyzer: &Analyzer, url: &str) -> Result<Verdict, VerifyError> {
    let url = validate_url(url)?;
    let raw = analyzer.analyze(url)?;
    Ok(Verdict {
        url: url.to_string(),
        analysis: normalize(&raw),
    })
}

/// Runs verifications and answers ledger queries
pub struct ContentVerifier {
    analyzer: Analyzer,
    context: Box<dyn ExecutionContext>,
    ledger: Ledger,
}

impl std::fmt::Debug for ContentVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentVerifier")
            .field("analyzer", &self.analyzer)
            .field("records", &self.ledger.count())
            .field("next_id", &self.ledger.next_id())
            .finish_non_exhaustive()
    }
}

impl ContentVerifier {
    /// Create a verifier over an empty ledger
    #[must_use]
    pub fn new(analyzer: Analyzer, context: Box<dyn ExecutionContext>) -> Self {
        Self::with_ledger(analyzer, context, Ledger::new())
    }

    /// Create a verifier over an existing ledger
    #[must_use]
    pub fn with_ledger(
        analyzer: Analyzer,
        context: Box<dyn ExecutionContext>,
        ledger: Ledger,
    ) -> Self {
        Self {
            analyzer,
            context,
            ledger,
        }
    }

    /// Run the full pipeline for `url` and record the result
    ///
    /// Malformed model output still produces a record (with fallback
    /// values). Fetch, model and reconciliation failures produce an error
    /// and leave the ledger untouched.
    pub fn verify_content(&mut self, url: &str) -> Result<VerificationRecord, VerifyError> {
        let verdict = analyze_url(&self.analyzer, url)?;
        Ok(self.ledger.write(&verdict.url, verdict.analysis, self.context.as_ref())?)
    }

    /// Verify the first ten of `urls`, all-or-nothing
    ///
    /// See [`crate::core::services::batch`] for the failure policy.
    pub fn batch_verify<S: AsRef<str>>(
        &mut self,
        urls: &[S],
    ) -> Result<Vec<VerificationRecord>, VerifyError> {
        let verdicts = analyze_batch(&self.analyzer, urls)?;
        Ok(self.ledger.write_all(&verdicts, self.context.as_ref())?)
    }

    /// [`verify_content`](Self::verify_content), recorded through `store`
    ///
    /// Identifiers come from the stored ledger, so other writers sharing the
    /// store are never overwritten. On any error neither the store nor this
    /// verifier changes.
    pub fn verify_content_to(
        &mut self,
        store: &dyn LedgerStore,
        url: &str,
    ) -> Result<VerificationRecord, VerifyError> {
        let verdict = analyze_url(&self.analyzer, url)?;
        let mut records = self.commit(store, &[verdict])?;
        records.pop().ok_or_else(|| VerifyError::storage(&anyhow::anyhow!("nothing was written")))
    }

    /// [`batch_verify`](Self::batch_verify), recorded through `store`
    pub fn batch_verify_to<S: AsRef<str>>(
        &mut self,
        store: &dyn LedgerStore,
        urls: &[S],
    ) -> Result<Vec<VerificationRecord>, VerifyError> {
        let verdicts = analyze_batch(&self.analyzer, urls)?;
        if verdicts.is_empty() {
            return Ok(Vec::new());
        }
        self.commit(store, &verdicts)
    }

    fn commit(
        &mut self,
        store: &dyn LedgerStore,
        verdicts: &[Verdict],
    ) -> Result<Vec<VerificationRecord>, VerifyError> {
        let context = self.context.as_ref();
        let mut written = Vec::new();

        let ledger = store
            .update(&mut |ledger: &mut Ledger| -> anyhow::Result<()> {
                written = ledger.write_all(verdicts, context)?;
                Ok(())
            })
            .map_err(|err| match err.downcast::<LedgerFull>() {
                Ok(full) => VerifyError::Ledger(full),
                Err(err) => {
                    log::error!("failed to update ledger at {}: {err:#}", store.location());
                    VerifyError::storage(&err)
                },
            })?;

        self.ledger = ledger;
        Ok(written)
    }

    /// Replace the in-memory ledger with the one in `store`
    pub fn reload(&mut self, store: &dyn LedgerStore) -> anyhow::Result<()> {
        self.ledger = store.load()?;
        Ok(())
    }

    /// Look up one record; `None` when the id was never written
    #[must_use]
    pub fn get_verification(&self, id: u64) -> Option<VerificationRecord> {
        self.ledger.get(id).cloned()
    }

    /// Every record, ascending by id
    #[must_use]
    pub fn get_all_verifications(&self) -> Vec<VerificationRecord> {
        self.ledger.list_all()
    }

    /// Number of stored records
    #[must_use]
    pub fn get_verification_count(&self) -> usize {
        self.ledger.count()
    }

    /// The ledger being written to
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The analyzer in use
    #[must_use]
    pub const fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }
}
