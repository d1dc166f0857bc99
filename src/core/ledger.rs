//! Verification ledger
//!
//! The append-only, identifier-keyed store of verification records. The
//! identifier counter is owned by the ledger itself, so independent ledgers
//! never share state.
//!
//! # Examples
//!
//! ```
//! use authgate::core::ledger::Ledger;
//! use authgate::core::models::Analysis;
//! use authgate::core::ports::ExecutionContext;
//!
//! struct Fixed;
//!
//! impl ExecutionContext for Fixed {
//!     fn timestamp(&self) -> u64 {
//!         1_700_000_000
//!     }
//!     fn caller(&self) -> String {
//!         "0xabc".to_string()
//!     }
//! }
//!
//! let mut ledger = Ledger::new();
//! let record = ledger.write("https://example.com", Analysis::default(), &Fixed).unwrap();
//! assert_eq!(record.id, 1);
//! assert_eq!(ledger.count(), 1);
//! assert_eq!(ledger.next_id(), 2);
//! assert!(ledger.get(2).is_none());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::{Analysis, Verdict, VerificationRecord};
use super::ports::ExecutionContext;

/// First identifier handed out by a fresh ledger
pub const FIRST_ID: u64 = 1;

/// Errors found when restoring a ledger from a snapshot
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// The counter was below the first identifier
    #[error("next_id must be at least {FIRST_ID}, found {0}")]
    InvalidCounter(u64),

    /// Two records share an identifier
    #[error("duplicate record id {0}")]
    DuplicateId(u64),

    /// A record's identifier was not below the counter
    #[error("record id {id} is not below next_id {next_id}")]
    IdAheadOfCounter {
        /// The offending record identifier
        id: u64,
        /// The counter stored in the snapshot
        next_id: u64,
    },
}

/// The identifier counter cannot advance any further
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("ledger is full: no identifier left after {0}")]
pub struct LedgerFull(pub u64);

/// Serialized form of a [`Ledger`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Identifier the next write will receive
    pub next_id: u64,
    /// Every record, ascending by id
    pub records: Vec<VerificationRecord>,
}

/// The verification ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LedgerSnapshot", into = "LedgerSnapshot")]
pub struct Ledger {
    next_id: u64,
    records: BTreeMap<u64, VerificationRecord>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create an empty ledger whose first write receives id 1
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_id: FIRST_ID,
            records: BTreeMap::new(),
        }
    }

    /// Store a completed record for `url` and advance the counter
    ///
    /// Timestamp and validator come from `context`. Returns the stored record,
    /// or [`LedgerFull`] without writing when the counter is exhausted.
    pub fn write(
        &mut self,
        url: &str,
        analysis: Analysis,
        context: &dyn ExecutionContext,
    ) -> Result<VerificationRecord, LedgerFull> {
        let id = self.next_id;
        let next_id = id.checked_add(1).ok_or(LedgerFull(id))?;
        let record = VerificationRecord::completed(
            id,
            url.to_string(),
            analysis,
            context.timestamp(),
            context.caller(),
        );

        self.records.insert(id, record.clone());
        self.next_id = next_id;

        log::info!("recorded verification {id} for {url}");
        Ok(record)
    }

    /// Store every verdict in order, or none of them
    pub fn write_all(
        &mut self,
        verdicts: &[Verdict],
        context: &dyn ExecutionContext,
    ) -> Result<Vec<VerificationRecord>, LedgerFull> {
        if !self.has_room_for(verdicts.len()) {
            return Err(LedgerFull(self.next_id));
        }

        verdicts
            .iter()
            .map(|v| self.write(&v.url, v.analysis.clone(), context))
            .collect()
    }

    /// Whether `n` more records can be written
    #[must_use]
    pub fn has_room_for(&self, n: usize) -> bool {
        u64::try_from(n).is_ok_and(|n| u64::MAX - self.next_id >= n)
    }

    /// Look up a record by id
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&VerificationRecord> {
        self.records.get(&id)
    }

    /// Every record in ascending id order
    ///
    /// Freshly built on each call; later writes do not show up in it.
    #[must_use]
    pub fn list_all(&self) -> Vec<VerificationRecord> {
        self.records.values().cloned().collect()
    }

    /// Number of stored records
    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Identifier the next write will receive
    #[must_use]
    pub const fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Whether the ledger holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TryFrom<LedgerSnapshot> for Ledger {
    type Error = SnapshotError;

    fn try_from(snapshot: LedgerSnapshot) -> Result<Self, Self::Error> {
        if snapshot.next_id < FIRST_ID {
            return Err(SnapshotError::InvalidCounter(snapshot.next_id));
        }

        let mut records = BTreeMap::new();
        for record in snapshot.records {
            let id = record.id;
            if id >= snapshot.next_id {
                return Err(SnapshotError::IdAheadOfCounter {
                    id,
                    next_id: snapshot.next_id,
                });
            }
            if records.insert(id, record).is_some() {
                return Err(SnapshotError::DuplicateId(id));
            }
        }

        Ok(Self {
            next_id: snapshot.next_id,
            records,
        })
    }
}

impl From<Ledger> for LedgerSnapshot {
    fn from(ledger: Ledger) -> Self {
        Self {
            next_id: ledger.next_id,
            records: ledger.records.into_values().collect(),
        }
    }
}
