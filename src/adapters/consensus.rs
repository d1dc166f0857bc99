//! Local quorum reconciler
//!
//! Stands in for a network of independent validators: the unit of work runs
//! once per validator, the first run acting as leader. Every other run must
//! produce an answer equivalent to the leader's under a liberal rule, or the
//! reconciliation fails.
//!
//! Two answers are equivalent when
//!
//! - both parse as analyses, their sentiments match (ignoring case) and each
//!   score differs by at most the configured tolerance, or
//! - either fails to parse and the texts match after whitespace collapsing
//!   and case folding.

use crate::core::error::VerifyError;
use crate::core::models::Analysis;
use crate::core::ports::{Reconciler, UnitOfWork};
use crate::core::services::parse_analysis;

/// Runs the work `validators` times and requires agreement with the leader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuorumReconciler {
    validators: usize,
    tolerance: u64,
}

impl QuorumReconciler {
    /// Reconciler with `validators` executions (at least one) and the given
    /// per-score tolerance
    #[must_use]
    pub fn new(validators: usize, tolerance: u64) -> Self {
        Self {
            validators: validators.max(1),
            tolerance,
        }
    }

    /// A reconciler that trusts a single execution
    #[must_use]
    pub const fn single() -> Self {
        Self {
            validators: 1,
            tolerance: 0,
        }
    }

    /// Reconciler for the configured validator count and tolerance
    ///
    /// One validator (or none) means the single execution is trusted and
    /// the tolerance is irrelevant.
    #[must_use]
    pub fn from_settings(validators: usize, tolerance: u64) -> Self {
        if validators <= 1 {
            Self::single()
        } else {
            Self::new(validators, tolerance)
        }
    }

    /// Compare a validator's answer against the leader's
    ///
    /// Returns `Err` with a description of the first difference found.
    pub fn compare(&self, leader: &str, candidate: &str) -> Result<(), String> {
        match (parse_analysis(leader), parse_analysis(candidate)) {
            (Ok(a), Ok(b)) => self.compare_analyses(&a, &b),
            _ => {
                if collapse(leader) == collapse(candidate) {
                    Ok(())
                } else {
                    Err("answers are not comparable analyses and their text differs".to_string())
                }
            },
        }
    }

    fn compare_analyses(&self, a: &Analysis, b: &Analysis) -> Result<(), String> {
        if !a.sentiment.eq_ignore_ascii_case(&b.sentiment) {
            return Err(format!("sentiment {} vs {}", a.sentiment, b.sentiment));
        }

        let scores = [
            ("originality", a.originality, b.originality),
            ("plagiarism", a.plagiarism, b.plagiarism),
            ("deepfake", a.deepfake, b.deepfake),
        ];
        for (name, x, y) in scores {
            if x.abs_diff(y) > self.tolerance {
                return Err(format!(
                    "{name} {x} vs {y} exceeds tolerance {}",
                    self.tolerance
                ));
            }
        }
        Ok(())
    }
}

impl Default for QuorumReconciler {
    fn default() -> Self {
        Self::new(3, 15)
    }
}

impl Reconciler for QuorumReconciler {
    fn reconcile(&self, work: &UnitOfWork<'_>) -> Result<String, VerifyError> {
        let leader = work()?;
        log::debug!("leader answered ({} bytes)", leader.len());

        for validator in 1..self.validators {
            let candidate = work()?;
            if let Err(reason) = self.compare(&leader, &candidate) {
                log::warn!("validator {validator} disagreed with leader: {reason}");
                return Err(VerifyError::Disagreement { validator, reason });
            }
            log::debug!("validator {validator} agreed with leader");
        }

        Ok(leader)
    }

    fn validators(&self) -> usize {
        self.validators
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}
