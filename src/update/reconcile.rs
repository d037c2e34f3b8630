//! Reconciler: the single serialized writer of the catalog
//!
//! Drains completed records one at a time and decides, per record, whether
//! to insert a new row, update the existing row, or leave it alone.

use crate::store::CatalogStore;
use crate::types::FileRecord;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// How existing rows are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconcileMode {
    /// Update a row when either digest changed
    #[default]
    Full,
    /// Only insert unseen paths; existing rows are never revised
    Quick,
}

/// Decision taken for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Inserted,
    Updated,
    Unchanged,
    /// Row exists and quick mode forbids revising it
    Frozen,
    /// Lookup or write failed; the record was skipped
    Failed,
}

/// Tally of reconcile outcomes for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileStats {
    pub received: u64,
    pub inserted: u64,
    pub updated: u64,
    pub unchanged: u64,
    pub frozen: u64,
    pub failed: u64,
}

impl ReconcileStats {
    pub fn record(&mut self, outcome: ReconcileOutcome) {
        self.received += 1;
        match outcome {
            ReconcileOutcome::Inserted => self.inserted += 1,
            ReconcileOutcome::Updated => self.updated += 1,
            ReconcileOutcome::Unchanged => self.unchanged += 1,
            ReconcileOutcome::Frozen => self.frozen += 1,
            ReconcileOutcome::Failed => self.failed += 1,
        }
    }

    /// Number of store writes performed
    pub fn writes(&self) -> u64 {
        self.inserted + self.updated
    }
}

pub struct Reconciler {
    store: Arc<dyn CatalogStore>,
    mode: ReconcileMode,
}

impl Reconciler {
    pub fn new(store: Arc<dyn CatalogStore>, mode: ReconcileMode) -> Self {
        Self { store, mode }
    }

    /// Reconcile a single record against the store
    pub fn reconcile(&self, record: &FileRecord) -> ReconcileOutcome {
        let key = record.key();

        let existing = match self.store.get(&key) {
            Ok(existing) => existing,
            Err(e) => {
                // Not the same as "absent": inserting here could clobber a row
                warn!(key = %key, error = %e, "Catalog lookup failed, skipping record");
                return ReconcileOutcome::Failed;
            }
        };

        let outcome = match existing {
            None => match self.store.insert(record) {
                Ok(()) => ReconcileOutcome::Inserted,
                Err(e) => {
                    warn!(key = %key, error = %e, "Catalog insert failed, skipping record");
                    ReconcileOutcome::Failed
                }
            },
            Some(_) if self.mode == ReconcileMode::Quick => ReconcileOutcome::Frozen,
            Some(stored) if !stored.digests_differ(record) => ReconcileOutcome::Unchanged,
            Some(_) => match self.store.update(record) {
                Ok(()) => ReconcileOutcome::Updated,
                Err(e) => {
                    warn!(key = %key, error = %e, "Catalog update failed, skipping record");
                    ReconcileOutcome::Failed
                }
            },
        };

        debug!(key = %key, outcome = ?outcome, "Reconciled record");
        outcome
    }

    /// Drain the conduit until every sender is gone. Blocks the calling thread.
    pub fn run(self, mut records: mpsc::Receiver<FileRecord>) -> ReconcileStats {
        let mut stats = ReconcileStats::default();
        while let Some(record) = records.blocking_recv() {
            stats.record(self.reconcile(&record));
        }
        stats
    }
}
