//! Catalog update pipeline
//!
//! One walker task feeds a bounded work queue; a fixed pool of hasher workers
//! turns jobs into records and pushes them onto the result conduit; a single
//! reconciler drains the conduit and is the only writer of the store.
//!
//! Shutdown is driven by the dispatch tracker: once the walk has returned and
//! every dispatched job has completed, the orchestrator releases its conduit
//! sender, the workers exit as the work queue closes, and the reconciler
//! finishes whatever is still buffered.

pub mod pool;
pub mod reconcile;
pub mod tracker;

pub use pool::{HashWorkerPool, PoolStats};
pub use reconcile::{ReconcileMode, ReconcileOutcome, ReconcileStats, Reconciler};
pub use tracker::{DispatchTracker, TrackerSnapshot, TraversalGuard};

use crate::error::CatalogError;
use crate::scan::walker::{WalkStats, Walker, WalkerConfig};
use crate::store::CatalogStore;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Lifecycle of one update run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePhase {
    Idle,
    /// Walking the tree while hashing runs concurrently
    Walking,
    /// Walk returned; waiting for in-flight hashing and the reconciler
    Draining,
    Done,
}

impl UpdatePhase {
    pub fn can_advance_to(self, next: UpdatePhase) -> bool {
        matches!(
            (self, next),
            (UpdatePhase::Idle, UpdatePhase::Walking)
                | (UpdatePhase::Walking, UpdatePhase::Draining)
                | (UpdatePhase::Draining, UpdatePhase::Done)
        )
    }
}

/// Parameters of one update run
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub root: PathBuf,
    pub hostname: String,
    pub mode: ReconcileMode,
    /// Number of hasher workers
    pub workers: usize,
    /// Capacity of the walker → worker queue
    pub queue_capacity: usize,
    /// Capacity of the worker → reconciler conduit
    pub conduit_capacity: usize,
    pub walker: WalkerConfig,
}

impl UpdateOptions {
    pub fn new(root: PathBuf, hostname: impl Into<String>) -> Self {
        Self {
            root,
            hostname: hostname.into(),
            mode: ReconcileMode::Full,
            workers: default_workers(),
            queue_capacity: 1024,
            conduit_capacity: 1024,
            walker: WalkerConfig::default(),
        }
    }
}

/// Number of hasher workers when none is configured
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Outcome of a finished update run
#[derive(Debug, Clone)]
pub struct UpdateSummary {
    pub root: PathBuf,
    pub hostname: String,
    pub mode: ReconcileMode,
    pub walk: WalkStats,
    pub hashing: PoolStats,
    pub reconcile: ReconcileStats,
    pub elapsed: Duration,
}

impl fmt::Display for UpdateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Updated catalog for {} on {}: {} entries, {} hashed, {} placeholders, {} dropped; \
             {} inserted, {} updated, {} unchanged, {} frozen, {} failed ({} ms)",
            self.root.display(),
            self.hostname,
            self.walk.entries,
            self.hashing.hashed,
            self.hashing.placeholders,
            self.hashing.dropped,
            self.reconcile.inserted,
            self.reconcile.updated,
            self.reconcile.unchanged,
            self.reconcile.frozen,
            self.reconcile.failed,
            self.elapsed.as_millis(),
        )
    }
}

/// One update run over one root
pub struct UpdatePipeline {
    store: Arc<dyn CatalogStore>,
    options: UpdateOptions,
    phase: UpdatePhase,
}

impl UpdatePipeline {
    pub fn new(store: Arc<dyn CatalogStore>, options: UpdateOptions) -> Self {
        Self {
            store,
            options,
            phase: UpdatePhase::Idle,
        }
    }

    fn advance(&mut self, next: UpdatePhase) -> Result<(), CatalogError> {
        if !self.phase.can_advance_to(next) {
            return Err(CatalogError::Runtime(format!(
                "illegal update phase transition {:?} -> {:?}",
                self.phase, next
            )));
        }
        info!(from = ?self.phase, to = ?next, "Update phase");
        self.phase = next;
        Ok(())
    }

    /// Walk, hash and reconcile until the catalog reflects the tree.
    ///
    /// Per-entry, per-file and per-record failures are logged and counted in
    /// the summary. A walk that cannot start (missing root) is returned as an
    /// error after in-flight work has drained.
    pub async fn run(mut self) -> Result<UpdateSummary, CatalogError> {
        self.advance(UpdatePhase::Walking)?;
        let started = Instant::now();
        let options = self.options.clone();
        info!(
            root = %options.root.display(),
            hostname = %options.hostname,
            mode = ?options.mode,
            workers = options.workers,
            "Starting catalog update"
        );

        let tracker = Arc::new(DispatchTracker::new());
        let (job_tx, job_rx) = mpsc::channel(options.queue_capacity.max(1));
        let (record_tx, record_rx) = mpsc::channel(options.conduit_capacity.max(1));

        let reconciler = Reconciler::new(Arc::clone(&self.store), options.mode);
        let reconcile_handle = tokio::task::spawn_blocking(move || reconciler.run(record_rx));

        let pool = HashWorkerPool::start(
            options.workers,
            job_rx,
            record_tx.clone(),
            Arc::clone(&tracker),
            Arc::from(options.hostname.as_str()),
        );

        let walker = Walker::with_config(options.root.clone(), options.walker.clone());
        let walk_tracker = Arc::clone(&tracker);
        let walk_handle = tokio::task::spawn_blocking(move || {
            let _traversal = TraversalGuard::new(&walk_tracker);
            walker.walk(|job| {
                walk_tracker.dispatch();
                if job_tx.blocking_send(job).is_err() {
                    walk_tracker.complete();
                    return false;
                }
                true
            })
        });

        let walk_result = walk_handle.await?;
        self.advance(UpdatePhase::Draining)?;

        tracker.wait_idle().await;
        drop(record_tx);
        let hashing = pool.join().await?;
        let reconcile = reconcile_handle.await?;
        self.advance(UpdatePhase::Done)?;

        if let Err(e) = self.store.flush() {
            warn!(error = %e, "Failed to flush catalog");
            return Err(e.into());
        }

        let walk = walk_result?;
        let summary = UpdateSummary {
            root: options.root,
            hostname: options.hostname,
            mode: options.mode,
            walk,
            hashing,
            reconcile,
            elapsed: started.elapsed(),
        };
        info!(
            entries = summary.walk.entries,
            dispatched = summary.walk.dispatched,
            inserted = summary.reconcile.inserted,
            updated = summary.reconcile.updated,
            failed = summary.reconcile.failed,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Catalog update finished"
        );
        Ok(summary)
    }
}
