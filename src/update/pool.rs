//! Bounded pool of hasher workers
//!
//! A fixed number of tasks share one bounded work queue. Each job is run on a
//! blocking thread (file I/O and digesting), the finished record is pushed
//! onto the result conduit, and only then is the job marked complete in the
//! dispatch tracker.

use crate::error::CatalogError;
use crate::scan::hasher::{self, HashJob, HashOutcome};
use crate::types::FileRecord;
use crate::update::tracker::DispatchTracker;
use std::ops::AddAssign;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Per-pool job counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub hashed: u64,
    pub placeholders: u64,
    pub dropped: u64,
}

impl AddAssign for PoolStats {
    fn add_assign(&mut self, other: Self) {
        self.hashed += other.hashed;
        self.placeholders += other.placeholders;
        self.dropped += other.dropped;
    }
}

/// Running hasher workers
pub struct HashWorkerPool {
    workers: Vec<JoinHandle<PoolStats>>,
}

impl HashWorkerPool {
    /// Start `worker_count` workers draining `jobs` into `records`
    pub fn start(
        worker_count: usize,
        jobs: mpsc::Receiver<HashJob>,
        records: mpsc::Sender<FileRecord>,
        tracker: Arc<DispatchTracker>,
        hostname: Arc<str>,
    ) -> Self {
        let jobs = Arc::new(Mutex::new(jobs));
        let workers = (0..worker_count.max(1))
            .map(|id| {
                let jobs = Arc::clone(&jobs);
                let records = records.clone();
                let tracker = Arc::clone(&tracker);
                let hostname = Arc::clone(&hostname);
                tokio::spawn(async move {
                    Self::worker_loop(id, jobs, records, tracker, hostname).await
                })
            })
            .collect();

        Self { workers }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Wait for every worker to exit (the work queue must be closed)
    pub async fn join(self) -> Result<PoolStats, CatalogError> {
        let mut total = PoolStats::default();
        for handle in self.workers {
            total += handle.await?;
        }
        Ok(total)
    }

    async fn worker_loop(
        id: usize,
        jobs: Arc<Mutex<mpsc::Receiver<HashJob>>>,
        records: mpsc::Sender<FileRecord>,
        tracker: Arc<DispatchTracker>,
        hostname: Arc<str>,
    ) -> PoolStats {
        let mut stats = PoolStats::default();

        loop {
            let job = {
                let mut jobs = jobs.lock().await;
                jobs.recv().await
            };
            let Some(job) = job else {
                break;
            };

            let host = Arc::clone(&hostname);
            let path = job.path.clone();
            let outcome = match tokio::task::spawn_blocking(move || hasher::run_job(job, &host)).await
            {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Hash task failed, dropping");
                    HashOutcome::Dropped
                }
            };

            match &outcome {
                HashOutcome::Hashed(_) => stats.hashed += 1,
                HashOutcome::Placeholder(_) => stats.placeholders += 1,
                HashOutcome::Dropped => stats.dropped += 1,
            }

            if let Some(record) = outcome.into_record() {
                if records.send(record).await.is_err() {
                    warn!(path = %path.display(), "Result conduit closed, dropping record");
                }
            }
            tracker.complete();
        }

        debug!(worker = id, hashed = stats.hashed, dropped = stats.dropped, "Hash worker exiting");
        stats
    }
}
