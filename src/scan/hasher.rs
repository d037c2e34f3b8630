//! Hasher unit: turns one dispatched entry into a completed catalog row

use crate::scan::digest;
use crate::types::{EntryKind, FileRecord};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, warn};

/// One unit of work dispatched by the walker
#[derive(Debug, Clone)]
pub struct HashJob {
    /// Filesystem path to open
    pub path: PathBuf,
    /// Normalized path string stored in the catalog
    pub catalog_path: String,
    /// Size snapshot from the walk
    pub size: u64,
    /// Modification time snapshot from the walk
    pub mod_time: DateTime<Utc>,
    pub kind: EntryKind,
    /// Read and digest the content. False for placeholder jobs.
    pub hash_content: bool,
}

/// Result of running one hash job
#[derive(Debug)]
pub enum HashOutcome {
    /// Content was read and digested
    Hashed(FileRecord),
    /// Record synthesized without reading content
    Placeholder(FileRecord),
    /// The file could not be opened or read; no record is emitted
    Dropped,
}

impl HashOutcome {
    pub fn into_record(self) -> Option<FileRecord> {
        match self {
            HashOutcome::Hashed(record) | HashOutcome::Placeholder(record) => Some(record),
            HashOutcome::Dropped => None,
        }
    }
}

/// Run a hash job to completion
///
/// Regular files are read fully into memory and digested. Every other job
/// gets a record with empty digests. Open and read failures are logged and
/// the unit is dropped.
pub fn run_job(job: HashJob, hostname: &str) -> HashOutcome {
    if !job.hash_content {
        return HashOutcome::Placeholder(placeholder_record(job, hostname));
    }

    let mut file = match File::open(&job.path) {
        Ok(file) => file,
        Err(e) => {
            warn!(path = %job.path.display(), error = %e, "Failed to open file, dropping");
            return HashOutcome::Dropped;
        }
    };

    // read_to_end reserves from file metadata and reports allocation failure
    // as an io error
    let mut content = Vec::new();
    if let Err(e) = file.read_to_end(&mut content) {
        warn!(path = %job.path.display(), error = %e, "Failed to read file, dropping");
        return HashOutcome::Dropped;
    }

    let digests = digest::compute_digests(&content);
    debug!(path = %job.catalog_path, bytes = content.len(), "Hashed file");

    HashOutcome::Hashed(FileRecord {
        hostname: hostname.to_string(),
        path: job.catalog_path,
        size: content.len() as u64,
        mod_time: job.mod_time,
        kind: job.kind,
        primary_digest: digests.primary,
        secondary_digest: digests.secondary,
    })
}

fn placeholder_record(job: HashJob, hostname: &str) -> FileRecord {
    FileRecord {
        hostname: hostname.to_string(),
        path: job.catalog_path,
        size: job.size,
        mod_time: job.mod_time,
        kind: job.kind,
        primary_digest: String::new(),
        secondary_digest: String::new(),
    }
}
