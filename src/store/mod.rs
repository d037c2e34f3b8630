//! Catalog Store
//!
//! Persistent keyed table of catalog rows, one row per (hostname, path).
//! The reconciler is the only writer; the duplicate scan, search and stats
//! reports only read.

pub mod pattern;
pub mod persistence;

pub use pattern::PathPattern;
pub use persistence::{CatalogStats, SledCatalogStore};

use crate::error::StorageError;
use crate::types::{FileRecord, RecordKey};

/// Catalog store interface
pub trait CatalogStore: Send + Sync {
    /// Point lookup by exact (hostname, path)
    fn get(&self, key: &RecordKey) -> Result<Option<FileRecord>, StorageError>;

    /// Insert a new row. Fails with `RecordExists` if the key is present.
    fn insert(&self, record: &FileRecord) -> Result<(), StorageError>;

    /// Replace an existing row. Fails with `RecordNotFound` if the key is absent.
    fn update(&self, record: &FileRecord) -> Result<(), StorageError>;

    /// Enumerate every row
    fn scan(&self) -> Result<Vec<FileRecord>, StorageError>;

    /// Enumerate the rows of one host
    fn scan_host(&self, hostname: &str) -> Result<Vec<FileRecord>, StorageError> {
        Ok(self
            .scan()?
            .into_iter()
            .filter(|record| record.hostname == hostname)
            .collect())
    }

    /// Rows whose path matches `pattern`
    fn search(&self, pattern: &PathPattern) -> Result<Vec<FileRecord>, StorageError> {
        Ok(self
            .scan()?
            .into_iter()
            .filter(|record| pattern.matches(&record.path))
            .collect())
    }

    /// Persist pending writes
    fn flush(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
