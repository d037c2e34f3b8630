//! Persistence layer for the catalog store

use crate::error::StorageError;
use crate::store::{CatalogStore, PathPattern};
use crate::types::{FileRecord, RecordKey};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the sled tree holding catalog rows
pub const FILES_TREE: &str = "files";

/// Summary of an open catalog
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub catalog_path: PathBuf,
    pub trees: Vec<String>,
    pub row_count: usize,
    pub rows_per_host: BTreeMap<String, usize>,
    pub size_on_disk: u64,
}

/// Sled-based implementation of CatalogStore
pub struct SledCatalogStore {
    path: PathBuf,
    db: sled::Db,
    files: sled::Tree,
}

impl SledCatalogStore {
    /// Open (or create) the catalog database at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path.as_ref())?;
        let files = db.open_tree(FILES_TREE)?;
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            db,
            files,
        })
    }

    /// Number of rows in the catalog
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Catalog name, tree list and row counts
    pub fn stats(&self) -> Result<CatalogStats, StorageError> {
        let trees = self
            .db
            .tree_names()
            .iter()
            .map(|name| String::from_utf8_lossy(name).to_string())
            .collect();

        let mut rows_per_host = BTreeMap::new();
        let mut row_count = 0;
        for record in self.scan()? {
            *rows_per_host.entry(record.hostname).or_insert(0) += 1;
            row_count += 1;
        }

        Ok(CatalogStats {
            catalog_path: self.path.clone(),
            trees,
            row_count,
            rows_per_host,
            size_on_disk: self.db.size_on_disk()?,
        })
    }

    fn decode_all(
        iter: impl Iterator<Item = sled::Result<(sled::IVec, sled::IVec)>>,
    ) -> Result<Vec<FileRecord>, StorageError> {
        let mut records = Vec::new();
        for item in iter {
            let (_, value) = item?;
            records.push(bincode::deserialize(&value)?);
        }
        Ok(records)
    }
}

impl CatalogStore for SledCatalogStore {
    fn get(&self, key: &RecordKey) -> Result<Option<FileRecord>, StorageError> {
        match self.files.get(key.to_bytes())? {
            Some(value) => Ok(Some(bincode::deserialize(&value)?)),
            None => Ok(None),
        }
    }

    fn insert(&self, record: &FileRecord) -> Result<(), StorageError> {
        let value = bincode::serialize(record)?;
        self.files
            .compare_and_swap(record.key().to_bytes(), None as Option<&[u8]>, Some(value))?
            .map_err(|_| StorageError::RecordExists(record.key()))
    }

    fn update(&self, record: &FileRecord) -> Result<(), StorageError> {
        let key = record.key();
        let key_bytes = key.to_bytes();
        if !self.files.contains_key(&key_bytes)? {
            return Err(StorageError::RecordNotFound(key));
        }
        self.files.insert(key_bytes, bincode::serialize(record)?)?;
        Ok(())
    }

    fn scan(&self) -> Result<Vec<FileRecord>, StorageError> {
        Self::decode_all(self.files.iter())
    }

    fn scan_host(&self, hostname: &str) -> Result<Vec<FileRecord>, StorageError> {
        Self::decode_all(self.files.scan_prefix(RecordKey::host_prefix(hostname)))
    }

    fn search(&self, pattern: &PathPattern) -> Result<Vec<FileRecord>, StorageError> {
        let mut matches = Vec::new();
        for item in self.files.iter() {
            let (_, value) = item?;
            let record: FileRecord = bincode::deserialize(&value)?;
            if pattern.matches(&record.path) {
                matches.push(record);
            }
        }
        Ok(matches)
    }

    fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }
}
