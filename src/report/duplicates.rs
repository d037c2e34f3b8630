//! Duplicate scan: group catalog rows by their full-content digest

use crate::error::StorageError;
use crate::store::CatalogStore;
use crate::types::FileRecord;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Paths sharing one secondary digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateSet {
    pub digest: String,
    /// Distinct paths, sorted
    pub paths: Vec<String>,
}

/// Scan the store for duplicate content, optionally for one host only
pub fn find_duplicates(
    store: &dyn CatalogStore,
    hostname: Option<&str>,
) -> Result<Vec<DuplicateSet>, StorageError> {
    let records = match hostname {
        Some(hostname) => store.scan_host(hostname)?,
        None => store.scan()?,
    };
    Ok(group_by_content(records))
}

/// Group rows by secondary digest and keep groups with two or more paths.
///
/// Placeholder rows (no digest) never group. Sets are ordered by their first
/// path so the listing is stable between invocations.
pub fn group_by_content(records: impl IntoIterator<Item = FileRecord>) -> Vec<DuplicateSet> {
    let mut groups: HashMap<String, BTreeSet<String>> = HashMap::new();
    for record in records {
        if record.is_placeholder() {
            continue;
        }
        groups
            .entry(record.secondary_digest)
            .or_default()
            .insert(record.path);
    }

    let mut sets: Vec<DuplicateSet> = groups
        .into_iter()
        .filter(|(_, paths)| paths.len() >= 2)
        .map(|(digest, paths)| DuplicateSet {
            digest,
            paths: paths.into_iter().collect(),
        })
        .collect();
    sets.sort_by(|a, b| a.paths.cmp(&b.paths));
    sets
}
