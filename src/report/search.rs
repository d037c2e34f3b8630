//! Path search over the catalog

use crate::error::StorageError;
use crate::store::{CatalogStore, PathPattern};
use crate::types::FileRecord;

/// Rows whose path matches `pattern`, ordered by path then hostname
pub fn search_paths(store: &dyn CatalogStore, pattern: &str) -> Result<Vec<FileRecord>, StorageError> {
    let pattern = PathPattern::parse(pattern)?;
    let mut matches = store.search(&pattern)?;
    matches.sort_by(|a, b| (&a.path, &a.hostname).cmp(&(&b.path, &b.hostname)));
    Ok(matches)
}
