//! Path canonicalization and normalization for catalog keys

use crate::error::CatalogError;
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize the root of a walk
///
/// Resolves symlinks, `..` and `.` so every path recorded under this root is
/// absolute. Fails when the root does not exist or cannot be resolved.
pub fn canonicalize_root(path: &Path) -> Result<PathBuf, CatalogError> {
    dunce::canonicalize(path).map_err(|e| CatalogError::WalkFailed {
        path: path.to_path_buf(),
        reason: format!("failed to canonicalize walk root: {}", e),
    })
}

/// Render a filesystem path as the string stored in the catalog
pub fn catalog_path_string(path: &Path) -> String {
    normalize_path_string(&path.to_string_lossy())
}

/// Normalize a path string: Unicode NFC, no trailing separators (except root)
pub fn normalize_path_string(path: &str) -> String {
    let mut result: String = path.nfc().collect();
    while result.len() > 1 && (result.ends_with('/') || result.ends_with('\\')) {
        result.pop();
    }
    result
}
