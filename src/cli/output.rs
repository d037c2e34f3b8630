//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::CatalogError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &CatalogError) -> String {
    match e {
        CatalogError::CatalogDir { .. } | CatalogError::StorageError(_) => {
            format!("error: catalog unavailable: {}", e)
        }
        _ => format!("error: {}", e),
    }
}
