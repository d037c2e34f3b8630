//! CLI presentation: text and JSON rendering of command results.

use crate::error::CatalogError;
use crate::report::DuplicateSet;
use crate::store::CatalogStats;
use crate::types::FileRecord;
use comfy_table::Table;
use serde::Serialize;

/// One duplicate set per line, paths separated by a single space
pub fn format_duplicates(sets: &[DuplicateSet]) -> String {
    sets.iter()
        .map(|set| set.paths.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One path per line, or one tab-separated row per line with `long`
pub fn format_search_text(records: &[FileRecord], long: bool) -> String {
    records
        .iter()
        .map(|record| {
            if long {
                format!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    record.hostname,
                    record.path,
                    record.size,
                    record.mod_time.to_rfc3339(),
                    record.kind,
                    record.primary_digest,
                    record.secondary_digest
                )
            } else {
                record.path.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_search_json(records: &[FileRecord]) -> Result<String, CatalogError> {
    to_json(records)
}

pub fn format_stats_text(stats: &CatalogStats) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Property", "Value"]);
    table.add_row(vec![
        "Catalog".to_string(),
        stats.catalog_path.display().to_string(),
    ]);
    table.add_row(vec!["Trees".to_string(), stats.trees.join(", ")]);
    table.add_row(vec!["Rows".to_string(), stats.row_count.to_string()]);
    for (hostname, count) in &stats.rows_per_host {
        table.add_row(vec![format!("Rows ({})", hostname), count.to_string()]);
    }
    table.add_row(vec![
        "Size on disk".to_string(),
        format!("{} bytes", stats.size_on_disk),
    ]);
    table.to_string()
}

pub fn format_stats_json(stats: &CatalogStats) -> Result<String, CatalogError> {
    to_json(stats)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CatalogError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CatalogError::Runtime(format!("Failed to render JSON: {}", e)))
}
