//! Filecat: Persistent File Catalog
//!
//! Walks directory trees, records one row per file with two content digests,
//! and answers duplicate and path queries against the catalog.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod scan;
pub mod store;
pub mod types;
pub mod update;
