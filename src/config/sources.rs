//! Configuration file sources, lowest precedence first.

pub mod catalog_file;
pub mod global_file;
