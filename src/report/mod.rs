//! Read-only reports over the catalog: duplicate sets and path search.
//!
//! Nothing in here writes to the store.

pub mod duplicates;
pub mod search;

pub use duplicates::{find_duplicates, group_by_content, DuplicateSet};
pub use search::search_paths;
