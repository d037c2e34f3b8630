//! Filesystem scanning
//!
//! Walks a directory tree, classifies every entry and turns each one into a
//! catalog row: regular files are read and digested, everything else gets a
//! placeholder row with empty digests.

pub mod digest;
pub mod hasher;
pub mod path;
pub mod walker;
