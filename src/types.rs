//! Core catalog types shared by the scanner, the store and the reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique key of a catalog row: one row per (hostname, path)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    pub hostname: String,
    pub path: String,
}

impl RecordKey {
    pub fn new(hostname: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            path: path.into(),
        }
    }

    /// Byte encoding used as the store key: `hostname \0 path`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.hostname.len() + 1 + self.path.len());
        bytes.extend_from_slice(self.hostname.as_bytes());
        bytes.push(0);
        bytes.extend_from_slice(self.path.as_bytes());
        bytes
    }

    /// Key prefix covering every row of one host
    pub fn host_prefix(hostname: &str) -> Vec<u8> {
        let mut bytes = hostname.as_bytes().to_vec();
        bytes.push(0);
        bytes
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hostname, self.path)
    }
}

/// Classification of a directory entry at scan time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    File,
    Symlink,
    Socket,
    Fifo,
    BlockDevice,
    CharDevice,
    Other,
}

impl EntryKind {
    /// Only regular files have their content read and digested.
    pub fn is_hashable(self) -> bool {
        matches!(self, EntryKind::File)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Symlink => "symlink",
            EntryKind::Socket => "socket",
            EntryKind::Fifo => "fifo",
            EntryKind::BlockDevice => "block-device",
            EntryKind::CharDevice => "char-device",
            EntryKind::Other => "other",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub hostname: String,
    pub path: String,
    pub size: u64,
    pub mod_time: DateTime<Utc>,
    pub kind: EntryKind,
    /// Sampled, collision-tolerant digest (lowercase hex). Advisory only.
    pub primary_digest: String,
    /// Full-content BLAKE3 digest (lowercase hex). Authoritative for equality.
    pub secondary_digest: String,
}

impl FileRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.hostname.clone(), self.path.clone())
    }

    /// True when the record carries placeholder (empty) digests.
    pub fn is_placeholder(&self) -> bool {
        self.secondary_digest.is_empty()
    }

    /// Whether either stored digest differs from `other`'s.
    pub fn digests_differ(&self, other: &FileRecord) -> bool {
        self.primary_digest != other.primary_digest
            || self.secondary_digest != other.secondary_digest
    }
}
