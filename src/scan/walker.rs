//! Filesystem walker: classifies entries and dispatches hash jobs

use crate::error::CatalogError;
use crate::scan::hasher::HashJob;
use crate::scan::path;
use crate::types::EntryKind;
use chrono::{DateTime, Utc};
use std::fs::{FileType, Metadata};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Filesystem walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// File names whose entries (and subtrees) are skipped, e.g. ".git"
    pub ignore_patterns: Vec<String>,
    /// Absolute paths whose subtrees are skipped (the catalog directory)
    pub exclude_paths: Vec<PathBuf>,
    /// Dispatch regular files as placeholder jobs too
    pub no_hash: bool,
}

/// Counters collected during one walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Entries yielded by the traversal, directories included
    pub entries: u64,
    pub directories: u64,
    /// Jobs handed to the dispatch callback
    pub dispatched: u64,
    /// Entries skipped because they could not be read or classified
    pub entry_errors: u64,
    /// Directories whose contents could not be listed
    pub skipped_subtrees: u64,
    /// The dispatch callback refused further work
    pub stopped_early: bool,
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the tree, handing one job per non-directory entry to `dispatch`.
    ///
    /// Entries arrive in traversal order. `dispatch` returns false to stop the
    /// walk (the receiving side has gone away). Per-entry failures are logged
    /// and counted; only a failure on the root itself is returned as an error.
    pub fn walk<F>(&self, mut dispatch: F) -> Result<WalkStats, CatalogError>
    where
        F: FnMut(HashJob) -> bool,
    {
        let root = path::canonicalize_root(&self.root)?;
        let mut stats = WalkStats::default();

        let walker = WalkDir::new(&root)
            .follow_links(self.config.follow_symlinks)
            .into_iter()
            .filter_entry(|entry| !self.should_skip(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    if err.depth() == 0 {
                        return Err(CatalogError::WalkFailed {
                            path: root,
                            reason: err.to_string(),
                        });
                    }
                    self.record_walk_error(&err, &mut stats);
                    continue;
                }
            };
            stats.entries += 1;

            if entry.file_type().is_dir() {
                stats.directories += 1;
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "Failed to read metadata, skipping entry");
                    stats.entry_errors += 1;
                    continue;
                }
            };

            let job = self.job_for(&entry, &metadata);
            stats.dispatched += 1;
            if !dispatch(job) {
                debug!("Dispatch target closed, stopping walk");
                stats.stopped_early = true;
                break;
            }
        }

        Ok(stats)
    }

    /// Walk and collect every job in memory
    pub fn collect(&self) -> Result<(Vec<HashJob>, WalkStats), CatalogError> {
        let mut jobs = Vec::new();
        let stats = self.walk(|job| {
            jobs.push(job);
            true
        })?;
        Ok((jobs, stats))
    }

    fn job_for(&self, entry: &DirEntry, metadata: &Metadata) -> HashJob {
        let kind = classify(entry.file_type());
        let mod_time = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| DateTime::<Utc>::from(std::time::UNIX_EPOCH));

        HashJob {
            path: entry.path().to_path_buf(),
            catalog_path: path::catalog_path_string(entry.path()),
            size: metadata.len(),
            mod_time,
            kind,
            hash_content: kind.is_hashable() && !self.config.no_hash,
        }
    }

    fn record_walk_error(&self, err: &walkdir::Error, stats: &mut WalkStats) {
        let unreadable_dir = err.io_error().is_some()
            && err.path().map(Path::is_dir).unwrap_or(false);
        if unreadable_dir {
            warn!(
                path = ?err.path(),
                error = %err,
                "Cannot read directory, skipping subtree"
            );
            stats.skipped_subtrees += 1;
        } else {
            warn!(path = ?err.path(), error = %err, "Cannot read entry, skipping");
            stats.entry_errors += 1;
        }
    }

    /// Check if an entry (and its subtree) should be pruned
    fn should_skip(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }

        let path = entry.path();
        if self
            .config
            .exclude_paths
            .iter()
            .any(|excluded| path.starts_with(excluded))
        {
            return true;
        }

        let name = entry.file_name().to_string_lossy();
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| name == pattern.as_str())
    }
}

/// Map a file type onto the catalog's entry kinds
pub fn classify(file_type: FileType) -> EntryKind {
    if file_type.is_file() {
        return EntryKind::File;
    }
    if file_type.is_symlink() {
        return EntryKind::Symlink;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if file_type.is_socket() {
            return EntryKind::Socket;
        }
        if file_type.is_fifo() {
            return EntryKind::Fifo;
        }
        if file_type.is_block_device() {
            return EntryKind::BlockDevice;
        }
        if file_type.is_char_device() {
            return EntryKind::CharDevice;
        }
    }

    EntryKind::Other
}
