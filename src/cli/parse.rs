//! CLI parse: clap types for filecat. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// filecat - catalog files by content digest, find duplicates, search paths
#[derive(Parser)]
#[command(name = "filecat")]
#[command(about = "Persistent file catalog with content digests, duplicate detection and path search")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the catalog database and config.toml (default: ~/.filecat)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Configuration file path (layered over the catalog directory's config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Walk a directory tree and bring the catalog up to date
    Update {
        /// Root to walk (default: update.path from config)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Only insert unseen paths; never revise existing rows
        #[arg(long)]
        quick: bool,
        /// Do not read file content; record empty digests
        #[arg(long)]
        no_hash: bool,
        /// Hostname recorded in the rows (default: local host name)
        #[arg(long)]
        hostname: Option<String>,
        /// Number of hasher workers
        #[arg(long)]
        workers: Option<usize>,
    },
    /// List files with identical content, one set per line
    Dupes {
        /// Only consider rows recorded for this hostname
        #[arg(long)]
        hostname: Option<String>,
    },
    /// Search catalog paths (substring, or wildcards `*`, `%`, `?`)
    Search {
        pattern: String,
        /// Print the full row instead of only the path
        #[arg(long)]
        long: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show catalog statistics
    Stats {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config,
}
