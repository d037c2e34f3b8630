//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_duplicates, format_search_json, format_search_text, format_stats_json,
    format_stats_text,
};
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::report;
use crate::scan::walker::WalkerConfig;
use crate::store::{CatalogStore, SledCatalogStore};
use crate::update::{default_workers, ReconcileMode, UpdateOptions, UpdatePipeline};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Overrides given on the `update` command line
#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
    pub path: Option<PathBuf>,
    pub quick: bool,
    pub no_hash: bool,
    pub hostname: Option<String>,
    pub workers: Option<usize>,
}

/// Runtime context for CLI execution: configuration and the open catalog.
/// Built once per invocation and handed to every command.
pub struct RunContext {
    config: CatalogConfig,
    catalog_dir: PathBuf,
    store: Arc<SledCatalogStore>,
}

impl RunContext {
    /// Create the catalog directory if needed and open the catalog.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        std::fs::create_dir_all(&config.catalog_dir).map_err(|source| {
            CatalogError::CatalogDir {
                path: config.catalog_dir.clone(),
                source,
            }
        })?;
        let catalog_dir = dunce::canonicalize(&config.catalog_dir).map_err(|source| {
            CatalogError::CatalogDir {
                path: config.catalog_dir.clone(),
                source,
            }
        })?;

        let store = Arc::new(SledCatalogStore::new(config.catalog_db_path())?);
        info!(catalog = %catalog_dir.display(), rows = store.len(), "Catalog opened");

        Ok(Self {
            config,
            catalog_dir,
            store,
        })
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, CatalogError> {
        match command {
            Commands::Update {
                path,
                quick,
                no_hash,
                hostname,
                workers,
            } => self.run_update(&UpdateRequest {
                path: path.clone(),
                quick: *quick,
                no_hash: *no_hash,
                hostname: hostname.clone(),
                workers: *workers,
            }),
            Commands::Dupes { hostname } => {
                let sets = report::find_duplicates(self.store.as_ref(), hostname.as_deref())?;
                info!(sets = sets.len(), "Duplicate scan finished");
                Ok(format_duplicates(&sets))
            }
            Commands::Search {
                pattern,
                long,
                format,
            } => {
                let records = report::search_paths(self.store.as_ref(), pattern)?;
                info!(pattern = %pattern, matches = records.len(), "Search finished");
                if format == "json" {
                    format_search_json(&records)
                } else {
                    Ok(format_search_text(&records, *long))
                }
            }
            Commands::Stats { format } => {
                let stats = self.store.stats()?;
                if format == "json" {
                    format_stats_json(&stats)
                } else {
                    Ok(format_stats_text(&stats))
                }
            }
            Commands::Config => toml::to_string_pretty(&self.config)
                .map_err(|e| CatalogError::ConfigError(format!("Failed to render config: {}", e))),
        }
    }

    /// Options for one update run: command line over configuration
    pub fn update_options(&self, request: &UpdateRequest) -> UpdateOptions {
        let update = &self.config.update;
        let mut options = UpdateOptions::new(
            request.path.clone().unwrap_or_else(|| update.path.clone()),
            self.config.resolve_hostname(request.hostname.as_deref()),
        );
        options.mode = if request.quick {
            ReconcileMode::Quick
        } else {
            ReconcileMode::Full
        };
        options.workers = request
            .workers
            .or(update.workers)
            .unwrap_or_else(default_workers)
            .max(1);
        options.queue_capacity = update.queue_capacity;
        options.conduit_capacity = update.conduit_capacity;
        options.walker = WalkerConfig {
            follow_symlinks: update.follow_symlinks,
            ignore_patterns: update.ignore_patterns.clone(),
            exclude_paths: vec![self.catalog_dir.clone()],
            no_hash: request.no_hash,
        };
        options
    }

    fn run_update(&self, request: &UpdateRequest) -> Result<String, CatalogError> {
        let options = self.update_options(request);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let store: Arc<dyn CatalogStore> = self.store.clone();
        let summary = runtime.block_on(UpdatePipeline::new(store, options).run())?;
        Ok(summary.to_string())
    }
}
