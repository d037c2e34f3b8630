//! Filecat CLI Binary
//!
//! Command-line interface for the filecat catalog.

use clap::Parser;
use filecat::cli::{Cli, RunContext};
use filecat::config::{CatalogConfig, ConfigLoader};
use filecat::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{debug, error, info};

fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.config_dir.as_deref(), cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", filecat::cli::map_error(&e));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Filecat CLI starting");
    debug!(catalog_dir = %config.catalog_dir.display(), "Configuration loaded");

    let context = match RunContext::new(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error opening catalog: {}", e);
            eprintln!("{}", filecat::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", filecat::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args on top of the loaded config.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, catalog: &CatalogConfig) -> LoggingConfig {
    let mut config = catalog.logging.clone();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }
    if config.enabled && config.output == "file" {
        config.file = Some(config.resolve_file(&catalog.catalog_dir));
    }

    config
}
