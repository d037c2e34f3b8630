//! Configuration layering across files and environment

use filecat::cli::{Commands, RunContext};
use filecat::config::{ConfigLoader, CATALOG_CONFIG_FILE};
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that touch process environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_environment_overrides_catalog_file() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let catalog = TempDir::new().unwrap();
    fs::write(
        catalog.path().join(CATALOG_CONFIG_FILE),
        "[update]\nworkers = 2\nignore_patterns = [\".git\"]\n",
    )
    .unwrap();

    std::env::set_var("FILECAT__UPDATE__WORKERS", "7");
    std::env::set_var("FILECAT__UPDATE__IGNORE_PATTERNS", "node_modules,target");
    let result = ConfigLoader::load(Some(catalog.path()), None);
    std::env::remove_var("FILECAT__UPDATE__WORKERS");
    std::env::remove_var("FILECAT__UPDATE__IGNORE_PATTERNS");

    let config = result.unwrap();
    assert_eq!(config.update.workers, Some(7));
    assert_eq!(
        config.update.ignore_patterns,
        vec!["node_modules".to_string(), "target".to_string()]
    );
}

#[test]
fn test_cli_catalog_dir_wins_over_file_setting() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let catalog = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    let explicit = catalog.path().join("extra.toml");
    fs::write(
        &explicit,
        format!("catalog_dir = \"{}\"\n", elsewhere.path().display()),
    )
    .unwrap();

    let config = ConfigLoader::load(Some(catalog.path()), Some(&explicit)).unwrap();
    assert_eq!(config.catalog_dir, catalog.path());
}

#[test]
fn test_update_through_run_context_skips_catalog_dir() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    // Catalog lives inside the tree being walked
    let tree = TempDir::new().unwrap();
    fs::write(tree.path().join("a.txt"), "hello").unwrap();
    let catalog_dir = tree.path().join(".filecat");
    fs::create_dir_all(&catalog_dir).unwrap();
    fs::write(
        catalog_dir.join(CATALOG_CONFIG_FILE),
        "hostname = \"box\"\n",
    )
    .unwrap();

    let config = ConfigLoader::load(Some(&catalog_dir), None).unwrap();
    let context = RunContext::new(config).unwrap();
    let summary = context
        .execute(&Commands::Update {
            path: Some(tree.path().to_path_buf()),
            quick: false,
            no_hash: false,
            hostname: None,
            workers: Some(2),
        })
        .unwrap();
    assert!(summary.contains("1 inserted"), "{}", summary);

    let found = context
        .execute(&Commands::Search {
            pattern: ".filecat".to_string(),
            long: false,
            format: "text".to_string(),
        })
        .unwrap();
    assert!(found.is_empty());
}
