//! Catalog directory config source: <catalog_dir>/config.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

/// File name of the per-catalog configuration file.
pub const CATALOG_CONFIG_FILE: &str = "config.toml";

/// Add the catalog directory's config file to builder when present.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    catalog_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let config_path = catalog_dir.join(CATALOG_CONFIG_FILE);
    if config_path.exists() {
        return Ok(builder.add_source(File::from(config_path).required(false)));
    }
    Ok(builder)
}
