//! Config loading facade: the single entry point that layers every source.

use crate::config::merge::merge_policy;
use crate::config::sources::{catalog_file, global_file};
use crate::config::{default_catalog_dir, CatalogConfig};
use crate::error::CatalogError;
use config::File;
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for the given catalog directory.
    ///
    /// `catalog_dir` overrides the configured directory (it is also where the
    /// per-catalog config.toml is looked up). `config_file`, when given, must
    /// exist and takes precedence over both config files.
    pub fn load(
        catalog_dir: Option<&Path>,
        config_file: Option<&Path>,
    ) -> Result<CatalogConfig, CatalogError> {
        let lookup_dir = catalog_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(default_catalog_dir);

        let mut builder = merge_policy::builder_with_defaults()?
            .set_default("catalog_dir", lookup_dir.to_string_lossy().to_string())?;
        builder = global_file::add_to_builder(builder)?;
        builder = catalog_file::add_to_builder(builder, &lookup_dir)?;
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }
        builder = builder.add_source(merge_policy::environment());
        if let Some(dir) = catalog_dir {
            builder = builder.set_override("catalog_dir", dir.to_string_lossy().to_string())?;
        }

        let config: CatalogConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(|errors| {
            CatalogError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            ))
        })?;

        Ok(config)
    }
}
