//! Merge rules: defaults, override order, conflict handling.
//!
//! Precedence, lowest first: built-in defaults, global config file, catalog
//! directory config file, explicit `--config` file, `FILECAT__*` environment
//! variables, command-line overrides.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix of environment overrides, e.g. `FILECAT__UPDATE__WORKERS=8`.
pub const ENV_PREFIX: &str = "FILECAT";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("update.path", ".")?
        .set_default("update.queue_capacity", 1024)?
        .set_default("update.conduit_capacity", 1024)?
        .set_default("update.follow_symlinks", false)
}

/// Environment source: `FILECAT__SECTION__KEY`, lists comma separated.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("update.ignore_patterns")
}
