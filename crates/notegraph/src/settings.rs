//! Layered configuration loading.
//!
//! Precedence, lowest first: built-in defaults, an optional config file
//! (YAML, TOML or JSON by extension), then `NOTEGRAPH_*` environment
//! variables. Nested keys use a double underscore, e.g.
//! `NOTEGRAPH_RANKING__DAMPING=0.9`.

use config::{Config, Environment, File};
use notegraph_core::{AnalysisConfig, Error, Result};
use std::path::Path;

pub const ENV_PREFIX: &str = "NOTEGRAPH";

/// Load configuration from an optional file and the environment
pub fn load_config(file: Option<&Path>) -> Result<AnalysisConfig> {
    let mut builder = Config::builder();
    if let Some(path) = file {
        if !path.is_file() {
            return Err(Error::file_not_found(path));
        }
        builder = builder.add_source(File::from(path).required(true));
    }
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config: AnalysisConfig = builder
        .build()
        .and_then(|c| c.try_deserialize())
        .map_err(|e| Error::config_error(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
