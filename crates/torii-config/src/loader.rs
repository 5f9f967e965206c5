//! Configuration loader (file + env merge).

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use thiserror::Error;

use crate::schema::ToriiConfig;

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to load or merge configuration.
    #[error("configuration error: {0}")]
    Load(String),
}

/// Loads configuration by merging layers:
/// 1. Default values
/// 2. Config file (if given)
/// 3. Environment variables (TORII_ prefix, `__` separating sections,
///    e.g. `TORII_SERVER__PORT`, `TORII_STORE__DB_PATH`)
///
/// The section separator is a double underscore so snake_case field
/// names stay addressable.
pub fn load_config(config_path: Option<&str>) -> Result<ToriiConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(ToriiConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("TORII_").split("__"));

    figment
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))
}
