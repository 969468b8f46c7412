//! Engine configuration loading.
//!
//! The engine runs with built-in defaults unless a TOML file is given.
//! Keys missing from the file keep their default values.

use std::path::{Path, PathBuf};

use ecmo_model::{EcmoError, EngineConfig};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: EcmoError,
    },
}

/// Reads and validates an engine configuration file.
pub fn load_engine_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: EngineConfig = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate().map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "loaded engine config");
    Ok(config)
}

/// Picks the configuration for a run.
///
/// A config file wins over `--legacy`; with neither the canonical defaults
/// are used.
pub fn resolve_engine_config(
    path: Option<&Path>,
    legacy: bool,
) -> Result<EngineConfig, ConfigError> {
    match path {
        Some(path) => load_engine_config(path),
        None if legacy => {
            info!("using legacy rule set");
            Ok(EngineConfig::legacy())
        }
        None => Ok(EngineConfig::default()),
    }
}
