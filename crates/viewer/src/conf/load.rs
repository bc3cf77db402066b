//! Load: config loading from file and environment variables.

use std::fs;
use std::path::Path;

use super::model::{ConfigError, OutputFormat, ViewerConfig};

/// Config file used when `GAMELOG_CONFIG` / `--config` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "gamelog.toml";

impl ViewerConfig {
    /// Load configuration.
    /// Priority: Environment Variables > Config File > Defaults
    ///
    /// A missing file is not an error. Command-line flags are applied on top
    /// by the caller.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));

        let mut config = if path.exists() {
            tracing::info!("Loading configuration from: {}", path.display());
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply `GAMELOG_*` overrides. Values that do not parse are ignored
    /// with a warning.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(format) = lookup("GAMELOG_FORMAT") {
            match format.parse::<OutputFormat>() {
                Ok(format) => self.output.format = format,
                Err(e) => tracing::warn!("Ignoring GAMELOG_FORMAT: {}", e),
            }
        }
        if let Some(max) = lookup("GAMELOG_MAX_RECORDS") {
            match max.trim().parse() {
                Ok(max) => self.output.max_records = max,
                Err(_) => tracing::warn!("Ignoring GAMELOG_MAX_RECORDS: '{}' is not a number", max),
            }
        }
        if let Some(depth) = lookup("GAMELOG_EXPAND_DEPTH") {
            match depth.trim().parse() {
                Ok(depth) => self.parser.max_expand_depth = depth,
                Err(_) => {
                    tracing::warn!("Ignoring GAMELOG_EXPAND_DEPTH: '{}' is not a number", depth)
                }
            }
        }
    }
}
