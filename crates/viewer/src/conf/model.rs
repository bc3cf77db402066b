//! Model: ViewerConfig and related structs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use engine::parser::normalize::DEFAULT_MAX_EXPAND_DEPTH;

/// Records printed per run when nothing else is configured.
pub const DEFAULT_MAX_RECORDS: usize = 2000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub output: OutputConfig,
    pub parser: ParserConfig,
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// 0 = unlimited
    pub max_records: usize,
    /// Print the pretty payload under each header
    pub show_payload: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub max_expand_depth: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub errors_only: bool,
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Header per record, payload indented below
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected text or json)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            max_records: DEFAULT_MAX_RECORDS,
            show_payload: true,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_expand_depth: DEFAULT_MAX_EXPAND_DEPTH,
        }
    }
}

impl ViewerConfig {
    /// Check that configuration values are sane
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parser.max_expand_depth == 0 {
            return Err(ConfigError::Invalid("parser.max_expand_depth must be > 0".to_string()));
        }
        Ok(())
    }

    pub fn normalizer_options(&self) -> engine::NormalizerOptions {
        engine::NormalizerOptions {
            max_expand_depth: self.parser.max_expand_depth,
        }
    }
}
