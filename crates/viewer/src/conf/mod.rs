//! Conf module: configuration model and loading.

pub mod load;
pub mod model;

pub use load::DEFAULT_CONFIG_PATH;
pub use model::{ConfigError, FilterConfig, OutputConfig, OutputFormat, ParserConfig, ViewerConfig};
