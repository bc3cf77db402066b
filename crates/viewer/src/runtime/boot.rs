//! Boot: logging init and config resolution.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::conf::ViewerConfig;

/// Initialise the tracing / logging subsystem.
///
/// Logs go to stderr, stdout carries the records.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "viewer=info,engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// File, then environment, then flags. Fails on unreadable or invalid config.
pub fn load_config(cli: &Cli) -> anyhow::Result<ViewerConfig> {
    let mut config =
        ViewerConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate()?;

    info!(
        "Loaded configuration: format={}, max_records={}, max_expand_depth={}",
        config.output.format, config.output.max_records, config.parser.max_expand_depth
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_flags_applied_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nformat = \"json\"\nmax_records = 10").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["gamelog", "--config", &path, "-n", "3"]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.output.max_records, 3);
        assert_eq!(config.output.format, crate::conf::OutputFormat::Json);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.toml").to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["gamelog", "--config", &missing, "--expand-depth", "0"])
            .unwrap();
        let err = load_config(&cli).unwrap_err();
        assert!(err.to_string().contains("max_expand_depth"), "{}", err);
    }
}
