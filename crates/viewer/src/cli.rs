use std::path::PathBuf;

use clap::Parser;

use engine::RecordQuery;

use crate::conf::{OutputFormat, ViewerConfig};

/// Segment, classify and filter game client logs.
#[derive(Debug, Parser)]
#[command(name = "gamelog", version, about)]
pub struct Cli {
    /// Log file to read. Omit or pass `-` to read stdin.
    pub path: Option<PathBuf>,

    /// Config file (TOML)
    #[arg(long, env = "GAMELOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only records of this category (`All` keeps everything)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only records whose PID contains this text
    #[arg(short, long)]
    pub pid: Option<String>,

    /// Text searched in the raw and pretty text
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Hide records containing this text
    #[arg(short = 'x', long)]
    pub exclude: Option<String>,

    /// Read --keyword and --exclude as regular expressions
    #[arg(short, long)]
    pub regex: bool,

    /// Only records that look like failures
    #[arg(short, long)]
    pub errors_only: bool,

    /// Hide Mono / Init / Shader start-up lines
    #[arg(long)]
    pub hide_noise: bool,

    /// Match keyword and exclude patterns case-sensitively
    #[arg(long)]
    pub case_sensitive: bool,

    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Maximum records printed, 0 for all
    #[arg(short = 'n', long)]
    pub max_records: Option<usize>,

    /// Nesting limit for embedded JSON expansion
    #[arg(long)]
    pub expand_depth: Option<usize>,

    /// Print headers only
    #[arg(long)]
    pub headers_only: bool,

    /// Print the category index with counts instead of records
    #[arg(long)]
    pub categories: bool,

    /// Print classification counters after the records
    #[arg(long)]
    pub stats: bool,
}

impl Cli {
    /// Flags override whatever the file and environment set.
    pub fn apply(&self, config: &mut ViewerConfig) {
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(max) = self.max_records {
            config.output.max_records = max;
        }
        if let Some(depth) = self.expand_depth {
            config.parser.max_expand_depth = depth;
        }
        if self.headers_only {
            config.output.show_payload = false;
        }
        if self.errors_only {
            config.filter.errors_only = true;
        }
        if self.case_sensitive {
            config.filter.case_sensitive = true;
        }
    }

    pub fn query(&self, config: &ViewerConfig) -> RecordQuery {
        RecordQuery {
            category: self.category.clone(),
            pid: self.pid.clone(),
            keyword: self.keyword.clone(),
            exclude: self.exclude.clone(),
            errors_only: config.filter.errors_only,
            hide_engine_noise: self.hide_noise,
            case_sensitive: config.filter.case_sensitive,
            regex: self.regex,
        }
    }

    /// `None` means stdin.
    pub fn input_path(&self) -> Option<&std::path::Path> {
        self.path
            .as_deref()
            .filter(|p| p.as_os_str() != "-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "gamelog", "client.log", "-c", "DoType7", "-p", "42", "-e", "--format", "json", "-n",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.input_path(), Some(std::path::Path::new("client.log")));
        assert_eq!(cli.category.as_deref(), Some("DoType7"));
        assert_eq!(cli.pid.as_deref(), Some("42"));
        assert!(cli.errors_only);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.max_records, Some(5));
    }

    #[test]
    fn test_dash_means_stdin() {
        let cli = Cli::try_parse_from(["gamelog", "-"]).unwrap();
        assert!(cli.input_path().is_none());
        let cli = Cli::try_parse_from(["gamelog"]).unwrap();
        assert!(cli.input_path().is_none());
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = ViewerConfig::default();
        let cli = Cli::try_parse_from([
            "gamelog",
            "--errors-only",
            "--headers-only",
            "--expand-depth",
            "3",
        ])
        .unwrap();
        cli.apply(&mut config);

        assert!(config.filter.errors_only);
        assert!(!config.output.show_payload);
        assert_eq!(config.parser.max_expand_depth, 3);
        assert_eq!(config.output.format, OutputFormat::Text); // untouched
    }

    #[test]
    fn test_query_takes_filter_config() {
        let mut config = ViewerConfig::default();
        config.filter.case_sensitive = true;
        config.filter.errors_only = true;

        let cli = Cli::try_parse_from(["gamelog", "-k", "Sword"]).unwrap();
        let query = cli.query(&config);
        assert_eq!(
            query,
            RecordQuery::new().keyword("Sword").errors_only(true).case_sensitive(true)
        );
    }

    #[test]
    fn test_regex_flag() {
        let config = ViewerConfig::default();
        let cli = Cli::try_parse_from(["gamelog", "-k", "a|b", "--regex"]).unwrap();
        assert_eq!(cli.query(&config), RecordQuery::new().keyword("a|b").regex(true));
    }

    #[test]
    fn test_invalid_format_rejected() {
        assert!(Cli::try_parse_from(["gamelog", "--format", "yaml"]).is_err());
    }
}
