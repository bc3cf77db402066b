//! Run: parse the input, select records and write them out.

use std::io::Write;

use anyhow::Context;
use tracing::{debug, info};

use engine::{category_counts, Pipeline, RecordQuery};

use crate::conf::{OutputFormat, ViewerConfig};
use crate::render;

/// What to print besides the records themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunMode {
    /// Category index with counts instead of records
    pub categories: bool,
    /// Classification counters after the records
    pub stats: bool,
}

/// Parse `text`, apply `query` and write the result to `out`.
pub fn run<W: Write>(
    text: &str,
    config: &ViewerConfig,
    query: &RecordQuery,
    mode: RunMode,
    out: &mut W,
) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(config.normalizer_options());
    let records = pipeline.run(text);

    let compiled = query.compile().context("Invalid filter")?;
    let mut selected = compiled.apply(&records);
    let matched = selected.len();

    if mode.categories {
        let counts = category_counts(selected.iter().copied());
        render::write_categories(out, &counts, matched)?;
    } else {
        let max = config.output.max_records;
        if max > 0 && selected.len() > max {
            info!("Showing first {} of {} matching records", max, matched);
            selected.truncate(max);
        }

        match config.output.format {
            OutputFormat::Text => render::write_text(out, &selected, config.output.show_payload)?,
            OutputFormat::Json => render::write_json_lines(out, &selected)?,
        }
    }

    let snapshot = pipeline.metrics().snapshot();
    debug!(?snapshot, "classification metrics");
    if mode.stats {
        let (keyword_scanned, keyword_matched) = compiled.keyword_stats();
        let stats = render::StatsView {
            classify: &snapshot,
            keyword_scanned,
            keyword_matched,
        };
        render::write_stats(out, &stats)?;
    }

    info!(total = records.len(), matched, "Done");
    Ok(())
}
