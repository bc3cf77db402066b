//! Render: text and JSON-lines output for classified records.

use std::io::{self, Write};

use serde::Serialize;

use engine::parser::MetricsSnapshot;
use engine::{LogRecord, Severity};

/// A record plus its display hint, as written in JSON mode.
#[derive(Debug, Serialize)]
pub struct RecordView<'a> {
    #[serde(flatten)]
    pub record: &'a LogRecord,
    pub severity: Severity,
}

impl<'a> From<&'a LogRecord> for RecordView<'a> {
    fn from(record: &'a LogRecord) -> Self {
        Self {
            record,
            severity: record.severity(),
        }
    }
}

fn marker(severity: Severity) -> char {
    match severity {
        Severity::Error => '!',
        Severity::Muted => ' ',
        Severity::Highlight => '*',
    }
}

/// Header line per record, payload indented under it when requested.
pub fn write_text<W: Write>(
    out: &mut W,
    records: &[&LogRecord],
    show_payload: bool,
) -> io::Result<()> {
    for record in records {
        writeln!(out, "{} {}", marker(record.severity()), record.header)?;
        if show_payload {
            for line in record.display_payload().lines() {
                writeln!(out, "    {}", line)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

/// One JSON object per line.
pub fn write_json_lines<W: Write>(out: &mut W, records: &[&LogRecord]) -> io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, &RecordView::from(*record))?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_categories<W: Write>(
    out: &mut W,
    counts: &[(String, usize)],
    total: usize,
) -> io::Result<()> {
    writeln!(out, "{:>6}  All", total)?;
    for (category, count) in counts {
        writeln!(out, "{:>6}  {}", count, category)?;
    }
    Ok(())
}

/// Classification counters plus keyword hit counts, as printed by `--stats`.
#[derive(Debug, Serialize)]
pub struct StatsView<'a> {
    #[serde(flatten)]
    pub classify: &'a MetricsSnapshot,
    pub keyword_scanned: u64,
    pub keyword_matched: u64,
}

pub fn write_stats<W: Write>(out: &mut W, stats: &StatsView<'_>) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, stats)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Pipeline;
    use pretty_assertions::assert_eq;

    fn render_text(input: &str, show_payload: bool) -> String {
        let records = Pipeline::default().run(input);
        let refs: Vec<&LogRecord> = records.iter().collect();
        let mut out = Vec::new();
        write_text(&mut out, &refs, show_payload).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_headers_only() {
        let text = render_text("Init a\nError b\nDoType1 pid=4 data={}", false);
        assert_eq!(
            text,
            "  [#1] [System]\n! [#2] [Error]\n* [#3] [DoType1] [PID:4]\n"
        );
    }

    #[test]
    fn test_text_with_payload() {
        let text = render_text(r#"DoType1 pid=4 data={"a":1}"#, true);
        assert_eq!(text, "* [#1] [DoType1] [PID:4]\n    {\n      \"a\": 1\n    }\n\n");
    }

    #[test]
    fn test_json_lines() {
        let records = Pipeline::default().run("Init a\nError b");
        let refs: Vec<&LogRecord> = records.iter().collect();
        let mut out = Vec::new();
        write_json_lines(&mut out, &refs).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["category"], "System");
        assert_eq!(lines[0]["severity"], "muted");
        assert_eq!(lines[1]["sequenceNumber"], 2);
        assert_eq!(lines[1]["severity"], "error");
        assert_eq!(lines[1]["rawContent"], "Error b");
    }

    #[test]
    fn test_categories() {
        let mut out = Vec::new();
        write_categories(&mut out, &[("Error".into(), 1), ("System".into(), 2)], 3).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "     3  All\n     1  Error\n     2  System\n"
        );
    }
}
