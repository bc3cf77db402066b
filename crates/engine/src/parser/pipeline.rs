use std::collections::BTreeMap;
use std::time::Instant;

use super::classifier::Classifier;
use super::metrics::{ClassifyMetrics, MetricErrorType};
use super::model::LogRecord;
use super::normalize::NormalizerOptions;
use super::segment::segment;

/// Segment a whole document and classify every chunk in order.
pub struct Pipeline {
    classifier: Classifier,
    metrics: ClassifyMetrics,
}

impl Pipeline {
    pub fn new(options: NormalizerOptions) -> Self {
        Self::with_classifier(Classifier::with_options(options))
    }

    pub fn with_classifier(classifier: Classifier) -> Self {
        tracing::debug!(rules = ?classifier.rule_kinds(), "pipeline: rule order");
        Self {
            classifier,
            metrics: ClassifyMetrics::new(),
        }
    }

    /// Records in input order, numbered from 1. Never fails: chunks that
    /// cannot be classified come back as `ParseError` records.
    pub fn run(&self, raw: &str) -> Vec<LogRecord> {
        let started = Instant::now();
        let chunks = segment(raw);

        let records: Vec<LogRecord> = chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| self.classify_timed(chunk, i + 1))
            .collect();

        self.metrics.record_document();

        if tracing::enabled!(tracing::Level::INFO) {
            let mut per_category: BTreeMap<&str, usize> = BTreeMap::new();
            for record in &records {
                *per_category.entry(record.category.as_str()).or_default() += 1;
            }
            tracing::info!(
                chunks = records.len(),
                categories = per_category.len(),
                parse_errors = records.iter().filter(|r| r.is_parse_error()).count(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "pipeline: document parsed"
            );
        }

        records
    }

    fn classify_timed(&self, chunk: &str, sequence_number: usize) -> LogRecord {
        let started = Instant::now();
        let (record, decision) = self.classifier.classify_detailed(chunk, sequence_number);
        let nanos = started.elapsed().as_nanos() as u64;

        match decision {
            Ok(kind) => self.metrics.record_rule(kind, nanos),
            Err(ref e) => self.metrics.record_error(MetricErrorType::from(e), nanos),
        }
        record
    }

    pub fn metrics(&self) -> &ClassifyMetrics {
        &self.metrics
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(NormalizerOptions::default())
    }
}
