//! Game log segmentation and classification
//!
//! Turns one fully read log dump into an ordered list of [`LogRecord`]s.
//!
//! # Architecture
//!
//! - `segment.rs`: line-based chunk segmenter
//! - `pid.rs`: player / process identifier extraction
//! - `normalize.rs`: recursive JSON re-expansion and pretty-printing
//! - `details.rs`: `Details: k=v, ...` sub-parser for RPC send logs
//! - `rules/`: one classification rule per log shape
//! - `classifier.rs`: ordered rule table, first match wins
//! - `pipeline.rs`: segment + classify a whole document
//! - `metrics.rs`: classification counters
//!
//! # Safety Guarantees
//!
//! Classification is total: every chunk yields a record. Rule errors and
//! panics are caught and downgrade the chunk to a `ParseError` record.

pub mod classifier;
pub mod details;
pub mod metrics;
pub mod model;
pub mod normalize;
pub mod patterns;
pub mod pid;
pub mod pipeline;
pub mod rules;
pub mod segment;
pub mod traits;

pub use classifier::Classifier;
pub use details::{render_details, DetailsBlock};
pub use metrics::{ClassifyMetrics, MetricsSnapshot};
pub use model::{category, format_header, LogRecord, ParseError, RuleKind, Severity};
pub use normalize::{normalize_json, JsonNormalizer, NormalizerOptions};
pub use pid::extract_pid;
pub use pipeline::Pipeline;
pub use segment::segment;
pub use traits::{ChunkContext, ClassifyRule};

/// Classify one chunk with the shared default classifier.
pub fn classify(chunk: &str, sequence_number: usize) -> LogRecord {
    Classifier::shared().classify(chunk, sequence_number)
}
