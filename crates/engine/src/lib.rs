pub mod filter;
pub mod parser;

pub use filter::{category_counts, category_index, FilterError, RecordQuery};
pub use parser::{
    classify, segment, Classifier, LogRecord, NormalizerOptions, ParseError, Pipeline, Severity,
};
