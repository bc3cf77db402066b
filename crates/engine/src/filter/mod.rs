//! Record selection for display.
//!
//! - `engine.rs`: grep-regex keyword matcher with include / exclude modes
//! - `presets.rs`: well-known game log patterns
//! - `query.rs`: combined category / pid / keyword / failure query
//! - `catalog.rs`: category listings for pickers and summaries

pub mod catalog;
pub mod engine;
pub mod presets;
pub mod query;

pub use catalog::{category_counts, category_index};
pub use engine::{FilterError, FilterMode, KeywordFilter};
pub use query::{CompiledQuery, RecordQuery, ALL_CATEGORIES};
