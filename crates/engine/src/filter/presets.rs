//! Pre-built keyword patterns and convenience builders on top of
//! [`KeywordFilter`].

use crate::filter::engine::{FilterError, FilterMode, KeywordFilter};

/// Well-known game log patterns.
pub struct Presets;

impl Presets {
    /// Failure words in a record's text (case-insensitive).
    pub const FAILURE: &'static str = r"(?i)(error|exception|nullreference|fail)";

    /// Failure words in a category tag (case-insensitive).
    pub const FAILURE_CATEGORY: &'static str = r"(?i)(error|exception)";

    /// Unity engine start-up noise.
    pub const ENGINE_NOISE: &'static str = r"^\s*(Mono|Init|Shader)";
}

/// Records whose text mentions a failure.
pub fn errors_only() -> Result<KeywordFilter, FilterError> {
    KeywordFilter::new(Presets::FAILURE, false, FilterMode::Include)
}

pub fn error_categories() -> Result<KeywordFilter, FilterError> {
    KeywordFilter::new(Presets::FAILURE_CATEGORY, false, FilterMode::Include)
}

/// Hide engine start-up lines.
pub fn hide_engine_noise() -> Result<KeywordFilter, FilterError> {
    KeywordFilter::new(Presets::ENGINE_NOISE, true, FilterMode::Exclude)
}
