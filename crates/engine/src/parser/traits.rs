pub use super::model::{LogRecord, Outcome, ParseError, RuleKind};
use super::normalize::JsonNormalizer;
use super::patterns::Patterns;

/// Everything a rule may look at for one chunk.
pub struct ChunkContext<'a> {
    /// Chunk exactly as segmented
    pub raw: &'a str,
    /// `raw` without surrounding whitespace, what most rules test against
    pub trimmed: &'a str,
    pub patterns: &'a Patterns,
    pub normalizer: &'a JsonNormalizer,
}

impl<'a> ChunkContext<'a> {
    pub fn new(raw: &'a str, patterns: &'a Patterns, normalizer: &'a JsonNormalizer) -> Self {
        Self {
            raw,
            trimmed: raw.trim(),
            patterns,
            normalizer,
        }
    }
}

/// One entry of the ordered classification table.
pub trait ClassifyRule: Send + Sync {
    /// Does this rule claim the chunk? Must be cheap and side-effect free.
    fn matches(&self, ctx: &ChunkContext<'_>) -> bool;

    /// Build the outcome for a chunk this rule claimed
    fn apply(&self, ctx: &ChunkContext<'_>) -> Result<Outcome, ParseError>;

    fn kind(&self) -> RuleKind;
}
