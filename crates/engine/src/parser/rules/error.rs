use crate::parser::traits::*;

use crate::parser::model::category;

const FAILURE_WORDS: &[&str] = &["error", "exception"];

/// Any chunk mentioning an error or exception, anywhere, in any case.
pub struct ErrorRule;

impl ClassifyRule for ErrorRule {
    fn matches(&self, ctx: &ChunkContext<'_>) -> bool {
        FAILURE_WORDS
            .iter()
            .any(|word| contains_ignore_ascii_case(ctx.raw, word))
    }

    fn apply(&self, ctx: &ChunkContext<'_>) -> Result<Outcome, ParseError> {
        Ok(Outcome::new(category::ERROR).with_payload(ctx.raw))
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Error
    }
}

pub(crate) fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return true;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|w| w.eq_ignore_ascii_case(needle))
}
