use crate::parser::traits::*;

/// Fallback: keeps the `System` tag and shows the chunk as is.
pub struct SystemRule;

impl ClassifyRule for SystemRule {
    fn matches(&self, _ctx: &ChunkContext<'_>) -> bool {
        true
    }

    fn apply(&self, ctx: &ChunkContext<'_>) -> Result<Outcome, ParseError> {
        Ok(Outcome::default().with_payload(ctx.raw))
    }

    fn kind(&self) -> RuleKind {
        RuleKind::System
    }
}
