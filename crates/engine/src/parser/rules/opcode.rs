use crate::parser::traits::*;

/// `DoType<n> <...> playerId=<id> <...> data=<json>` lines.
///
/// The opcode token becomes the category and the identifier captured next to
/// it replaces the one found by the blanket scan.
pub struct OpcodeRule;

impl ClassifyRule for OpcodeRule {
    fn matches(&self, ctx: &ChunkContext<'_>) -> bool {
        ctx.patterns.opcode.is_match(ctx.trimmed)
    }

    fn apply(&self, ctx: &ChunkContext<'_>) -> Result<Outcome, ParseError> {
        let caps = ctx
            .patterns
            .opcode
            .captures(ctx.trimmed)
            .ok_or(ParseError::RuleMismatch(RuleKind::Opcode.as_str()))?;

        let opcode = caps.get(1).map_or("", |m| m.as_str()).trim();
        let pid = caps.get(2).map_or("", |m| m.as_str());
        let payload = caps.get(3).map_or("", |m| m.as_str());

        Ok(Outcome::new(opcode)
            .with_process_id(pid)
            .with_payload(ctx.normalizer.normalize(cut_after_last_brace(payload))))
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Opcode
    }
}

/// Drop whatever trails the last `}` (log suffixes after the payload).
fn cut_after_last_brace(payload: &str) -> &str {
    match payload.rfind('}') {
        Some(end) => &payload[..=end],
        None => payload,
    }
}
