use crate::parser::details::render_details;
use crate::parser::patterns::has_rpc_marker;
use crate::parser::traits::*;

use crate::parser::model::category;

/// Plain-text RPC send logs carrying `Details:` blocks.
///
/// JSON envelopes are left to [`JsonRule`](super::JsonRule), which looks for
/// the marker inside `msg`.
pub struct RpcSendRule;

impl ClassifyRule for RpcSendRule {
    fn matches(&self, ctx: &ChunkContext<'_>) -> bool {
        !ctx.trimmed.starts_with('{') && has_rpc_marker(ctx.trimmed)
    }

    fn apply(&self, ctx: &ChunkContext<'_>) -> Result<Outcome, ParseError> {
        // Identifier comes from the blanket scan of the whole chunk
        Ok(Outcome::new(category::SEND_GRPC).with_payload(render_details(ctx.trimmed)))
    }

    fn kind(&self) -> RuleKind {
        RuleKind::RpcSend
    }
}
