use serde_json::Value;

use crate::parser::details::render_details;
use crate::parser::model::category;
use crate::parser::patterns::{has_rpc_marker, Markers};
use crate::parser::pid::extract_pid_with;
use crate::parser::traits::*;

/// Chunks that start with a JSON object, usually `{"PN":..,"msg":".."}`
/// envelopes from the game server.
///
/// The `msg` field drives the category: an RPC send marker makes it a
/// `SendGrpc` record, otherwise the text in front of the first `{` inside
/// `msg` names the event.
pub struct JsonRule;

impl ClassifyRule for JsonRule {
    fn matches(&self, ctx: &ChunkContext<'_>) -> bool {
        ctx.trimmed.starts_with('{')
    }

    fn apply(&self, ctx: &ChunkContext<'_>) -> Result<Outcome, ParseError> {
        let root: Value = match serde_json::from_str(ctx.trimmed) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "json rule: chunk is not valid JSON");
                return Ok(Outcome::new(category::JSON_RAW).with_payload(ctx.trimmed));
            }
        };

        let msg = match root.as_object() {
            Some(obj) => obj.get("msg").map(message_text).unwrap_or_default(),
            None => return Ok(Outcome::new(category::JSON_RAW).with_payload(ctx.trimmed)),
        };
        let pretty = serde_json::to_string_pretty(&ctx.normalizer.expand(root))?;

        let mut outcome = if has_rpc_marker(&msg) {
            let parsed = render_details(&msg);
            Outcome::new(category::SEND_GRPC).with_payload(format!(
                "{}\n\n{}\n{}",
                pretty,
                Markers::DATA_SEPARATOR,
                parsed
            ))
        } else {
            Outcome::new(category_from_msg(&msg)).with_payload(pretty)
        };

        // An identifier inside msg beats the one found in the envelope
        let inner_pid = extract_pid_with(ctx.patterns, &msg);
        if !inner_pid.is_empty() {
            outcome = outcome.with_process_id(inner_pid);
        }
        Ok(outcome)
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Json
    }
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// `"[GRPC] LoginAck: {...}"` → `LoginAck`. Falls back to `JsonLog`.
fn category_from_msg(msg: &str) -> String {
    let prefix = match msg.find('{') {
        Some(brace) if brace > 0 => msg[..brace].trim(),
        _ => return category::JSON_LOG.to_string(),
    };

    let cleaned = prefix.replace(Markers::GRPC_TAG, "").replace(':', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        category::JSON_LOG.to_string()
    } else {
        cleaned.to_string()
    }
}
