//! Structured-block sub-parser.
//!
//! RPC send logs describe their payload as text rather than JSON:
//!
//! ```text
//! WarId=9, Pid=77 SendGrpcMsg Info: GoldDashWarItem Details: id=1, val=abc
//! GoldDashWarItem Details: id=2, val=xyz
//! ```
//!
//! Every `... Details: k=v, k=v` line becomes one ordered record. The text in
//! front of `Info:` is kept as a header.

use serde::Serialize;
use serde_json::{Map, Number, Value};

use super::model::ParseError;
use super::patterns::Markers;

/// Records reconstructed from a block of `Details:` lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailsBlock {
    /// Free text in front of the `Info:` marker
    #[serde(rename = "_Header")]
    pub header: String,

    #[serde(rename = "Items")]
    pub items: Vec<Map<String, Value>>,

    #[serde(rename = "_ItemCount")]
    pub item_count: usize,
}

impl DetailsBlock {
    /// Parse `text` split at its first `Info:` marker.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let info = text
            .find(Markers::RPC_INFO)
            .ok_or(ParseError::MissingInfoMarker)?;

        let header = text[..info].trim();
        let body = text[info + Markers::RPC_INFO.len()..].trim();
        Ok(Self::from_parts(header, body))
    }

    /// Build a block from an already split header and body.
    ///
    /// Literal `\n` escape sequences in the body are treated as line breaks.
    pub fn from_parts(header: &str, body: &str) -> Self {
        let body = body.replace("\\n", "\n");
        let items: Vec<_> = body.lines().filter_map(parse_details_line).collect();

        Self {
            header: header.to_string(),
            item_count: items.len(),
            items,
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, ParseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse one `<label> Details: k=v, ...` line. `None` when the line has no
/// `Details:` marker.
pub fn parse_details_line(line: &str) -> Option<Map<String, Value>> {
    let line = line.trim();
    let at = line.find(Markers::DETAILS)?;
    let fields = line[at + Markers::DETAILS.len()..].trim();

    let mut record = Map::new();
    for field in fields.split(',') {
        // Values may contain '=', only the first one splits
        let Some((key, value)) = field.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        record.insert(key.to_string(), typed_value(value.trim()));
    }
    Some(record)
}

/// Integers become JSON numbers, everything else stays a string.
fn typed_value(raw: &str) -> Value {
    match raw.parse::<i64>() {
        Ok(n) => Value::Number(Number::from(n)),
        Err(_) => Value::String(raw.to_string()),
    }
}

/// Render the block for display, falling back to the untouched text.
pub fn render_details(text: &str) -> String {
    match DetailsBlock::parse(text).and_then(|block| block.to_pretty_json()) {
        Ok(rendered) => rendered,
        Err(e) => {
            tracing::debug!(error = %e, "details: falling back to raw text");
            text.to_string()
        }
    }
}
