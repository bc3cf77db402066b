use serde::Serialize;
use thiserror::Error;

/// Category tags emitted by the built-in rules.
///
/// Opcode records use the opcode token itself (`DoType7`) and JSON records may
/// use the prefix found inside `msg`, so a category is a free-form string and
/// these are only the fixed ones.
pub mod category {
    pub const SYSTEM: &str = "System";
    pub const JSON_LOG: &str = "JsonLog";
    pub const JSON_RAW: &str = "JsonRaw";
    pub const SEND_GRPC: &str = "SendGrpc";
    pub const ERROR: &str = "Error";
    pub const PARSE_ERROR: &str = "ParseError";
}

/// Which classification rule produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// `DoType<n> ... playerId=.. data={...}` opcode lines
    Opcode,
    /// SendGrpc text blocks with `Details:` lines
    RpcSend,
    /// Chunks that start with a JSON object
    Json,
    /// Anything mentioning an error or exception
    Error,
    /// Fallback (always matches)
    System,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Opcode => "opcode",
            RuleKind::RpcSend => "rpc_send",
            RuleKind::Json => "json",
            RuleKind::Error => "error",
            RuleKind::System => "system",
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("JSON root is not an object")]
    NotAnObject,

    #[error("Missing `Info:` marker")]
    MissingInfoMarker,

    #[error("Rule {0} claimed a chunk it cannot parse")]
    RuleMismatch(&'static str),

    #[error("Rule panicked: {0}")]
    RulePanic(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::InvalidJson(err.to_string())
    }
}

/// One classified log record. Built once per chunk and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// 1-based position in the parsed stream
    pub sequence_number: usize,

    /// Classification tag, never empty
    pub category: String,

    /// Player / process identifier, empty when none was found
    pub process_id: String,

    /// `[#<seq>] [<category>] [PID:<pid>]`
    pub header: String,

    /// Human-formatted payload. `None` means consumers fall back to `raw_content`.
    pub pretty_content: Option<String>,

    /// Original chunk text, verbatim
    pub raw_content: String,
}

impl LogRecord {
    pub(crate) fn new(
        sequence_number: usize,
        category: impl Into<String>,
        process_id: impl Into<String>,
        pretty_content: Option<String>,
        raw_content: impl Into<String>,
    ) -> Self {
        let category = category.into();
        let process_id = process_id.into();
        let header = format_header(sequence_number, &category, &process_id);
        Self {
            sequence_number,
            category,
            process_id,
            header,
            pretty_content,
            raw_content: raw_content.into(),
        }
    }

    /// Record for a chunk whose classification failed.
    pub(crate) fn parse_error(sequence_number: usize, process_id: &str, raw: &str) -> Self {
        Self::new(
            sequence_number,
            category::PARSE_ERROR,
            process_id,
            Some(raw.to_string()),
            raw,
        )
    }

    /// Text to show for this record: the pretty payload, or the raw chunk.
    pub fn display_payload(&self) -> &str {
        self.pretty_content.as_deref().unwrap_or(&self.raw_content)
    }

    pub fn is_parse_error(&self) -> bool {
        self.category == category::PARSE_ERROR
    }

    pub fn severity(&self) -> Severity {
        Severity::of(&self.category)
    }
}

/// Display hint for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// `Error`, `ParseError` and anything else naming an error
    Error,
    /// Engine chatter (`System`)
    Muted,
    Highlight,
}

impl Severity {
    pub fn of(category: &str) -> Self {
        if category.contains("Error") {
            Severity::Error
        } else if category == self::category::SYSTEM {
            Severity::Muted
        } else {
            Severity::Highlight
        }
    }
}

pub fn format_header(sequence_number: usize, category: &str, process_id: &str) -> String {
    if process_id.is_empty() {
        format!("[#{}] [{}]", sequence_number, category)
    } else {
        format!("[#{}] [{}] [PID:{}]", sequence_number, category, process_id)
    }
}

/// What a rule hands back to the classifier.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    /// Category override. `None` keeps the default `System` tag.
    pub category: Option<String>,

    /// Identifier override, used when the rule found a more specific one
    pub process_id: Option<String>,

    pub pretty_content: Option<String>,
}

impl Outcome {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Default::default()
        }
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.pretty_content = Some(payload.into());
        self
    }

    pub fn with_process_id(mut self, pid: impl Into<String>) -> Self {
        let pid = pid.into();
        if !pid.is_empty() {
            self.process_id = Some(pid);
        }
        self
    }
}
