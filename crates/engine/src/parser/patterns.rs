//! Precompiled matchers shared by every classifier.
//!
//! Patterns are stateless, so one immutable [`Patterns`] value is built on
//! first use and handed out by reference.

use regex::Regex;
use std::sync::OnceLock;

/// Identifier keys, case-insensitive. `PlayerID` is covered by `playerId`.
/// The key must not follow a word character, so `xpid=1` does not match.
const PID_PATTERN: &str =
    r#"(?i)(?:^|\W)["']?(?:pid|playerId|player_id)["']?\s*[:=]\s*([0-9]+)"#;

/// `DoType<n> ... <id key>=<digits> ... data=<rest>` with `.` spanning lines.
/// The id key starts on a word boundary, same rule as [`PID_PATTERN`].
const OPCODE_PATTERN: &str = concat!(
    r#"(?is)(DoType[0-9]+)\s+.*?\b["']?(?:playerId|pid|player_id)["']?"#,
    r#"\s*[:=]\s*([0-9]+).*?data\s*=\s*(.*)"#,
);

/// Literal markers the rules and the segmenter look for.
pub struct Markers;

impl Markers {
    /// Opens a structured game-server record
    pub const STRUCTURED_RECORD: &'static str = "{\"PN\":";

    /// Two records glued together without a newline
    pub const GLUED_RECORDS: &'static str = "}{\"PN\":";

    pub const OPCODE_PREFIX: &'static str = "DoType";

    /// Dedicated RPC marker (always an RPC line)
    pub const RPC_SEND: &'static str = "SendGrpcMsg";

    /// Weaker RPC marker, only counts together with [`Markers::RPC_INFO`]
    pub const RPC_SEND_SHORT: &'static str = "SendGrpc";

    pub const RPC_INFO: &'static str = "Info:";

    pub const DETAILS: &'static str = "Details:";

    pub const DATA_SEPARATOR: &'static str = "// === SendGrpc Parsed ===";

    /// Decorations stripped from a `msg` prefix before it becomes a category
    pub const GRPC_TAG: &'static str = "[GRPC]";
}

/// Compiled regular expressions, built once.
#[derive(Debug)]
pub struct Patterns {
    pub pid: Regex,
    pub opcode: Regex,
}

impl Patterns {
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            pid: Regex::new(PID_PATTERN)?,
            opcode: Regex::new(OPCODE_PATTERN)?,
        })
    }

    /// Process-wide instance.
    #[allow(clippy::expect_used)]
    pub fn shared() -> &'static Patterns {
        static PATTERNS: OnceLock<Patterns> = OnceLock::new();
        PATTERNS.get_or_init(|| Patterns::compile().expect("built-in patterns are valid regexes"))
    }
}

/// True when `text` carries the RPC-send marker (strong form, or weak form plus `Info:`).
pub fn has_rpc_marker(text: &str) -> bool {
    text.contains(Markers::RPC_SEND)
        || (text.contains(Markers::RPC_SEND_SHORT) && text.contains(Markers::RPC_INFO))
}
