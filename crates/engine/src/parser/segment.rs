//! Chunk segmentation: split a raw dump into one chunk per log record.
//!
//! A line opens a new chunk when its trimmed text carries a record-start
//! signature, any other non-blank line continues the current chunk. Blank
//! lines are dropped. Only leading characters are inspected, nothing is
//! parsed.

use super::patterns::Markers;

/// Prefixes that always open a record.
const RECORD_PREFIXES: &[&str] = &[
    Markers::STRUCTURED_RECORD,
    Markers::OPCODE_PREFIX,
    "[",
    "msg:",
];

/// System keywords, matched case-sensitively.
const SYSTEM_PREFIXES: &[&str] = &["Mono", "Init", "Shader", "Crash"];

/// System keywords, matched ignoring ASCII case.
const FAILURE_PREFIXES: &[&str] = &["error", "exception"];

/// Split `raw` into record chunks, in input order.
pub fn segment(raw: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    if raw.is_empty() {
        return chunks;
    }

    let text = repair_glued_records(&raw.replace("\r\n", "\n"));
    let mut current = String::new();

    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_record_start(trimmed) && !current.is_empty() {
            tracing::trace!(lines = current.lines().count(), "segment: closing chunk");
            chunks.push(std::mem::take(&mut current));
        } else if !current.is_empty() {
            current.push('\n');
        }
        // Lines before the first signature still form a chunk of their own
        current.push_str(line);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    tracing::debug!(chunks = chunks.len(), bytes = raw.len(), "segment: done");
    chunks
}

/// Put a line break between records emitted back to back (`}{"PN":`).
fn repair_glued_records(text: &str) -> String {
    text.replace(Markers::GLUED_RECORDS, "}\n{\"PN\":")
}

/// Record-start signature check on an already trimmed line.
pub fn is_record_start(trimmed: &str) -> bool {
    RECORD_PREFIXES.iter().any(|p| trimmed.starts_with(p))
        || SYSTEM_PREFIXES.iter().any(|p| trimmed.starts_with(p))
        || FAILURE_PREFIXES.iter().any(|p| starts_with_ignore_case(trimmed, p))
        || is_timestamp_led(trimmed)
}

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

/// Four leading ASCII digits followed by at least one more character
/// (`2026-02-01 ...`).
fn is_timestamp_led(trimmed: &str) -> bool {
    let bytes = trimmed.as_bytes();
    trimmed.chars().count() > 4 && bytes[..4].iter().all(u8::is_ascii_digit)
}
