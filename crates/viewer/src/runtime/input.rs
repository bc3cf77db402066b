//! Input: read a whole log file (or stdin) as text.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;

/// Read everything. Invalid UTF-8 sequences become U+FFFD so that
/// partially corrupted dumps still parse.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    let bytes = match path {
        Some(path) => fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let text = decode(bytes);
    tracing::debug!(bytes = text.len(), "input: loaded");
    Ok(text)
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                "input: invalid UTF-8 at byte {}, decoding lossily",
                e.utf8_error().valid_up_to()
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}
