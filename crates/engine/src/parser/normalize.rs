//! JSON normalizer.
//!
//! Game-server transports often serialize an inner payload into a string
//! field of the outer envelope, sometimes behind a free-text prefix
//! (`"recv ack {\"seq\":4}"`). The normalizer parses the outer document and
//! re-expands such strings into real JSON so the whole tree can be
//! pretty-printed and browsed.

use serde_json::{Map, Value};

use super::model::ParseError;

/// Default limit for nested re-expansion.
pub const DEFAULT_MAX_EXPAND_DEPTH: usize = 64;

/// Key holding the free-text prefix of a partially embedded document
pub const DESC_KEY: &str = "_desc";

/// Key holding the embedded document itself
pub const DATA_KEY: &str = "_data";

#[derive(Debug, Clone, Copy)]
pub struct NormalizerOptions {
    /// Containers nested deeper than this are copied through without looking
    /// for embedded JSON in their strings.
    pub max_expand_depth: usize,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            max_expand_depth: DEFAULT_MAX_EXPAND_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JsonNormalizer {
    options: NormalizerOptions,
}

impl JsonNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: NormalizerOptions) -> Self {
        Self { options }
    }

    /// Pretty-print `input` with embedded JSON expanded, or return it
    /// unchanged when it is not JSON.
    pub fn normalize(&self, input: &str) -> String {
        self.try_normalize(input).unwrap_or_else(|_| input.to_string())
    }

    pub fn try_normalize(&self, input: &str) -> Result<String, ParseError> {
        let value: Value = serde_json::from_str(input)?;
        let expanded = self.expand(value);
        Ok(serde_json::to_string_pretty(&expanded)?)
    }

    /// Expand every string leaf that carries embedded JSON.
    pub fn expand(&self, value: Value) -> Value {
        self.expand_at(value, 0)
    }

    fn expand_at(&self, value: Value, depth: usize) -> Value {
        if depth >= self.options.max_expand_depth {
            return value;
        }

        match value {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, self.expand_at(v, depth + 1)))
                    .collect(),
            ),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|v| self.expand_at(v, depth + 1))
                    .collect(),
            ),
            Value::String(s) => match self.expand_string(&s, depth) {
                Some(expanded) => expanded,
                None => Value::String(s),
            },
            scalar => scalar,
        }
    }

    fn expand_string(&self, s: &str, depth: usize) -> Option<Value> {
        let trimmed = s.trim();

        // Whole string is a document of its own. Scalars stay strings so
        // that ids like "123" are not turned into numbers.
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            if let Ok(inner) = serde_json::from_str::<Value>(trimmed) {
                if inner.is_object() || inner.is_array() {
                    return Some(self.expand_at(inner, depth + 1));
                }
            }
        }

        // Document embedded after a text prefix
        let first = s.find('{')?;
        let last = s.rfind('}')?;
        if last <= first {
            return None;
        }

        let inner: Value = serde_json::from_str(&s[first..=last]).ok()?;
        let mut wrapper = Map::new();
        let prefix = s[..first].trim();
        if !prefix.is_empty() {
            wrapper.insert(DESC_KEY.to_string(), Value::String(prefix.to_string()));
        }
        wrapper.insert(DATA_KEY.to_string(), self.expand_at(inner, depth + 1));
        Some(Value::Object(wrapper))
    }
}

/// Normalize with default options.
pub fn normalize_json(input: &str) -> String {
    JsonNormalizer::new().normalize(input)
}
