use std::sync::atomic::{AtomicU64, Ordering};

use grep_matcher::Matcher;
use grep_regex::{RegexMatcher, RegexMatcherBuilder};
use thiserror::Error;

use crate::parser::LogRecord;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Include,
    Exclude,
}

#[derive(Debug, Default)]
pub struct FilterStats {
    pub records_scanned: AtomicU64,
    pub records_matched: AtomicU64,
    pub bytes_processed: AtomicU64,
}

/// Keyword matcher over record text.
///
/// A plain word is a valid pattern, so simple keyword search and regex
/// search go through the same engine.
pub struct KeywordFilter {
    matcher: RegexMatcher,
    mode: FilterMode,
    stats: FilterStats,
}

impl KeywordFilter {
    pub fn new(pattern: &str, case_sensitive: bool, mode: FilterMode) -> Result<Self, FilterError> {
        let matcher = RegexMatcherBuilder::new()
            .case_insensitive(!case_sensitive)
            .multi_line(false)
            .build(pattern)
            .map_err(|e| FilterError::InvalidRegex(e.to_string()))?;

        Ok(Self {
            matcher,
            mode,
            stats: FilterStats::default(),
        })
    }

    #[inline]
    pub fn is_match(&self, text: &[u8]) -> bool {
        self.matcher.is_match(text).unwrap_or(false)
    }

    #[inline]
    pub fn should_include(&self, text: &[u8]) -> bool {
        self.stats.bytes_processed.fetch_add(text.len() as u64, Ordering::Relaxed);
        let matched = self.is_match(text);
        self.decide(matched)
    }

    /// Match against the raw chunk first, then the pretty payload.
    pub fn should_include_record(&self, record: &LogRecord) -> bool {
        let raw = record.raw_content.as_bytes();
        self.stats.bytes_processed.fetch_add(raw.len() as u64, Ordering::Relaxed);

        let matched = self.is_match(raw)
            || record
                .pretty_content
                .as_deref()
                .is_some_and(|pretty| self.is_match(pretty.as_bytes()));
        self.decide(matched)
    }

    fn decide(&self, matched: bool) -> bool {
        self.stats.records_scanned.fetch_add(1, Ordering::Relaxed);

        let include = match self.mode {
            FilterMode::Include => matched,
            FilterMode::Exclude => !matched,
        };

        if include {
            self.stats.records_matched.fetch_add(1, Ordering::Relaxed);
        }

        include
    }

    pub fn stats(&self) -> (u64, u64, u64) {
        (
            self.stats.records_scanned.load(Ordering::Relaxed),
            self.stats.records_matched.load(Ordering::Relaxed),
            self.stats.bytes_processed.load(Ordering::Relaxed),
        )
    }
}

impl std::fmt::Debug for KeywordFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordFilter")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
