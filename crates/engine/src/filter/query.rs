use serde::{Deserialize, Serialize};

use super::engine::{FilterError, FilterMode, KeywordFilter};
use super::presets;
use crate::parser::LogRecord;

/// Category value that disables the category condition.
pub const ALL_CATEGORIES: &str = "All";

/// Record selection. Every condition that is set must hold.
///
/// Empty strings count as unset, so values can come straight from text
/// inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordQuery {
    /// Exact category, compared ignoring case. `All` matches everything.
    pub category: Option<String>,

    /// Substring of the record's process id
    pub pid: Option<String>,

    /// Text searched in the raw chunk and the pretty payload
    pub keyword: Option<String>,

    /// Text that hides matching records
    pub exclude: Option<String>,

    /// Read `keyword` and `exclude` as regular expressions instead of
    /// literal text
    pub regex: bool,

    /// Only records that look like failures
    pub errors_only: bool,

    /// Drop `Mono` / `Init` / `Shader` start-up lines
    pub hide_engine_noise: bool,

    /// Applies to `keyword` and `exclude`
    pub case_sensitive: bool,
}

impl RecordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn pid(mut self, pid: impl Into<String>) -> Self {
        self.pid = Some(pid.into());
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(pattern.into());
        self
    }

    pub fn errors_only(mut self, on: bool) -> Self {
        self.errors_only = on;
        self
    }

    pub fn hide_engine_noise(mut self, on: bool) -> Self {
        self.hide_engine_noise = on;
        self
    }

    pub fn case_sensitive(mut self, on: bool) -> Self {
        self.case_sensitive = on;
        self
    }

    pub fn regex(mut self, on: bool) -> Self {
        self.regex = on;
        self
    }

    /// True when no condition is set.
    pub fn is_empty(&self) -> bool {
        let any_category = match set(&self.category) {
            Some(c) => c.eq_ignore_ascii_case(ALL_CATEGORIES),
            None => true,
        };

        any_category
            && set(&self.pid).is_none()
            && set(&self.keyword).is_none()
            && set(&self.exclude).is_none()
            && !self.errors_only
            && !self.hide_engine_noise
    }

    /// Build the matchers. Fails only on an invalid keyword or exclude
    /// pattern, which needs `regex` to be set.
    pub fn compile(&self) -> Result<CompiledQuery, FilterError> {
        let keyword = set(&self.keyword)
            .map(|p| self.text_filter(p, FilterMode::Include))
            .transpose()?;
        let exclude = set(&self.exclude)
            .map(|p| self.text_filter(p, FilterMode::Exclude))
            .transpose()?;

        let failures = if self.errors_only {
            Some(FailureMatchers {
                category: presets::error_categories()?,
                text: presets::errors_only()?,
            })
        } else {
            None
        };

        let noise = if self.hide_engine_noise {
            Some(presets::hide_engine_noise()?)
        } else {
            None
        };

        Ok(CompiledQuery {
            category: set(&self.category)
                .filter(|c| !c.eq_ignore_ascii_case(ALL_CATEGORIES))
                .map(str::to_string),
            pid: set(&self.pid).map(str::to_string),
            keyword,
            exclude,
            failures,
            noise,
        })
    }

    fn text_filter(&self, text: &str, mode: FilterMode) -> Result<KeywordFilter, FilterError> {
        if self.regex {
            KeywordFilter::new(text, self.case_sensitive, mode)
        } else {
            KeywordFilter::new(&regex::escape(text), self.case_sensitive, mode)
        }
    }
}

fn set(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

struct FailureMatchers {
    category: KeywordFilter,
    text: KeywordFilter,
}

/// A [`RecordQuery`] with its patterns compiled.
pub struct CompiledQuery {
    category: Option<String>,
    pid: Option<String>,
    keyword: Option<KeywordFilter>,
    exclude: Option<KeywordFilter>,
    failures: Option<FailureMatchers>,
    noise: Option<KeywordFilter>,
}

impl CompiledQuery {
    pub fn matches(&self, record: &LogRecord) -> bool {
        if let Some(category) = &self.category {
            if !record.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }

        if let Some(pid) = &self.pid {
            if !record.process_id.contains(pid.as_str()) {
                return false;
            }
        }

        if let Some(failures) = &self.failures {
            let failed = failures.category.is_match(record.category.as_bytes())
                || failures.text.is_match(record.raw_content.as_bytes());
            if !failed {
                return false;
            }
        }

        if let Some(noise) = &self.noise {
            if !noise.should_include(record.raw_content.as_bytes()) {
                return false;
            }
        }

        if let Some(exclude) = &self.exclude {
            if !exclude.should_include_record(record) {
                return false;
            }
        }

        match &self.keyword {
            Some(keyword) => keyword.should_include_record(record),
            None => true,
        }
    }

    /// Matching records, in their original order.
    pub fn apply<'a>(&self, records: &'a [LogRecord]) -> Vec<&'a LogRecord> {
        let selected: Vec<&LogRecord> = records.iter().filter(|r| self.matches(r)).collect();
        tracing::debug!(
            total = records.len(),
            selected = selected.len(),
            "query: records filtered"
        );
        selected
    }

    /// `(scanned, matched)` for the keyword pattern, zeros when unset.
    pub fn keyword_stats(&self) -> (u64, u64) {
        self.keyword
            .as_ref()
            .map(|k| {
                let (scanned, matched, _) = k.stats();
                (scanned, matched)
            })
            .unwrap_or((0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Pipeline;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"Mono path[0] = 'Managed'
DoType7 playerId=42 data={"item":"sword"}
DoType8 playerId=421 data={"item":"shield"}
Exception: NullReferenceException at Foo
[Net] login failed for pid=42
{"PN":1,"msg":"[GRPC] LoginAck: {\"ok\":true}"}
"#;

    fn records() -> Vec<LogRecord> {
        Pipeline::default().run(SAMPLE)
    }

    fn seqs(query: RecordQuery) -> Vec<usize> {
        let records = records();
        let compiled = query.compile().unwrap();
        compiled
            .apply(&records)
            .iter()
            .map(|r| r.sequence_number)
            .collect()
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        assert!(RecordQuery::new().is_empty());
        assert!(RecordQuery::new().category("All").pid("  ").is_empty());
        assert_eq!(seqs(RecordQuery::new()), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_category_ignores_case() {
        assert_eq!(seqs(RecordQuery::new().category("dotype7")), vec![2]);
        assert_eq!(seqs(RecordQuery::new().category("ALL")), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_pid_is_substring() {
        assert_eq!(seqs(RecordQuery::new().pid("42")), vec![2, 3, 5]);
        assert_eq!(seqs(RecordQuery::new().pid("421")), vec![3]);
    }

    #[test]
    fn test_keyword_searches_pretty_and_raw() {
        assert_eq!(seqs(RecordQuery::new().keyword("SHIELD")), vec![3]);
        assert_eq!(
            seqs(RecordQuery::new().keyword("SHIELD").case_sensitive(true)),
            Vec::<usize>::new()
        );
        // `"ok": true` only appears in the normalized payload
        assert_eq!(seqs(RecordQuery::new().keyword(r#""ok": true"#)), vec![6]);
    }

    #[test]
    fn test_errors_only() {
        assert_eq!(seqs(RecordQuery::new().errors_only(true)), vec![4, 5]);
    }

    #[test]
    fn test_exclude_and_noise() {
        assert_eq!(seqs(RecordQuery::new().exclude("DoType")), vec![1, 4, 5, 6]);
        assert_eq!(seqs(RecordQuery::new().hide_engine_noise(true)), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_conditions_are_anded() {
        let query = RecordQuery::new().pid("42").errors_only(true);
        assert_eq!(seqs(query), vec![5]);
    }

    #[test]
    fn test_keyword_is_literal_by_default() {
        assert_eq!(seqs(RecordQuery::new().keyword("data={")), vec![2, 3]);
        assert_eq!(seqs(RecordQuery::new().keyword("path[0]")), vec![1]);
        assert_eq!(seqs(RecordQuery::new().keyword("(x")), Vec::<usize>::new());
        assert_eq!(seqs(RecordQuery::new().exclude("[Net]")), vec![1, 2, 3, 4, 6]);
    }

    #[test]
    fn test_regex_keyword() {
        assert_eq!(seqs(RecordQuery::new().keyword("sword|shield").regex(true)), vec![2, 3]);
        assert_eq!(seqs(RecordQuery::new().keyword("sword|shield")), Vec::<usize>::new());
    }

    #[test]
    fn test_invalid_keyword() {
        assert!(matches!(
            RecordQuery::new().keyword("(unclosed").regex(true).compile(),
            Err(FilterError::InvalidRegex(_))
        ));
    }

    #[test]
    fn test_keyword_stats() {
        let records = records();
        let compiled = RecordQuery::new().keyword("sword").compile().unwrap();
        compiled.apply(&records);
        assert_eq!(compiled.keyword_stats(), (6, 1));
    }

    #[test]
    fn test_query_from_json() {
        let query: RecordQuery = serde_json::from_str(r#"{"pid":"7","errors_only":true}"#).unwrap();
        assert_eq!(query, RecordQuery::new().pid("7").errors_only(true));
    }
}
