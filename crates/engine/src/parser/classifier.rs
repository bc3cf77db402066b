use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::OnceLock;

use super::model::category;
use super::normalize::{JsonNormalizer, NormalizerOptions};
use super::patterns::Patterns;
use super::pid::extract_pid_with;
use super::rules::*;
use super::traits::*;

/// Ordered rule table, first match wins.
///
/// 1. Identifier pass over the whole chunk (blanket pid)
/// 2. Walk the rules top to bottom until one claims the chunk
/// 3. Merge the rule outcome over the defaults and build the record
///
/// Whatever a rule does, the chunk still yields a record: errors and panics
/// downgrade it to `ParseError`.
pub struct Classifier {
    rules: Vec<Box<dyn ClassifyRule>>,
    patterns: &'static Patterns,
    normalizer: JsonNormalizer,
}

impl Classifier {
    pub fn new() -> Self {
        Self::with_options(NormalizerOptions::default())
    }

    pub fn with_options(options: NormalizerOptions) -> Self {
        let rules: Vec<Box<dyn ClassifyRule>> = vec![
            // Order matters! More specific rules first
            Box::new(OpcodeRule),
            Box::new(RpcSendRule),
            Box::new(JsonRule),
            Box::new(ErrorRule),
            Box::new(SystemRule), // Fallback (always matches)
        ];

        Self::with_rules(rules, options)
    }

    /// Custom rule table. Chunks no rule claims stay `System` with no payload.
    pub fn with_rules(rules: Vec<Box<dyn ClassifyRule>>, options: NormalizerOptions) -> Self {
        Self {
            rules,
            patterns: Patterns::shared(),
            normalizer: JsonNormalizer::with_options(options),
        }
    }

    /// Default classifier shared by the free functions.
    pub fn shared() -> &'static Classifier {
        static CLASSIFIER: OnceLock<Classifier> = OnceLock::new();
        CLASSIFIER.get_or_init(Classifier::new)
    }

    pub fn rule_kinds(&self) -> Vec<RuleKind> {
        self.rules.iter().map(|rule| rule.kind()).collect()
    }

    pub fn classify(&self, chunk: &str, sequence_number: usize) -> LogRecord {
        self.classify_detailed(chunk, sequence_number).0
    }

    /// Classify and also report which rule fired, or why the chunk was
    /// downgraded.
    pub fn classify_detailed(
        &self,
        chunk: &str,
        sequence_number: usize,
    ) -> (LogRecord, Result<Option<RuleKind>, ParseError>) {
        let blanket_pid = extract_pid_with(self.patterns, chunk);

        let result = catch_unwind(AssertUnwindSafe(|| self.dispatch(chunk)))
            .unwrap_or_else(|payload| Err(ParseError::RulePanic(panic_message(payload.as_ref()))));

        match result {
            Ok((kind, outcome)) => {
                let category = outcome
                    .category
                    .unwrap_or_else(|| category::SYSTEM.to_string());
                let process_id = outcome.process_id.unwrap_or(blanket_pid);

                tracing::debug!(
                    seq = sequence_number,
                    rule = kind.map_or("none", |k| k.as_str()),
                    category = %category,
                    "classify: rule fired"
                );

                let record = LogRecord::new(
                    sequence_number,
                    category,
                    process_id,
                    outcome.pretty_content,
                    chunk,
                );
                (record, Ok(kind))
            }
            Err(e) => {
                tracing::warn!(
                    seq = sequence_number,
                    error = %e,
                    "classify: chunk downgraded to ParseError"
                );
                (LogRecord::parse_error(sequence_number, &blanket_pid, chunk), Err(e))
            }
        }
    }

    fn dispatch(&self, chunk: &str) -> Result<(Option<RuleKind>, Outcome), ParseError> {
        let ctx = ChunkContext::new(chunk, self.patterns, &self.normalizer);

        for rule in &self.rules {
            if rule.matches(&ctx) {
                let outcome = rule.apply(&ctx)?;
                return Ok((Some(rule.kind()), outcome));
            }
        }

        Ok((None, Outcome::default()))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
