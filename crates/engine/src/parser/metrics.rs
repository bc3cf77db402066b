use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use super::model::{ParseError, RuleKind};

/// Why a chunk was downgraded to `ParseError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricErrorType {
    /// A rule returned an error
    Failed,
    /// A rule panicked (caught via catch_unwind)
    Panic,
}

impl From<&ParseError> for MetricErrorType {
    fn from(err: &ParseError) -> Self {
        match err {
            ParseError::RulePanic(_) => MetricErrorType::Panic,
            _ => MetricErrorType::Failed,
        }
    }
}

/// A wrapper that forces the wrapped data onto its own cache line.
#[repr(align(64))]
#[derive(Debug, Default)]
pub struct CacheAligned<T>(pub T);

/// Per-rule counters (updated once per chunk)
#[derive(Debug, Default)]
pub struct RuleMetrics {
    pub opcode: AtomicU64,
    pub rpc_send: AtomicU64,
    pub json: AtomicU64,
    pub error: AtomicU64,
    pub system: AtomicU64,
    /// No rule claimed the chunk (custom tables only)
    pub unclaimed: AtomicU64,
}

#[derive(Debug, Default)]
pub struct TotalMetrics {
    pub time_nanos: AtomicU64,
    pub chunks: AtomicU64,
    pub documents: AtomicU64,
}

#[derive(Debug, Default)]
pub struct ErrorMetrics {
    pub failed: AtomicU64,
    pub panic: AtomicU64,
}

/// Classification counters.
///
/// Groups are kept on separate cache lines so that pipelines sharing one
/// instance across threads do not contend. All operations use
/// `Ordering::Relaxed`, and `snapshot()` is not transactional across fields.
#[derive(Debug, Default)]
pub struct ClassifyMetrics {
    pub rules: CacheAligned<RuleMetrics>,
    pub totals: CacheAligned<TotalMetrics>,
    pub errors: CacheAligned<ErrorMetrics>,
}

impl ClassifyMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a classified chunk. `None` means no rule claimed it.
    #[inline]
    pub fn record_rule(&self, kind: Option<RuleKind>, time_nanos: u64) {
        self.totals.0.chunks.fetch_add(1, Ordering::Relaxed);
        self.totals.0.time_nanos.fetch_add(time_nanos, Ordering::Relaxed);

        let counter = match kind {
            Some(RuleKind::Opcode) => &self.rules.0.opcode,
            Some(RuleKind::RpcSend) => &self.rules.0.rpc_send,
            Some(RuleKind::Json) => &self.rules.0.json,
            Some(RuleKind::Error) => &self.rules.0.error,
            Some(RuleKind::System) => &self.rules.0.system,
            None => &self.rules.0.unclaimed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a chunk that was downgraded to `ParseError`.
    #[inline]
    pub fn record_error(&self, error_type: MetricErrorType, time_nanos: u64) {
        self.totals.0.chunks.fetch_add(1, Ordering::Relaxed);
        self.totals.0.time_nanos.fetch_add(time_nanos, Ordering::Relaxed);

        match error_type {
            MetricErrorType::Failed => self.errors.0.failed.fetch_add(1, Ordering::Relaxed),
            MetricErrorType::Panic => self.errors.0.panic.fetch_add(1, Ordering::Relaxed),
        };
    }

    #[inline]
    pub fn record_document(&self) {
        self.totals.0.documents.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let chunks = self.totals.0.chunks.load(Ordering::Relaxed);
        let time_ns = self.totals.0.time_nanos.load(Ordering::Relaxed);
        let parse_errors = self.errors.0.failed.load(Ordering::Relaxed);
        let parse_panics = self.errors.0.panic.load(Ordering::Relaxed);
        let classified = chunks.saturating_sub(parse_errors + parse_panics);

        MetricsSnapshot {
            documents: self.totals.0.documents.load(Ordering::Relaxed),
            chunks,

            opcode: self.rules.0.opcode.load(Ordering::Relaxed),
            rpc_send: self.rules.0.rpc_send.load(Ordering::Relaxed),
            json: self.rules.0.json.load(Ordering::Relaxed),
            error: self.rules.0.error.load(Ordering::Relaxed),
            system: self.rules.0.system.load(Ordering::Relaxed),
            unclaimed: self.rules.0.unclaimed.load(Ordering::Relaxed),

            avg_classify_time_us: if chunks > 0 {
                (time_ns as f64 / chunks as f64) / 1000.0
            } else {
                0.0
            },

            parse_errors,
            parse_panics,
            success_rate: if chunks > 0 {
                classified as f64 / chunks as f64
            } else {
                1.0
            },
        }
    }
}

/// A read-only copy of [`ClassifyMetrics`], ready for logging or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub documents: u64,
    pub chunks: u64,

    // Chunks per rule
    pub opcode: u64,
    pub rpc_send: u64,
    pub json: u64,
    pub error: u64,
    pub system: u64,
    pub unclaimed: u64,

    pub avg_classify_time_us: f64,

    // Downgrades
    pub parse_errors: u64,
    pub parse_panics: u64,
    pub success_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_empty() {
        let snap = ClassifyMetrics::new().snapshot();
        assert_eq!(snap.chunks, 0);
        assert_eq!(snap.parse_errors, 0);
        assert_eq!(snap.avg_classify_time_us, 0.0);
        assert_eq!(snap.success_rate, 1.0);
    }

    #[test]
    fn test_record_rule_counts_and_times() {
        let metrics = ClassifyMetrics::new();
        metrics.record_rule(Some(RuleKind::Json), 1000);
        metrics.record_rule(Some(RuleKind::Opcode), 2000);
        metrics.record_rule(None, 0);

        let snap = metrics.snapshot();
        assert_eq!(snap.chunks, 3);
        assert_eq!(snap.json, 1);
        assert_eq!(snap.opcode, 1);
        assert_eq!(snap.unclaimed, 1);
        assert!((snap.avg_classify_time_us - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_errors_and_success_rate() {
        let metrics = ClassifyMetrics::new();
        metrics.record_rule(Some(RuleKind::System), 100);
        metrics.record_rule(Some(RuleKind::System), 100);
        metrics.record_error(MetricErrorType::Failed, 100);
        metrics.record_error(MetricErrorType::Panic, 100);

        let snap = metrics.snapshot();
        assert_eq!(snap.system, 2);
        assert_eq!(snap.parse_errors, 1);
        assert_eq!(snap.parse_panics, 1);
        assert_eq!(snap.success_rate, 0.5);
    }

    #[test]
    fn test_error_type_from_parse_error() {
        assert_eq!(
            MetricErrorType::from(&ParseError::RulePanic("x".into())),
            MetricErrorType::Panic
        );
        assert_eq!(MetricErrorType::from(&ParseError::NotAnObject), MetricErrorType::Failed);
    }

    #[test]
    fn test_snapshot_serializes() {
        let metrics = ClassifyMetrics::new();
        metrics.record_document();
        let json = serde_json::to_value(metrics.snapshot()).unwrap();
        assert_eq!(json["documents"], 1);
        assert_eq!(json["rpc_send"], 0);
    }
}
