//! Workspace umbrella crate for UA-CH device detection.
//!
//! This crate stitches together evidence collection, rich-evidence decoding,
//! normalization and detection so callers can go from `<channel>.<field>`
//! pairs to typed property results with a single API entry point.

pub mod config;

pub use config::{ConfigLoadError, UadetectConfig};
pub use detect::{
    set_detect_metrics, Dataset, DetectConfig, DetectError, DetectMetrics, Detector, EngineError,
    MatchEngine, NoValueReason, PropertyResult, PropertyValue, RawMatch, RawValue, Results,
    ResultsBuilder, TableEngine, ValueMetaData, ValueMetaDataBuilder, ValueType,
};
pub use evidence::{
    collect, push_evidence, Channel, EvidenceConfig, EvidenceEntry, EvidenceError, EvidenceKey,
    RawEvidence,
};
pub use hints::{
    decode_high_entropy_values, decode_structured_user_agent, encode_high_entropy_values,
    primary_brand, BrandVersion, HintsError, RichPayload,
};
pub use normalize::{
    normalize, should_emit_snippet, EvidenceSet, HintField, HintPresence, NormalizeConfig,
    NormalizeError, SnippetConfig, SnippetPolicy, SuppressionDecision, DEFAULT_SNIPPET_PROPERTY,
};

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::warn;

/// Errors that can occur while processing evidence through the pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("normalization failure: {0}")]
    Normalize(#[from] NormalizeError),
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    /// `entries` is the number of evidence entries that were admitted.
    fn record_collect(&self, latency: Duration, entries: usize);
    fn record_normalize(&self, latency: Duration, result: Result<(), NormalizeError>);
    /// Detection itself cannot fail; engine failures surface as "no value"
    /// results and are counted in `matched`.
    fn record_detect(&self, latency: Duration, matched: usize, requested: usize);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_collect(self, entries: usize) {
        self.recorder.record_collect(self.start.elapsed(), entries);
    }

    fn record_normalize(self, result: Result<(), NormalizeError>) {
        self.recorder.record_normalize(self.start.elapsed(), result);
    }

    fn record_detect(self, results: &Results) {
        let latency = self.start.elapsed();
        let (matched, requested) = (results.matched_count(), results.len());
        self.recorder.record_detect(latency, matched, requested);
    }
}

/// Process `<channel>.<field>` pairs end-to-end with explicit configuration.
///
/// Invalid keys and oversized values are skipped during collection; the
/// normalization settings come from the detector's configuration.
pub fn process_evidence<I, K, V>(
    pairs: I,
    evidence_cfg: &EvidenceConfig,
    detector: &Detector,
) -> Result<Results, PipelineError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let collect_metrics = MetricsSpan::start();
    let raw = collect(pairs, evidence_cfg);
    if let Some(span) = collect_metrics {
        span.record_collect(raw.len());
    }

    process_raw_evidence(&raw, detector)
}

/// Normalize and detect over an already collected evidence store.
pub fn process_raw_evidence(
    raw: &RawEvidence,
    detector: &Detector,
) -> Result<Results, PipelineError> {
    let mut normalize_metrics = MetricsSpan::start();
    let evidence = match normalize(raw, &detector.config().normalize) {
        Ok(evidence) => {
            if let Some(span) = normalize_metrics.take() {
                span.record_normalize(Ok(()));
            }
            evidence
        }
        Err(err) => {
            warn!(error = %err, "normalize_failed");
            if let Some(span) = normalize_metrics.take() {
                span.record_normalize(Err(err.clone()));
            }
            return Err(PipelineError::Normalize(err));
        }
    };

    let detect_metrics = MetricsSpan::start();
    let results = detector.process_evidence_set(&evidence);
    if let Some(span) = detect_metrics {
        span.record_detect(&results);
    }
    Ok(results)
}

/// A detector bound to its evidence collection limits.
///
/// Built once from a [`UadetectConfig`] and shared across request threads.
#[derive(Debug, Clone)]
pub struct Pipeline {
    evidence: EvidenceConfig,
    detector: Detector,
}

impl Pipeline {
    pub fn new(evidence: EvidenceConfig, detector: Detector) -> Result<Self, ConfigLoadError> {
        evidence
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("evidence: {e}")))?;
        Ok(Self { evidence, detector })
    }

    pub fn from_config(config: &UadetectConfig) -> Result<Self, ConfigLoadError> {
        config.validate()?;
        Self::new(config.evidence.clone(), config.build_detector()?)
    }

    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    pub fn process<I, K, V>(&self, pairs: I) -> Result<Results, PipelineError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        process_evidence(pairs, &self.evidence, &self.detector)
    }
}
