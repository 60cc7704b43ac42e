use std::sync::Arc;
use std::time::Instant;

use evidence::RawEvidence;
use normalize::{normalize, EvidenceSet, SnippetPolicy};
use tracing::{debug, info, span, warn, Level};

use crate::config::DetectConfig;
use crate::engine::MatchEngine;
use crate::error::DetectError;
use crate::metrics::metrics_recorder;
use crate::results::{Results, ResultsBuilder};

/// Request pipeline: normalize, decide the snippet, match, build results.
///
/// A `Detector` is immutable after construction and can be shared across
/// threads; the engine behind it is reference-counted.
#[derive(Clone)]
pub struct Detector {
    engine: Arc<dyn MatchEngine>,
    config: DetectConfig,
    snippet: SnippetPolicy,
    /// Requested properties without the snippet property.
    engine_properties: Vec<String>,
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Detector {
    /// Validate `config` against `engine` and build a detector.
    ///
    /// Every requested property other than the snippet property must be
    /// defined by the engine's dataset.
    pub fn new(
        engine: Arc<dyn MatchEngine>,
        mut config: DetectConfig,
    ) -> Result<Self, DetectError> {
        config.validate()?;
        let snippet = SnippetPolicy::new(config.snippet.clone())?;

        let mut properties: Vec<String> = Vec::with_capacity(config.properties.len());
        for name in config.properties.iter().map(|p| p.trim()) {
            if !properties.iter().any(|p| p == name) {
                properties.push(name.to_string());
            }
        }

        let engine_properties: Vec<String> = properties
            .iter()
            .filter(|p| p.as_str() != snippet.property_name())
            .cloned()
            .collect();
        if let Some(unknown) = engine_properties
            .iter()
            .find(|p| !engine.defines_property(p))
        {
            return Err(DetectError::UnknownProperty(unknown.clone()));
        }

        config.properties = properties;
        Ok(Self {
            engine,
            config,
            snippet,
            engine_properties,
        })
    }

    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    /// Requested properties in result order, deduplicated.
    pub fn properties(&self) -> &[String] {
        &self.config.properties
    }

    pub fn snippet_policy(&self) -> &SnippetPolicy {
        &self.snippet
    }

    /// Run detection for one request.
    ///
    /// Malformed evidence and engine failures never fail the request; they
    /// show up as "no value" results.
    pub fn process(&self, raw: &RawEvidence) -> Result<Results, DetectError> {
        let evidence = normalize(raw, &self.config.normalize)?;
        Ok(self.process_evidence_set(&evidence))
    }

    /// Run detection over evidence that was already normalized.
    pub fn process_evidence_set(&self, evidence: &EvidenceSet) -> Results {
        let span = span!(Level::INFO, "detect.process", fields = evidence.len());
        let _guard = span.enter();
        let start = Instant::now();

        let decision = self.snippet.decide(evidence);
        let matched = self.engine.match_evidence(evidence, &self.engine_properties);
        if let Err(err) = &matched {
            warn!(error = %err, "match_engine_failed");
            if let Some(recorder) = metrics_recorder() {
                recorder.record_engine_failure(&err.to_string());
            }
        }

        let results = ResultsBuilder::new(&self.config.properties, &self.snippet)
            .build(matched, decision);
        let latency = start.elapsed();

        debug!(missing = ?evidence.presence().missing(), "hint_presence");
        info!(
            fields = evidence.len(),
            matched = results.matched_count(),
            requested = results.len(),
            snippet = decision.emit,
            elapsed_micros = latency.as_micros() as u64,
            "detection_complete"
        );

        if let Some(recorder) = metrics_recorder() {
            recorder.record_detection(
                latency,
                results.matched_count(),
                results.len(),
                decision.emit,
            );
        }

        results
    }
}
