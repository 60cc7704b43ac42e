// Metrics hooks for the `detect` crate.
//
// Callers install a global `DetectMetrics` implementation via [`set_detect_metrics`],
// then every `Detector` reports per-request latency, how many requested
// properties carried a value and whether the snippet was emitted.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

/// Metrics observer for detection requests.
pub trait DetectMetrics: Send + Sync {
    /// Record one processed request.
    ///
    /// `matched` counts requested properties with a value, `requested` is
    /// the total number of properties in the result set.
    fn record_detection(
        &self,
        latency: Duration,
        matched: usize,
        requested: usize,
        snippet_emitted: bool,
    );

    /// Record an engine failure. The request itself still succeeds.
    fn record_engine_failure(&self, _error: &str) {}
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn DetectMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn DetectMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn DetectMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global detection metrics recorder.
pub fn set_detect_metrics(recorder: Option<Arc<dyn DetectMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
