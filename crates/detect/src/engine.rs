use normalize::EvidenceSet;

use crate::error::EngineError;
use crate::types::RawMatch;

/// Boundary to the matching automaton.
///
/// Implementations turn canonical evidence into raw values for the requested
/// properties. The underlying dataset is shared read-only across threads, so
/// implementations must be `Send + Sync` and must not mutate state per call.
pub trait MatchEngine: Send + Sync {
    /// Resolve `properties` against `evidence`.
    ///
    /// Properties the engine cannot resolve are left out of the returned map.
    fn match_evidence(
        &self,
        evidence: &EvidenceSet,
        properties: &[String],
    ) -> Result<RawMatch, EngineError>;

    /// Whether the dataset behind this engine defines `property`.
    fn defines_property(&self, _property: &str) -> bool {
        true
    }
}
