//! Snippet suppression policy.
//!
//! When a request lacks any of the six snippet-relevant client hints, the
//! caller is handed a small script that asks the browser for its high
//! entropy values and returns them on the next request as the
//! `51D_GetHighEntropyValues` cookie. Once every hint is present, directly
//! or through a decoded payload, the script is suppressed.
//!
//! The property name and script text are configuration, so differently
//! configured detectors can coexist in one process.

use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;
use crate::evidence_set::EvidenceSet;
use crate::presence::HintPresence;

pub const DEFAULT_SNIPPET_PROPERTY: &str = "JavascriptGetHighEntropyValues";

const DEFAULT_SNIPPET_SCRIPT: &str = concat!(
    "if (navigator.userAgentData) {",
    " navigator.userAgentData.getHighEntropyValues(",
    "[\"brands\",\"fullVersionList\",\"mobile\",\"model\",\"platform\",\"platformVersion\"]",
    ").then(function (ghev) {",
    " document.cookie = \"51D_GetHighEntropyValues=\" + btoa(JSON.stringify(ghev)) + \"; path=/\";",
    " });",
    " }"
);

/// Property name and script text for the snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetConfig {
    /// Property the snippet is reported under.
    pub property_name: String,
    /// Script returned when the snippet is emitted.
    pub script: String,
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            property_name: DEFAULT_SNIPPET_PROPERTY.to_string(),
            script: DEFAULT_SNIPPET_SCRIPT.to_string(),
        }
    }
}

impl SnippetConfig {
    pub fn validate(&self) -> Result<(), NormalizeError> {
        if self.property_name.trim().is_empty() {
            return Err(NormalizeError::InvalidConfig(
                "snippet.property_name must not be empty".into(),
            ));
        }
        if self.script.trim().is_empty() {
            return Err(NormalizeError::InvalidConfig(
                "snippet.script must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Emit the snippet when any snippet-relevant hint is missing.
///
/// `user-agent` is not one of the tracked fields, so its absence never
/// triggers the snippet on its own.
///
/// ```rust
/// use normalize::{should_emit_snippet, HintPresence};
///
/// assert!(should_emit_snippet(HintPresence::empty()));
/// assert!(!should_emit_snippet(HintPresence::all()));
/// ```
pub fn should_emit_snippet(presence: HintPresence) -> bool {
    !presence.is_complete()
}

/// Per-request outcome of the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionDecision {
    pub emit: bool,
}

/// Snippet policy bound to one [`SnippetConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetPolicy {
    config: SnippetConfig,
}

impl SnippetPolicy {
    pub fn new(config: SnippetConfig) -> Result<Self, NormalizeError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn property_name(&self) -> &str {
        &self.config.property_name
    }

    pub fn config(&self) -> &SnippetConfig {
        &self.config
    }

    pub fn decide(&self, evidence: &EvidenceSet) -> SuppressionDecision {
        SuppressionDecision {
            emit: should_emit_snippet(evidence.presence()),
        }
    }

    /// Script text for an emitted snippet, `None` when suppressed.
    pub fn render(&self, decision: SuppressionDecision) -> Option<&str> {
        decision.emit.then_some(self.config.script.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::HintField;
    use crate::{normalize, NormalizeConfig};
    use evidence::{Channel, RawEvidence};

    fn full_headers() -> RawEvidence {
        let mut raw = RawEvidence::new().with(Channel::Header, "user-agent", "UA");
        for hint in HintField::ALL {
            raw = raw.with(Channel::Header, hint.as_str(), "\"x\"");
        }
        raw
    }

    #[test]
    fn missing_any_hint_emits() {
        let policy = SnippetPolicy::default();
        for hint in HintField::ALL {
            let mut raw = full_headers();
            raw.remove(&evidence::EvidenceKey::new(Channel::Header, hint.as_str()));
            let set = normalize(&raw, &NormalizeConfig::default()).expect("normalize");
            let decision = policy.decide(&set);
            assert!(decision.emit, "missing {hint} should emit");
            assert!(policy.render(decision).is_some_and(|s| !s.is_empty()));
        }
    }

    #[test]
    fn all_hints_suppress_even_without_user_agent() {
        let mut raw = full_headers();
        raw.remove(&evidence::EvidenceKey::new(Channel::Header, "user-agent"));
        let set = normalize(&raw, &NormalizeConfig::default()).expect("normalize");
        let policy = SnippetPolicy::default();
        let decision = policy.decide(&set);
        assert!(!decision.emit);
        assert_eq!(policy.render(decision), None);
    }

    #[test]
    fn custom_config_is_per_instance() {
        let custom = SnippetPolicy::new(SnippetConfig {
            property_name: "ClientHintsScript".into(),
            script: "fetchHints();".into(),
        })
        .expect("valid config");
        let default = SnippetPolicy::default();
        assert_eq!(custom.property_name(), "ClientHintsScript");
        assert_eq!(default.property_name(), DEFAULT_SNIPPET_PROPERTY);
        assert_eq!(
            custom.render(SuppressionDecision { emit: true }),
            Some("fetchHints();")
        );
    }

    #[test]
    fn empty_config_rejected() {
        let res = SnippetPolicy::new(SnippetConfig {
            property_name: " ".into(),
            ..Default::default()
        });
        assert!(matches!(res, Err(NormalizeError::InvalidConfig(_))));
    }
}
