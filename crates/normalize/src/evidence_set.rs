use std::collections::BTreeMap;

use evidence::Channel;
use serde::{Deserialize, Serialize};

use crate::presence::{HintField, HintPresence};

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Supplied directly as a header, query parameter or cookie.
    Literal,
    /// Synthesized from a High Entropy Values payload.
    HighEntropyValues,
    /// Synthesized from a Structured User-Agent payload.
    StructuredUserAgent,
}

/// Provenance of one resolved field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSource {
    pub channel: Channel,
    pub origin: Origin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ResolvedValue {
    pub(crate) value: String,
    pub(crate) source: FieldSource,
}

/// Canonical evidence for one request: one value per field name.
///
/// Built by [`normalize`](crate::normalize) and read-only afterwards. Losing
/// entries from lower-precedence channels are not retained.
///
/// Presence flags are derived from the values; a deserialized set recomputes
/// them and ignores any serialized `presence`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EvidenceSetRepr")]
pub struct EvidenceSet {
    values: BTreeMap<String, ResolvedValue>,
    presence: HintPresence,
}

#[derive(Deserialize)]
struct EvidenceSetRepr {
    values: BTreeMap<String, ResolvedValue>,
}

impl From<EvidenceSetRepr> for EvidenceSet {
    fn from(repr: EvidenceSetRepr) -> Self {
        EvidenceSet::from_resolved(repr.values)
    }
}

impl EvidenceSet {
    pub(crate) fn from_resolved(values: BTreeMap<String, ResolvedValue>) -> Self {
        let presence = values
            .keys()
            .filter_map(|field| HintField::from_field(field))
            .collect();
        Self { values, presence }
    }

    /// Resolved value for a lower-cased field name such as `user-agent`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(|resolved| resolved.value.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Channel and origin of the winning value for `field`.
    pub fn source(&self, field: &str) -> Option<FieldSource> {
        self.values.get(field).map(|resolved| resolved.source)
    }

    /// `(field, value)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(field, resolved)| (field.as_str(), resolved.value.as_str()))
    }

    /// Which of the snippet-relevant client hints are present.
    pub fn presence(&self) -> HintPresence {
        self.presence
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialized_presence_follows_values() {
        let json = r#"{
            "values": {
                "sec-ch-ua-mobile": {
                    "value": "?0",
                    "source": {"channel": "header", "origin": "literal"}
                }
            },
            "presence": 63
        }"#;
        let set: EvidenceSet = serde_json::from_str(json).expect("deserialize");
        assert_eq!(set.get("sec-ch-ua-mobile"), Some("?0"));
        assert!(set.presence().contains(HintField::Mobile));
        assert!(!set.presence().is_complete());
    }
}
