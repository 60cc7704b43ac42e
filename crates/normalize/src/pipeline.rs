use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use evidence::{fields, Channel, EvidenceEntry, RawEvidence};
use hints::{decode_high_entropy_values, decode_structured_user_agent, RichPayload};
use tracing::debug;

use crate::config::NormalizeConfig;
use crate::error::NormalizeError;
use crate::evidence_set::{EvidenceSet, FieldSource, Origin, ResolvedValue};

/// Resolve raw evidence into one canonical [`EvidenceSet`].
///
/// 1. Literal entries compete per field; the higher-precedence channel wins
///    (`query` > `cookie` > `header`), and a later entry wins a tie.
/// 2. Rich payloads are decoded and their synthetic `sec-ch-ua-*` fields
///    offered at the precedence of the channel that carried them. A literal
///    value of equal or higher precedence is never displaced. High Entropy
///    Values are offered before Structured User-Agent, so on a tie they win.
/// 3. The payload fields themselves are consumed and do not appear in the
///    result.
///
/// ```
/// use evidence::{Channel, RawEvidence};
/// use normalize::{normalize, NormalizeConfig};
///
/// let raw = RawEvidence::new()
///     .with(Channel::Header, "sec-ch-ua-platform", "\"Windows\"")
///     .with(Channel::Query, "sec-ch-ua-platform", "\"macOS\"");
/// let set = normalize(&raw, &NormalizeConfig::default()).unwrap();
/// assert_eq!(set.get("sec-ch-ua-platform"), Some("\"macOS\""));
/// ```
pub fn normalize(raw: &RawEvidence, cfg: &NormalizeConfig) -> Result<EvidenceSet, NormalizeError> {
    cfg.validate()?;

    let mut resolved: BTreeMap<String, Ranked> = BTreeMap::new();
    let mut ghev: Vec<&EvidenceEntry> = Vec::new();
    let mut sua: Vec<&EvidenceEntry> = Vec::new();

    for entry in raw {
        match entry.field() {
            fields::HIGH_ENTROPY_VALUES => ghev.push(entry),
            fields::STRUCTURED_USER_AGENT => sua.push(entry),
            field => offer(
                &mut resolved,
                field,
                entry.value.clone(),
                entry.channel(),
                Origin::Literal,
            ),
        }
    }

    if cfg.decode_high_entropy_values {
        for entry in ghev {
            let payload = decode_high_entropy_values(&entry.value);
            synthesize(&mut resolved, &payload, entry.channel(), Origin::HighEntropyValues);
        }
    }
    if cfg.decode_structured_user_agent {
        for entry in sua {
            let payload = decode_structured_user_agent(&entry.value);
            synthesize(&mut resolved, &payload, entry.channel(), Origin::StructuredUserAgent);
        }
    }

    let values = resolved
        .into_iter()
        .map(|(field, ranked)| (field, ranked.resolved))
        .collect();
    let set = EvidenceSet::from_resolved(values);
    debug!(
        fields = set.len(),
        missing_hints = set.presence().missing().len(),
        "evidence_normalized"
    );
    Ok(set)
}

struct Ranked {
    rank: (u8, bool),
    resolved: ResolvedValue,
}

fn synthesize(
    resolved: &mut BTreeMap<String, Ranked>,
    payload: &RichPayload,
    channel: Channel,
    origin: Origin,
) {
    for (field, value) in payload.header_fields() {
        offer(resolved, field, value, channel, origin);
    }
}

fn offer(
    resolved: &mut BTreeMap<String, Ranked>,
    field: &str,
    value: String,
    channel: Channel,
    origin: Origin,
) {
    let literal = origin == Origin::Literal;
    let candidate = Ranked {
        rank: (channel.precedence(), literal),
        resolved: ResolvedValue {
            value,
            source: FieldSource { channel, origin },
        },
    };
    match resolved.entry(field.to_string()) {
        Entry::Vacant(slot) => {
            slot.insert(candidate);
        }
        Entry::Occupied(mut slot) => {
            let current = slot.get().rank;
            // Literal ties go to the later entry; synthesized ties keep the
            // earlier payload.
            let wins = if literal {
                candidate.rank >= current
            } else {
                candidate.rank > current
            };
            if wins {
                slot.insert(candidate);
            }
        }
    }
}
