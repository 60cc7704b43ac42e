//! Device evidence store.
//!
//! This is where client-supplied signals enter detection. HTTP headers, query
//! parameters and cookies arrive as `<channel>.<field>` pairs; we parse the
//! key into a typed [`EvidenceKey`], apply the collection limits from
//! [`EvidenceConfig`], and keep the surviving values in a [`RawEvidence`]
//! store in arrival order.
//!
//! ## What we do here
//!
//! - **Type the channel** - `header`, `query` and `cookie` become a closed
//!   [`Channel`] enum whose ordering is the precedence rule.
//! - **Case-fold the field** - `header.User-Agent` and `header.user-agent`
//!   are the same key.
//! - **Bound the request** - oversized values and excess entries are dropped.
//! - **Never fail the request** - a bad key skips that entry with a warning.
//!
//! ## Example
//!
//! ```
//! use evidence::{collect, Channel, EvidenceConfig};
//!
//! let pairs = [
//!     ("header.User-Agent", "Mozilla/5.0"),
//!     ("query.51D_GetHighEntropyValues", "eyJ9"),
//!     ("bogus", "skipped"),
//! ];
//! let raw = collect(pairs, &EvidenceConfig::default());
//!
//! assert_eq!(raw.len(), 2);
//! assert_eq!(raw.get(Channel::Header, "user-agent"), Some("Mozilla/5.0"));
//! ```
use tracing::{debug, warn};

mod config;
mod error;
pub mod fields;
mod sanitize;
mod types;

pub use crate::config::{ConfigError, EvidenceConfig};
pub use crate::error::EvidenceError;
pub use crate::sanitize::strip_control_chars;
pub use crate::types::{Channel, EvidenceEntry, EvidenceKey, RawEvidence};

/// Collect `<channel>.<field>` pairs into a [`RawEvidence`] store.
///
/// Entries that cannot be admitted are logged and skipped; the rest of the
/// request is unaffected. An invalid `cfg` is logged and the default limits
/// apply instead.
pub fn collect<I, K, V>(pairs: I, cfg: &EvidenceConfig) -> RawEvidence
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let fallback;
    let cfg = match cfg.validate() {
        Ok(()) => cfg,
        Err(err) => {
            warn!(error = %err, "invalid_evidence_config");
            fallback = EvidenceConfig::default();
            &fallback
        }
    };

    let mut store = RawEvidence::new();
    let mut skipped = 0usize;
    for (key, value) in pairs {
        match admit(&store, key.as_ref(), value.into(), cfg) {
            Ok((key, value)) => store.insert(key, value),
            Err(err) => {
                skipped += 1;
                warn!(error = %err, "evidence_skipped");
            }
        }
    }
    debug!(entries = store.len(), skipped, "evidence_collected");
    store
}

/// Insert a single pair under the configured limits.
pub fn push_evidence(
    store: &mut RawEvidence,
    key: &str,
    value: impl Into<String>,
    cfg: &EvidenceConfig,
) -> Result<(), EvidenceError> {
    let (key, value) = admit(store, key, value.into(), cfg)?;
    store.insert(key, value);
    Ok(())
}

fn admit(
    store: &RawEvidence,
    key: &str,
    value: String,
    cfg: &EvidenceConfig,
) -> Result<(EvidenceKey, String), EvidenceError> {
    let key = EvidenceKey::parse(key)?;

    if let Some(limit) = cfg.max_value_bytes {
        if value.len() > limit {
            return Err(EvidenceError::ValueTooLarge {
                key: key.to_string(),
                len: value.len(),
                limit,
            });
        }
    }

    // Replacing an existing key never grows the store.
    if let Some(limit) = cfg.max_entries {
        let replaces = store.iter().any(|entry| entry.key == key);
        if !replaces && store.len() >= limit {
            return Err(EvidenceError::TooManyEntries { limit });
        }
    }

    // The user-agent is matched verbatim.
    let value = if cfg.strip_control_chars && key.field() != fields::USER_AGENT {
        strip_control_chars(&value).into_owned()
    } else {
        value
    };
    Ok((key, value))
}
