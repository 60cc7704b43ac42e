//! Error types produced by the evidence crate.
//!
//! Evidence collection is deliberately lenient: a malformed key or an
//! oversized value drops that single entry and the request carries on. These
//! errors are what the strict entry points ([`EvidenceKey::parse`],
//! [`RawEvidence::try_insert`]) report, and what [`collect`] logs before
//! skipping an entry.
//!
//! | Error | Description |
//! |-------|-------------|
//! | [`MalformedKey`](EvidenceError::MalformedKey) | Key is not of the form `<channel>.<field>` |
//! | [`UnknownChannel`](EvidenceError::UnknownChannel) | Prefix is not `header`, `query` or `cookie` |
//! | [`EmptyField`](EvidenceError::EmptyField) | Field part is empty after trimming |
//! | [`ValueTooLarge`](EvidenceError::ValueTooLarge) | Value exceeds `max_value_bytes` |
//! | [`TooManyEntries`](EvidenceError::TooManyEntries) | Store already holds `max_entries` |
//!
//! [`EvidenceKey::parse`]: crate::EvidenceKey::parse
//! [`RawEvidence::try_insert`]: crate::RawEvidence::try_insert
//! [`collect`]: crate::collect
use thiserror::Error;

/// Errors that can occur while building an evidence store.
///
/// ```rust
/// use evidence::{EvidenceError, EvidenceKey};
///
/// let err = EvidenceKey::parse("server.user-agent").unwrap_err();
/// assert_eq!(err, EvidenceError::UnknownChannel("server".into()));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvidenceError {
    /// Key has no `.` separating channel from field.
    #[error("malformed evidence key '{0}': expected <channel>.<field>")]
    MalformedKey(String),

    /// Channel prefix is not one of the supported channels.
    #[error("unknown evidence channel '{0}'")]
    UnknownChannel(String),

    /// Field part of the key is empty.
    #[error("evidence key '{0}' has an empty field name")]
    EmptyField(String),

    /// Value is larger than the configured limit.
    #[error("evidence value for '{key}' is {len} bytes, limit is {limit}")]
    ValueTooLarge {
        key: String,
        len: usize,
        limit: usize,
    },

    /// The store already holds the configured maximum number of entries.
    #[error("evidence store is full ({limit} entries)")]
    TooManyEntries { limit: usize },
}
