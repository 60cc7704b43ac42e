//! Core data model for raw evidence.
//!
//! ```text
//! RawEvidence
//! └── entries: Vec<EvidenceEntry>   (insertion order kept)
//!     ├── key: EvidenceKey
//!     │   ├── channel: Channel      (Header | Query | Cookie)
//!     │   └── field: String         (lower-cased)
//!     └── value: String
//! ```
//!
//! Several entries may name the same logical field on different channels;
//! choosing the winner is the normalizer's job, not the store's.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EvidenceError;

/// Transport channel an evidence value arrived on.
///
/// The variants are ordered by precedence: when two channels supply the same
/// field, the greater one wins (`Query` > `Cookie` > `Header`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Header,
    Cookie,
    Query,
}

impl Channel {
    /// All channels, lowest precedence first.
    pub const ALL: [Channel; 3] = [Channel::Header, Channel::Cookie, Channel::Query];

    /// Key prefix used for this channel, e.g. `header`.
    pub fn prefix(self) -> &'static str {
        match self {
            Channel::Header => "header",
            Channel::Cookie => "cookie",
            Channel::Query => "query",
        }
    }

    /// Numeric precedence; higher wins.
    pub fn precedence(self) -> u8 {
        match self {
            Channel::Header => 0,
            Channel::Cookie => 1,
            Channel::Query => 2,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for Channel {
    type Err = EvidenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "header" => Ok(Channel::Header),
            "cookie" => Ok(Channel::Cookie),
            "query" => Ok(Channel::Query),
            other => Err(EvidenceError::UnknownChannel(other.to_string())),
        }
    }
}

/// `(channel, field)` pair identifying one piece of evidence.
///
/// The field is stored lower-cased so `header.User-Agent` and
/// `header.user-agent` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EvidenceKey {
    channel: Channel,
    field: String,
}

impl EvidenceKey {
    /// Build a key from a channel and a field name.
    pub fn new(channel: Channel, field: impl AsRef<str>) -> Self {
        Self {
            channel,
            field: field.as_ref().trim().to_ascii_lowercase(),
        }
    }

    /// Parse a `<channel>.<field>` key such as `query.51D_GetHighEntropyValues`.
    ///
    /// ```rust
    /// use evidence::{Channel, EvidenceKey};
    ///
    /// let key = EvidenceKey::parse("header.User-Agent").unwrap();
    /// assert_eq!(key.channel(), Channel::Header);
    /// assert_eq!(key.field(), "user-agent");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, EvidenceError> {
        let Some((prefix, field)) = raw.split_once('.') else {
            return Err(EvidenceError::MalformedKey(raw.to_string()));
        };
        let channel = prefix.parse::<Channel>()?;
        if field.trim().is_empty() {
            return Err(EvidenceError::EmptyField(raw.to_string()));
        }
        Ok(Self::new(channel, field))
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl fmt::Display for EvidenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.channel, self.field)
    }
}

impl FromStr for EvidenceKey {
    type Err = EvidenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One raw evidence value with its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceEntry {
    pub key: EvidenceKey,
    pub value: String,
}

impl EvidenceEntry {
    pub fn new(key: EvidenceKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    pub fn channel(&self) -> Channel {
        self.key.channel()
    }

    pub fn field(&self) -> &str {
        self.key.field()
    }
}

/// Ordered, per-request collection of raw evidence entries.
///
/// Inserting a key that is already present replaces its value in place, so
/// the store never holds two entries with an identical key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvidence {
    entries: Vec<EvidenceEntry>,
}

impl RawEvidence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value for `key`.
    pub fn insert(&mut self, key: EvidenceKey, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|entry| entry.key == key) {
            Some(existing) => existing.value = value,
            None => self.entries.push(EvidenceEntry::new(key, value)),
        }
    }

    /// Parse `key` and insert the value, failing on a malformed key.
    pub fn try_insert(&mut self, key: &str, value: impl Into<String>) -> Result<(), EvidenceError> {
        let key = EvidenceKey::parse(key)?;
        self.insert(key, value);
        Ok(())
    }

    /// Builder-style insert for fixtures and literals.
    pub fn with(mut self, channel: Channel, field: &str, value: impl Into<String>) -> Self {
        self.insert(EvidenceKey::new(channel, field), value);
        self
    }

    /// Value for an exact `(channel, field)` pair.
    pub fn get(&self, channel: Channel, field: &str) -> Option<&str> {
        let field = field.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.channel() == channel && entry.field() == field)
            .map(|entry| entry.value.as_str())
    }

    /// Remove the entry for `key`, returning its value.
    pub fn remove(&mut self, key: &EvidenceKey) -> Option<String> {
        let idx = self.entries.iter().position(|entry| &entry.key == key)?;
        Some(self.entries.remove(idx).value)
    }

    /// Entries that arrived on `channel`, in insertion order.
    pub fn by_channel(&self, channel: Channel) -> impl Iterator<Item = &EvidenceEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.channel() == channel)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EvidenceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(EvidenceKey, String)> for RawEvidence {
    fn from_iter<T: IntoIterator<Item = (EvidenceKey, String)>>(iter: T) -> Self {
        let mut store = RawEvidence::new();
        for (key, value) in iter {
            store.insert(key, value);
        }
        store
    }
}

impl<'a> IntoIterator for &'a RawEvidence {
    type Item = &'a EvidenceEntry;
    type IntoIter = std::slice::Iter<'a, EvidenceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
