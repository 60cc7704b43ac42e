//! Evidence normalization.
//!
//! Turns the raw, per-channel evidence of one request into the single
//! [`EvidenceSet`] handed to the match engine, and computes the snippet
//! decision from the same result.
//!
//! ## What we do
//!
//! - Resolve fields supplied on several channels (`query` > `cookie` >
//!   `header`)
//! - Decode High Entropy Values and Structured User-Agent payloads into
//!   `sec-ch-ua-*` fields that fill gaps without overriding literal evidence
//!   of equal or higher precedence
//! - Track which of the six snippet-relevant client hints ended up present
//! - Decide whether the client-side snippet should be emitted
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock, no shared state. Every request builds its own
//! [`EvidenceSet`], so concurrent requests need no coordination.

mod config;
mod error;
mod evidence_set;
mod pipeline;
mod presence;
mod snippet;

pub use crate::config::NormalizeConfig;
pub use crate::error::NormalizeError;
pub use crate::evidence_set::{EvidenceSet, FieldSource, Origin};
pub use crate::pipeline::normalize;
pub use crate::presence::{HintField, HintPresence};
pub use crate::snippet::{
    should_emit_snippet, SnippetConfig, SnippetPolicy, SuppressionDecision,
    DEFAULT_SNIPPET_PROPERTY,
};
