//! Device detection over normalized evidence.
//!
//! This crate sits behind [`normalize`]: it hands the canonical
//! [`EvidenceSet`](normalize::EvidenceSet) to a [`MatchEngine`], folds the
//! snippet decision in, and returns typed [`Results`].
//!
//! ## Pieces
//!
//! - [`MatchEngine`]: the boundary to whatever resolves properties. Tests
//!   and embedders can plug in their own.
//! - [`TableEngine`] + [`Dataset`]: a small table-driven engine. Brand names
//!   and platform version mappings are data, not code.
//! - [`ResultsBuilder`] / [`Results`]: one [`PropertyResult`] per requested
//!   property. "No value" and "not requested" are different outcomes.
//! - [`ValueMetaDataBuilder`]: detached meta-data for documentation.
//! - [`Detector`]: the per-request pipeline, safe to share across threads.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use detect::{DetectConfig, Detector, TableEngine};
//! use evidence::{Channel, RawEvidence};
//!
//! let detector = Detector::new(Arc::new(TableEngine::builtin()), DetectConfig::default())?;
//! let raw = RawEvidence::new()
//!     .with(Channel::Header, "sec-ch-ua", r#""Chromium";v="126", "Google Chrome";v="126""#)
//!     .with(Channel::Header, "sec-ch-ua-platform", r#""Windows""#)
//!     .with(Channel::Header, "sec-ch-ua-platform-version", r#""15.0.0""#);
//! let results = detector.process(&raw)?;
//! assert_eq!(results.value_as_string("BrowserName")?, "Chrome");
//! assert_eq!(results.value_as_string("PlatformVersion")?, "11.0");
//! # Ok::<(), detect::DetectError>(())
//! ```

mod config;
mod dataset;
mod detector;
mod engine;
mod error;
mod metadata;
mod metrics;
mod results;
mod table;
mod types;

pub use crate::config::DetectConfig;
pub use crate::dataset::{
    BrandMapping, Dataset, HardwareMapping, PlatformVersionRule, PropertyMetaData, UaToken,
    ValueEntity,
};
pub use crate::detector::Detector;
pub use crate::engine::MatchEngine;
pub use crate::error::{DetectError, EngineError};
pub use crate::metadata::{ValueMetaData, ValueMetaDataBuilder};
pub use crate::metrics::{set_detect_metrics, DetectMetrics};
pub use crate::results::{Results, ResultsBuilder};
pub use crate::table::TableEngine;
pub use crate::types::{
    NoValueReason, PropertyResult, PropertyValue, RawMatch, RawValue, ValueType,
};
