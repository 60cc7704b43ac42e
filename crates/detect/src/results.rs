//! Typed property results for one request.
//!
//! [`ResultsBuilder`] turns the engine's raw map plus the snippet decision
//! into exactly one [`PropertyResult`] per requested property. Asking
//! [`Results`] for a property outside that set is a
//! [`DetectError::PropertyNotFound`]; a requested property without a value
//! is a successful lookup of [`PropertyValue::NoValue`].

use normalize::{SnippetPolicy, SuppressionDecision};
use serde::Serialize;

use crate::error::{DetectError, EngineError};
use crate::types::{NoValueReason, PropertyResult, PropertyValue, RawMatch};

/// Assembles [`Results`] for a fixed list of requested properties.
#[derive(Debug, Clone, Copy)]
pub struct ResultsBuilder<'a> {
    requested: &'a [String],
    snippet: &'a SnippetPolicy,
}

impl<'a> ResultsBuilder<'a> {
    pub fn new(requested: &'a [String], snippet: &'a SnippetPolicy) -> Self {
        Self { requested, snippet }
    }

    /// Build the result set.
    ///
    /// The snippet property is resolved from `decision` alone and never
    /// taken from the engine. An engine error blanks every other property
    /// with [`NoValueReason::EngineFailure`].
    pub fn build(
        &self,
        matched: Result<RawMatch, EngineError>,
        decision: SuppressionDecision,
    ) -> Results {
        let (mut raw, failure) = match matched {
            Ok(raw) => (raw, None),
            Err(err) => (RawMatch::new(), Some(err.to_string())),
        };

        let properties = self
            .requested
            .iter()
            .map(|name| {
                let value = if name == self.snippet.property_name() {
                    match self.snippet.render(decision) {
                        Some(script) => PropertyValue::String(script.to_string()),
                        None => PropertyValue::NoValue(NoValueReason::Suppressed),
                    }
                } else if let Some(message) = &failure {
                    PropertyValue::NoValue(NoValueReason::EngineFailure(message.clone()))
                } else {
                    raw.remove(name)
                        .map(PropertyValue::from)
                        .unwrap_or(PropertyValue::NoValue(NoValueReason::Unmatched))
                };
                PropertyResult {
                    name: name.clone(),
                    value,
                }
            })
            .collect();

        Results {
            properties,
            snippet: decision,
        }
    }
}

/// Resolved properties of one request, in request order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Results {
    properties: Vec<PropertyResult>,
    snippet: SuppressionDecision,
}

impl Results {
    /// Look up a requested property.
    pub fn get(&self, name: &str) -> Result<&PropertyValue, DetectError> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
            .ok_or_else(|| DetectError::PropertyNotFound(name.to_string()))
    }

    /// String form of the value; empty for "no value".
    ///
    /// ```rust
    /// use detect::{Detector, DetectConfig, TableEngine};
    /// use evidence::RawEvidence;
    /// use std::sync::Arc;
    ///
    /// let engine = Arc::new(TableEngine::builtin());
    /// let detector = Detector::new(engine, DetectConfig::default()).unwrap();
    /// let results = detector.process(&RawEvidence::new()).unwrap();
    /// assert_eq!(results.value_as_string("BrowserName").unwrap(), "");
    /// assert!(results.value_as_string("NotRequested").is_err());
    /// ```
    pub fn value_as_string(&self, name: &str) -> Result<String, DetectError> {
        self.get(name).map(PropertyValue::as_string)
    }

    pub fn value_as_bool(&self, name: &str) -> Result<Option<bool>, DetectError> {
        match self.get(name)? {
            PropertyValue::Bool(b) => Ok(Some(*b)),
            PropertyValue::NoValue(_) => Ok(None),
            other => Err(mismatch(name, "bool", other)),
        }
    }

    pub fn value_as_double(&self, name: &str) -> Result<Option<f64>, DetectError> {
        match self.get(name)? {
            PropertyValue::Double(d) => Ok(Some(*d)),
            PropertyValue::NoValue(_) => Ok(None),
            other => Err(mismatch(name, "double", other)),
        }
    }

    /// List values. A plain string value is returned as a one-item list.
    pub fn value_as_list(&self, name: &str) -> Result<Option<Vec<String>>, DetectError> {
        match self.get(name)? {
            PropertyValue::List(items) => Ok(Some(items.clone())),
            PropertyValue::String(s) => Ok(Some(vec![s.clone()])),
            PropertyValue::NoValue(_) => Ok(None),
            other => Err(mismatch(name, "list", other)),
        }
    }

    pub fn has_value(&self, name: &str) -> Result<bool, DetectError> {
        self.get(name).map(PropertyValue::has_value)
    }

    pub fn no_value_reason(&self, name: &str) -> Result<Option<&NoValueReason>, DetectError> {
        Ok(match self.get(name)? {
            PropertyValue::NoValue(reason) => Some(reason),
            _ => None,
        })
    }

    pub fn snippet_decision(&self) -> SuppressionDecision {
        self.snippet
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyResult> {
        self.properties.iter()
    }

    /// Number of requested properties that carry a value.
    pub fn matched_count(&self) -> usize {
        self.properties.iter().filter(|p| p.value.has_value()).count()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

fn mismatch(name: &str, expected: &'static str, actual: &PropertyValue) -> DetectError {
    DetectError::TypeMismatch {
        property: name.to_string(),
        expected,
        actual: actual.kind(),
    }
}
