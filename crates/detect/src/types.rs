use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of a property's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Bool,
    Double,
    List,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Bool => "bool",
            ValueType::Double => "double",
            ValueType::List => "list",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value as returned by the match engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum RawValue {
    String(String),
    Bool(bool),
    Double(f64),
    List(Vec<String>),
}

/// Engine output: property name to matched value. Properties without a
/// match are simply absent.
pub type RawMatch = HashMap<String, RawValue>;

/// Why a requested property carries no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum NoValueReason {
    /// The engine found nothing for this evidence.
    Unmatched,
    /// The snippet policy blanked the value.
    Suppressed,
    /// The engine failed; the message is kept for diagnostics.
    EngineFailure(String),
}

/// Typed value of one property result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    String(String),
    Bool(bool),
    Double(f64),
    List(Vec<String>),
    NoValue(NoValueReason),
}

impl PropertyValue {
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::String(_) => "string",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Double(_) => "double",
            PropertyValue::List(_) => "list",
            PropertyValue::NoValue(_) => "no-value",
        }
    }

    pub fn has_value(&self) -> bool {
        !matches!(self, PropertyValue::NoValue(_))
    }

    /// String form; empty for "no value".
    pub fn as_string(&self) -> String {
        match self {
            PropertyValue::String(s) => s.clone(),
            PropertyValue::Bool(b) => b.to_string(),
            PropertyValue::Double(d) => d.to_string(),
            PropertyValue::List(items) => items.join("|"),
            PropertyValue::NoValue(_) => String::new(),
        }
    }
}

impl From<RawValue> for PropertyValue {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::String(s) => PropertyValue::String(s),
            RawValue::Bool(b) => PropertyValue::Bool(b),
            RawValue::Double(d) => PropertyValue::Double(d),
            RawValue::List(items) => PropertyValue::List(items),
        }
    }
}

/// One requested property and its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyResult {
    pub name: String,
    pub value: PropertyValue,
}
