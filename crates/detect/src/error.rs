use normalize::NormalizeError;
use thiserror::Error;

/// Errors surfaced to callers of the detect crate.
///
/// A property that was requested but did not match is *not* an error; it
/// resolves to [`PropertyValue::NoValue`](crate::PropertyValue::NoValue).
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum DetectError {
    /// The property was not part of this request's results.
    #[error("property '{0}' was not requested")]
    PropertyNotFound(String),
    /// The dataset does not define the property.
    #[error("property '{0}' is not defined by the dataset")]
    UnknownProperty(String),
    /// A typed accessor was used on a value of another type.
    #[error("property '{property}' holds a {actual} value, not {expected}")]
    TypeMismatch {
        property: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid dataset: {0}")]
    Dataset(String),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Failure reported by a [`MatchEngine`](crate::MatchEngine).
///
/// Never fatal for a request: the affected properties resolve to "no value".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("match engine unavailable: {0}")]
    Unavailable(String),
    #[error("match failed: {0}")]
    Failed(String),
}
