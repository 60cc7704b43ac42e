use thiserror::Error;

/// Errors that can occur during normalization.
///
/// Evidence content never produces an error here; malformed values are
/// dropped or degrade to "no extra evidence". Only configuration is checked.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
