//! Configuration types for evidence collection.
//!
//! [`EvidenceConfig`] bounds what a single request may contribute to the
//! evidence store. It is cheap to clone and serializable from JSON, TOML or
//! YAML.
//!
//! ```rust
//! use evidence::EvidenceConfig;
//!
//! let config = EvidenceConfig::default();
//! config.validate().expect("default config is valid");
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Runtime configuration for evidence collection.
///
/// # Serialization
///
/// ```json
/// {
///   "version": 1,
///   "strip_control_chars": true,
///   "max_value_bytes": 8192,
///   "max_entries": 64
/// }
/// ```
///
/// # Examples
///
/// ```rust
/// use evidence::EvidenceConfig;
///
/// let config = EvidenceConfig {
///     max_value_bytes: Some(1024),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EvidenceConfig {
    /// Version of the collection behavior. Must be >= 1.
    ///
    /// Default: `1`
    pub version: u32,

    /// Remove ASCII control characters (0x00-0x1F, 0x7F) from values.
    ///
    /// `user-agent` values are always kept verbatim.
    ///
    /// Default: `true`
    pub strip_control_chars: bool,

    /// Maximum byte length of a single evidence value. Larger values are
    /// dropped with a warning.
    ///
    /// Default: `Some(8192)`
    pub max_value_bytes: Option<usize>,

    /// Maximum number of entries kept per request.
    ///
    /// Default: `Some(256)`
    pub max_entries: Option<usize>,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            strip_control_chars: true,
            max_value_bytes: Some(8 * 1024),
            max_entries: Some(256),
        }
    }
}

impl EvidenceConfig {
    /// Check the configuration for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 {
            return Err(ConfigError::InvalidVersion);
        }
        if self.max_value_bytes == Some(0) {
            return Err(ConfigError::ZeroLimit("max_value_bytes"));
        }
        if self.max_entries == Some(0) {
            return Err(ConfigError::ZeroLimit("max_entries"));
        }
        Ok(())
    }
}

/// Errors reported by [`EvidenceConfig::validate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("evidence config version must be >= 1")]
    InvalidVersion,
    #[error("{0} must be greater than zero when set")]
    ZeroLimit(&'static str),
}
