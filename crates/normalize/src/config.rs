//! Configuration types for evidence normalization.
//!
//! ```rust
//! use normalize::NormalizeConfig;
//!
//! let config = NormalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.decode_high_entropy_values);
//! assert!(config.decode_structured_user_agent);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;

/// Configuration for the evidence normalizer.
///
/// ```json
/// {
///   "version": 1,
///   "decode_high_entropy_values": true,
///   "decode_structured_user_agent": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Version of the normalization behavior. Version 0 is reserved and
    /// rejected.
    pub version: u32,

    /// Decode `51d_gethighentropyvalues` payloads into `sec-ch-ua-*` fields.
    ///
    /// When disabled the payload is ignored and contributes nothing, neither
    /// to matching nor to the snippet decision.
    pub decode_high_entropy_values: bool,

    /// Decode `51d_structureduseragent` payloads into `sec-ch-ua-*` fields.
    pub decode_structured_user_agent: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            decode_high_entropy_values: true,
            decode_structured_user_agent: true,
        }
    }
}

impl NormalizeConfig {
    pub fn validate(&self) -> Result<(), NormalizeError> {
        if self.version == 0 {
            return Err(NormalizeError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}
