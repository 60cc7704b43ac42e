//! Configuration for a [`Detector`](crate::Detector).
//!
//! ```rust
//! use detect::DetectConfig;
//!
//! let config = DetectConfig::default();
//! assert!(config.properties.iter().any(|p| p == "JavascriptGetHighEntropyValues"));
//! assert!(config.validate().is_ok());
//! ```

use normalize::{NormalizeConfig, SnippetConfig};
use serde::{Deserialize, Serialize};

use crate::error::DetectError;

const DEFAULT_PROPERTIES: [&str; 8] = [
    "HardwareVendor",
    "HardwareName",
    "HardwareModel",
    "PlatformName",
    "PlatformVersion",
    "BrowserName",
    "BrowserVersion",
    "JavascriptGetHighEntropyValues",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Version 0 is reserved and rejected.
    pub version: u32,
    /// Properties every request resolves, in result order. Duplicates are
    /// dropped keeping the first occurrence.
    pub properties: Vec<String>,
    pub normalize: NormalizeConfig,
    pub snippet: SnippetConfig,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            version: 1,
            properties: DEFAULT_PROPERTIES.iter().map(|p| p.to_string()).collect(),
            normalize: NormalizeConfig::default(),
            snippet: SnippetConfig::default(),
        }
    }
}

impl DetectConfig {
    pub fn validate(&self) -> Result<(), DetectError> {
        if self.version == 0 {
            return Err(DetectError::InvalidConfig(
                "version must be >= 1".into(),
            ));
        }
        if self.properties.is_empty() {
            return Err(DetectError::InvalidConfig(
                "properties must not be empty".into(),
            ));
        }
        if let Some(blank) = self.properties.iter().position(|p| p.trim().is_empty()) {
            return Err(DetectError::InvalidConfig(format!(
                "properties[{blank}] is empty"
            )));
        }
        self.normalize.validate()?;
        self.snippet.validate()?;
        Ok(())
    }
}
