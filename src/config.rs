//! YAML configuration file support.
//!
//! One file configures every stage of the detection pipeline. Missing
//! sections fall back to their defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "edge-detector"
//!
//! evidence:
//!   version: 1
//!   strip_control_chars: true
//!   max_value_bytes: 8192
//!   max_entries: 256
//!
//! detect:
//!   version: 1
//!   properties:
//!     - BrowserName
//!     - PlatformName
//!     - JavascriptGetHighEntropyValues
//!   normalize:
//!     decode_high_entropy_values: true
//!     decode_structured_user_agent: true
//!   snippet:
//!     property_name: "JavascriptGetHighEntropyValues"
//!
//! # Optional JSON dataset for the table engine; the built-in one is used
//! # when omitted.
//! dataset: "data/devices.json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use detect::{Dataset, DetectConfig, DetectError, Detector, TableEngine};
use evidence::EvidenceConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("detector setup failed: {0}")]
    Detect(#[from] DetectError),
}

/// Top-level YAML configuration for the detection pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UadetectConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub evidence: EvidenceConfig,

    /// Detection stage, including normalization and the snippet policy.
    #[serde(default)]
    pub detect: DetectConfig,

    /// JSON dataset for the table engine. Relative paths resolve against the
    /// current working directory.
    #[serde(default)]
    pub dataset: Option<PathBuf>,
}

impl UadetectConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: UadetectConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.evidence
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("evidence: {e}")))?;
        self.detect
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("detect: {e}")))?;
        Ok(())
    }

    /// The configured dataset, or the built-in one.
    pub fn load_dataset(&self) -> Result<Dataset, ConfigLoadError> {
        match &self.dataset {
            Some(path) => {
                let json = fs::read_to_string(path)?;
                Ok(Dataset::from_json(&json)?)
            }
            None => Ok(Dataset::builtin()),
        }
    }

    /// Build a [`Detector`] over a [`TableEngine`] for the configured dataset.
    pub fn build_detector(&self) -> Result<Detector, ConfigLoadError> {
        let engine = TableEngine::new(self.load_dataset()?);
        Ok(Detector::new(Arc::new(engine), self.detect.clone())?)
    }
}

impl Default for UadetectConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            evidence: EvidenceConfig::default(),
            detect: DetectConfig::default(),
            dataset: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
evidence:
  max_entries: 16
detect:
  properties:
    - BrowserName
    - JavascriptGetHighEntropyValues
  normalize:
    decode_structured_user_agent: false
"#;

        let config = UadetectConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name, Some("test config".to_string()));
        assert_eq!(config.evidence.max_entries, Some(16));
        assert!(config.evidence.strip_control_chars);
        assert_eq!(config.detect.properties.len(), 2);
        assert!(!config.detect.normalize.decode_structured_user_agent);
        assert!(config.detect.normalize.decode_high_entropy_values);
    }

    #[test]
    fn test_load_from_file() {
        let yaml = "version: \"1\"\n";
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = UadetectConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config, UadetectConfig {
            version: "1".to_string(),
            ..Default::default()
        });
    }

    #[test]
    fn test_missing_file() {
        let result = UadetectConfig::from_file("/nonexistent/uadetect.yaml");
        assert!(matches!(result, Err(ConfigLoadError::FileRead(_))));
    }

    #[test]
    fn test_version_and_stage_validation() {
        let result = UadetectConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(result, Err(ConfigLoadError::UnsupportedVersion(v)) if v == "2.0"));

        let yaml = r#"
version: "1.0"
evidence:
  max_value_bytes: 0
"#;
        let err = UadetectConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("max_value_bytes"));

        let yaml = r#"
version: "1.0"
detect:
  snippet:
    property_name: ""
"#;
        let err = UadetectConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("detect"));
    }

    #[test]
    fn test_dataset_file_feeds_detector() {
        let mut dataset_file = NamedTempFile::new().unwrap();
        dataset_file
            .write_all(
                br#"{"properties":[{"name":"BrowserName","value_type":"string"}],
                     "brands":[{"brand":"Google Chrome","browser":"Google Chrome Browser"}]}"#,
            )
            .unwrap();

        let config = UadetectConfig {
            dataset: Some(dataset_file.path().to_path_buf()),
            detect: DetectConfig {
                properties: vec!["BrowserName".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        let detector = config.build_detector().unwrap();
        assert_eq!(detector.properties(), ["BrowserName"]);

        // The default property list asks for properties this dataset lacks.
        let config = UadetectConfig {
            dataset: config.dataset.clone(),
            ..Default::default()
        };
        assert!(matches!(
            config.build_detector(),
            Err(ConfigLoadError::Detect(DetectError::UnknownProperty(_)))
        ));
    }
}
