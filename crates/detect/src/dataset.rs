//! Lookup tables behind [`TableEngine`](crate::TableEngine).
//!
//! The dataset declares which properties exist, which values they can take,
//! how UA-CH brands map to browser names and how raw platform versions map
//! to marketing versions. It is plain data: load one from JSON with
//! [`Dataset::from_json`] or start from [`Dataset::builtin`].
//!
//! ```json
//! {
//!   "name": "custom",
//!   "properties": [{"name": "BrowserName", "value_type": "string",
//!                   "component": "Browser", "category": "Browser"}],
//!   "brands": [{"brand": "Google Chrome", "browser": "Chrome"}],
//!   "platform_versions": [{"platform": "Windows", "min_major": 13, "version": "11.0"}]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::DetectError;
use crate::types::ValueType;

/// Descriptive record for one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMetaData {
    pub name: String,
    pub value_type: ValueType,
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

/// One known value of a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueEntity {
    pub property: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// UA-CH brand to browser name, e.g. `Google Chrome` to `Chrome`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandMapping {
    pub brand: String,
    pub browser: String,
}

/// Raw platform version range to marketing version.
///
/// Matches when the platform names agree (case-insensitive) and the raw
/// major version lies in `min_major..=max_major`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformVersionRule {
    pub platform: String,
    pub min_major: u32,
    #[serde(default)]
    pub max_major: Option<u32>,
    pub version: String,
}

/// `User-Agent` substring to a name, used when no client hints are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UaToken {
    pub token: String,
    pub name: String,
}

/// Device model to vendor and marketing name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareMapping {
    pub model: String,
    pub vendor: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub properties: Vec<PropertyMetaData>,
    #[serde(default)]
    pub values: Vec<ValueEntity>,
    #[serde(default)]
    pub brands: Vec<BrandMapping>,
    #[serde(default)]
    pub platform_versions: Vec<PlatformVersionRule>,
    /// Checked in order; put more specific tokens (`Edg/`) before generic
    /// ones (`Chrome/`).
    #[serde(default)]
    pub ua_browsers: Vec<UaToken>,
    #[serde(default)]
    pub ua_platforms: Vec<UaToken>,
    #[serde(default)]
    pub hardware: Vec<HardwareMapping>,
}

impl Dataset {
    /// Parse and validate a JSON dataset.
    pub fn from_json(json: &str) -> Result<Self, DetectError> {
        let dataset: Dataset =
            serde_json::from_str(json).map_err(|e| DetectError::Dataset(e.to_string()))?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn validate(&self) -> Result<(), DetectError> {
        for (idx, property) in self.properties.iter().enumerate() {
            if property.name.trim().is_empty() {
                return Err(DetectError::Dataset(format!(
                    "property #{idx} has an empty name"
                )));
            }
            if self.properties[..idx]
                .iter()
                .any(|other| other.name == property.name)
            {
                return Err(DetectError::Dataset(format!(
                    "property '{}' is declared twice",
                    property.name
                )));
            }
        }
        if let Some(value) = self
            .values
            .iter()
            .find(|value| self.property(&value.property).is_none())
        {
            return Err(DetectError::Dataset(format!(
                "value '{}' refers to undeclared property '{}'",
                value.name, value.property
            )));
        }
        if let Some(rule) = self
            .platform_versions
            .iter()
            .find(|rule| rule.max_major.is_some_and(|max| max < rule.min_major))
        {
            return Err(DetectError::Dataset(format!(
                "platform version rule for '{}' has max_major < min_major",
                rule.platform
            )));
        }
        Ok(())
    }

    pub fn property(&self, name: &str) -> Option<&PropertyMetaData> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn value(&self, property: &str, name: &str) -> Option<&ValueEntity> {
        self.values
            .iter()
            .find(|v| v.property == property && v.name == name)
    }

    /// Values declared for `property`, in dataset order.
    pub fn values_of<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'a ValueEntity> {
        self.values.iter().filter(move |v| v.property == property)
    }

    pub fn browser_for_brand(&self, brand: &str) -> Option<&str> {
        self.brands
            .iter()
            .find(|m| m.brand.eq_ignore_ascii_case(brand))
            .map(|m| m.browser.as_str())
    }

    /// Map a raw platform version to its marketing version.
    ///
    /// Without a matching rule the version is normalized only: `_` becomes
    /// `.` and trailing `.0` components are trimmed down to `major.minor`.
    ///
    /// ```rust
    /// use detect::Dataset;
    ///
    /// let dataset = Dataset::builtin();
    /// assert_eq!(dataset.marketing_platform_version("Windows", "14.0.0"), "11.0");
    /// assert_eq!(dataset.marketing_platform_version("macOS", "14.5.0"), "14.5");
    /// assert_eq!(dataset.marketing_platform_version("macOS", "10_15_7"), "10.15.7");
    /// ```
    pub fn marketing_platform_version(&self, platform: &str, raw: &str) -> String {
        let normalized = raw.trim().replace('_', ".");
        let major = normalized
            .split('.')
            .next()
            .and_then(|m| m.parse::<u32>().ok());
        if let Some(major) = major {
            let rule = self.platform_versions.iter().find(|rule| {
                rule.platform.eq_ignore_ascii_case(platform)
                    && major >= rule.min_major
                    && rule.max_major.map_or(true, |max| major <= max)
            });
            if let Some(rule) = rule {
                return rule.version.clone();
            }
        }
        trim_version(&normalized)
    }

    pub fn hardware_for_model(&self, model: &str) -> Option<&HardwareMapping> {
        self.hardware
            .iter()
            .find(|h| h.model.eq_ignore_ascii_case(model))
    }

    /// Small built-in dataset covering the common desktop and mobile
    /// browsers and platforms.
    pub fn builtin() -> Self {
        let property = |name: &str, value_type, component: &str, description: &str| {
            PropertyMetaData {
                name: name.to_string(),
                value_type,
                component: component.to_string(),
                category: component.to_string(),
                description: description.to_string(),
            }
        };
        let value = |property: &str, name: &str, description: &str| ValueEntity {
            property: property.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
            url: None,
        };
        let brand = |brand: &str, browser: &str| BrandMapping {
            brand: brand.to_string(),
            browser: browser.to_string(),
        };
        let token = |token: &str, name: &str| UaToken {
            token: token.to_string(),
            name: name.to_string(),
        };
        let rule = |platform: &str, min_major, max_major, version: &str| PlatformVersionRule {
            platform: platform.to_string(),
            min_major,
            max_major,
            version: version.to_string(),
        };
        let hardware = |model: &str, vendor: &str, name: &str| HardwareMapping {
            model: model.to_string(),
            vendor: vendor.to_string(),
            name: name.to_string(),
        };

        Dataset {
            name: "builtin".to_string(),
            properties: vec![
                property("BrowserName", ValueType::String, "Browser", "Name of the browser."),
                property("BrowserVersion", ValueType::String, "Browser", "Version of the browser."),
                property(
                    "PlatformName",
                    ValueType::String,
                    "Platform",
                    "Name of the operating system.",
                ),
                property(
                    "PlatformVersion",
                    ValueType::String,
                    "Platform",
                    "Marketing version of the operating system.",
                ),
                property(
                    "PlatformArchitecture",
                    ValueType::String,
                    "Platform",
                    "CPU architecture reported by the client.",
                ),
                property(
                    "IsMobile",
                    ValueType::Bool,
                    "Hardware",
                    "Whether the device is a mobile device.",
                ),
                property(
                    "HardwareModel",
                    ValueType::String,
                    "Hardware",
                    "Model identifier of the device.",
                ),
                property(
                    "HardwareVendor",
                    ValueType::String,
                    "Hardware",
                    "Manufacturer of the device.",
                ),
                property(
                    "HardwareName",
                    ValueType::List,
                    "Hardware",
                    "Marketing names of the device.",
                ),
            ],
            values: vec![
                value("BrowserName", "Chrome", "Google Chrome."),
                value("BrowserName", "Edge", "Microsoft Edge (Chromium)."),
                value("BrowserName", "Opera", "Opera."),
                value("BrowserName", "Firefox", "Mozilla Firefox."),
                value("BrowserName", "Safari", "Apple Safari."),
                value("PlatformName", "Windows", "Microsoft Windows."),
                value("PlatformName", "macOS", "Apple macOS."),
                value("PlatformName", "Android", "Google Android."),
                value("PlatformName", "iOS", "Apple iOS."),
                value("PlatformName", "Linux", "Linux."),
            ],
            brands: vec![
                brand("Google Chrome", "Chrome"),
                brand("Microsoft Edge", "Edge"),
                brand("Opera", "Opera"),
                brand("Opera GX", "Opera GX"),
                brand("Brave", "Brave"),
                brand("Samsung Internet", "Samsung Browser"),
                brand("YaBrowser", "Yandex Browser"),
                brand("Chromium", "Chromium"),
            ],
            platform_versions: vec![
                rule("Windows", 13, None, "11.0"),
                rule("Windows", 1, Some(10), "10.0"),
            ],
            ua_browsers: vec![
                token("Edg/", "Edge"),
                token("OPR/", "Opera"),
                token("SamsungBrowser/", "Samsung Browser"),
                token("Firefox/", "Firefox"),
                token("CriOS/", "Chrome"),
                token("Chrome/", "Chrome"),
                token("Version/", "Safari"),
            ],
            ua_platforms: vec![
                token("Windows NT ", "Windows"),
                token("iPhone OS ", "iOS"),
                token("CPU OS ", "iOS"),
                token("Mac OS X ", "macOS"),
                token("Android ", "Android"),
                token("Linux", "Linux"),
            ],
            hardware: vec![
                hardware("Pixel 8", "Google", "Pixel 8"),
                hardware("SM-S918B", "Samsung", "Galaxy S23 Ultra"),
            ],
        }
    }
}

/// Trim trailing `.0` components while more than two remain.
fn trim_version(version: &str) -> String {
    let mut parts: Vec<&str> = version.split('.').collect();
    while parts.len() > 2 && parts.last() == Some(&"0") {
        parts.pop();
    }
    parts.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_valid() {
        assert!(Dataset::builtin().validate().is_ok());
    }

    #[test]
    fn trim_keeps_major_minor() {
        assert_eq!(trim_version("14.5.0"), "14.5");
        assert_eq!(trim_version("14.0.0"), "14.0");
        assert_eq!(trim_version("15"), "15");
        assert_eq!(trim_version("1.2.3"), "1.2.3");
    }

    #[test]
    fn windows_rules() {
        let dataset = Dataset::builtin();
        assert_eq!(dataset.marketing_platform_version("Windows", "15.0.0"), "11.0");
        assert_eq!(dataset.marketing_platform_version("windows", "10.0.0"), "10.0");
        // Outside every rule: normalized only.
        assert_eq!(dataset.marketing_platform_version("Windows", "0.3.0"), "0.3");
    }

    #[test]
    fn from_json_defaults_missing_tables() {
        let dataset = Dataset::from_json(
            r#"{"properties":[{"name":"BrowserName","value_type":"string"}],
                "brands":[{"brand":"Google Chrome","browser":"Chrome"}]}"#,
        )
        .expect("parse dataset");
        assert_eq!(dataset.browser_for_brand("google chrome"), Some("Chrome"));
        assert!(dataset.platform_versions.is_empty());
        assert_eq!(dataset.property("BrowserName").map(|p| p.value_type), Some(ValueType::String));
    }

    #[test]
    fn from_json_rejects_inconsistent_data() {
        let dup = r#"{"properties":[{"name":"A","value_type":"bool"},{"name":"A","value_type":"bool"}]}"#;
        assert!(matches!(Dataset::from_json(dup), Err(DetectError::Dataset(_))));

        let orphan = r#"{"values":[{"property":"Missing","name":"x"}]}"#;
        assert!(matches!(Dataset::from_json(orphan), Err(DetectError::Dataset(_))));

        let bad_rule = r#"{"platform_versions":[{"platform":"Windows","min_major":5,"max_major":1,"version":"x"}]}"#;
        assert!(matches!(Dataset::from_json(bad_rule), Err(DetectError::Dataset(_))));

        assert!(matches!(Dataset::from_json("{"), Err(DetectError::Dataset(_))));
    }
}
