use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use evidence::fields;

use crate::error::HintsError;
use crate::header::{format_brand_list, format_sf_boolean, format_sf_string};

/// One `(brand, version)` element of a brand list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandVersion {
    pub brand: String,
    #[serde(default)]
    pub version: String,
}

impl BrandVersion {
    pub fn new(brand: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            version: version.into(),
        }
    }
}

/// Decoded rich evidence.
///
/// Every field is optional and stays `None` unless the payload carried it;
/// nothing is defaulted. List order is the order the payload used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichPayload {
    pub brands: Option<Vec<BrandVersion>>,
    pub full_version_list: Option<Vec<BrandVersion>>,
    pub mobile: Option<bool>,
    pub model: Option<String>,
    pub platform: Option<String>,
    pub platform_version: Option<String>,
    pub architecture: Option<String>,
    pub bitness: Option<String>,
}

impl RichPayload {
    /// True when no field was decoded.
    pub fn is_empty(&self) -> bool {
        self == &RichPayload::default()
    }

    /// Render the decoded fields as the `sec-ch-ua-*` header values a browser
    /// would have sent. Absent fields produce no entry.
    ///
    /// ```rust
    /// use hints::{BrandVersion, RichPayload};
    ///
    /// let payload = RichPayload {
    ///     platform: Some("macOS".into()),
    ///     mobile: Some(false),
    ///     ..Default::default()
    /// };
    /// let headers = payload.header_fields();
    /// assert_eq!(
    ///     headers,
    ///     vec![
    ///         ("sec-ch-ua-mobile", "?0".to_string()),
    ///         ("sec-ch-ua-platform", "\"macOS\"".to_string()),
    ///     ]
    /// );
    /// ```
    pub fn header_fields(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::with_capacity(8);
        if let Some(brands) = &self.brands {
            out.push((fields::SEC_CH_UA, format_brand_list(brands)));
        }
        if let Some(list) = &self.full_version_list {
            out.push((fields::SEC_CH_UA_FULL_VERSION_LIST, format_brand_list(list)));
        }
        if let Some(mobile) = self.mobile {
            out.push((fields::SEC_CH_UA_MOBILE, format_sf_boolean(mobile).to_string()));
        }
        if let Some(model) = &self.model {
            out.push((fields::SEC_CH_UA_MODEL, format_sf_string(model)));
        }
        if let Some(platform) = &self.platform {
            out.push((fields::SEC_CH_UA_PLATFORM, format_sf_string(platform)));
        }
        if let Some(version) = &self.platform_version {
            out.push((fields::SEC_CH_UA_PLATFORM_VERSION, format_sf_string(version)));
        }
        if let Some(arch) = &self.architecture {
            out.push((fields::SEC_CH_UA_ARCH, format_sf_string(arch)));
        }
        if let Some(bitness) = &self.bitness {
            out.push((fields::SEC_CH_UA_BITNESS, format_sf_string(bitness)));
        }
        out
    }
}

/// Parse a payload document that must be a JSON object.
///
/// Derived structs would otherwise accept a JSON array and fill fields by
/// position.
pub(crate) fn parse_json_object<T: DeserializeOwned>(json: &str) -> Result<T, HintsError> {
    let json_err = |e: serde_json::Error| HintsError::Json(e.to_string());
    let value: Value = serde_json::from_str(json).map_err(json_err)?;
    if !value.is_object() {
        return Err(HintsError::Json("payload is not a JSON object".into()));
    }
    serde_json::from_value(value).map_err(json_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_has_no_headers() {
        let payload = RichPayload::default();
        assert!(payload.is_empty());
        assert!(payload.header_fields().is_empty());
    }

    #[test]
    fn empty_model_is_still_rendered() {
        let payload = RichPayload {
            model: Some(String::new()),
            ..Default::default()
        };
        assert!(!payload.is_empty());
        assert_eq!(
            payload.header_fields(),
            vec![(fields::SEC_CH_UA_MODEL, "\"\"".to_string())]
        );
    }

    #[test]
    fn brand_lists_render_in_order() {
        let payload = RichPayload {
            brands: Some(vec![
                BrandVersion::new("Not/A)Brand", "8"),
                BrandVersion::new("Chromium", "126"),
            ]),
            ..Default::default()
        };
        let headers = payload.header_fields();
        assert_eq!(
            headers[0].1,
            "\"Not/A)Brand\";v=\"8\", \"Chromium\";v=\"126\""
        );
    }
}
