//! Structured User-Agent payloads (OpenRTB 2.6 `sua` object).
//!
//! ```json
//! {"browsers":[{"brand":"Chromium","version":["124","0","6367","91"]}],
//!  "platform":{"brand":"Windows","version":["14","0","0"]},
//!  "mobile":0,"architecture":"x86","source":2}
//! ```
//!
//! Versions arrive as component arrays and are joined with `.`.
use serde::Deserialize;
use tracing::debug;

use crate::error::HintsError;
use crate::payload::{parse_json_object, BrandVersion, RichPayload};

#[derive(Debug, Deserialize)]
struct SuaDocument {
    #[serde(default)]
    browsers: Option<Vec<SuaBrand>>,
    #[serde(default)]
    platform: Option<SuaBrand>,
    #[serde(default)]
    mobile: Option<u8>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    architecture: Option<String>,
    #[serde(default)]
    bitness: Option<String>,
    // `source` (value provenance) is ignored.
}

#[derive(Debug, Deserialize)]
struct SuaBrand {
    brand: String,
    #[serde(default)]
    version: Vec<String>,
}

impl SuaBrand {
    fn joined_version(&self) -> String {
        self.version.join(".")
    }

    fn major_version(&self) -> String {
        self.version.first().cloned().unwrap_or_default()
    }
}

impl From<SuaDocument> for RichPayload {
    fn from(doc: SuaDocument) -> Self {
        let (brands, full_version_list) = match &doc.browsers {
            Some(browsers) => (
                Some(
                    browsers
                        .iter()
                        .map(|b| BrandVersion::new(b.brand.clone(), b.major_version()))
                        .collect(),
                ),
                Some(
                    browsers
                        .iter()
                        .map(|b| BrandVersion::new(b.brand.clone(), b.joined_version()))
                        .collect(),
                ),
            ),
            None => (None, None),
        };

        let platform_version = doc
            .platform
            .as_ref()
            .filter(|p| !p.version.is_empty())
            .map(SuaBrand::joined_version);

        RichPayload {
            brands,
            full_version_list,
            mobile: doc.mobile.map(|m| m != 0),
            model: doc.model,
            platform: doc.platform.map(|p| p.brand),
            platform_version,
            architecture: doc.architecture,
            bitness: doc.bitness,
        }
    }
}

/// Decode a Structured User-Agent JSON payload, reporting why it failed.
pub fn try_decode_structured_user_agent(json: &str) -> Result<RichPayload, HintsError> {
    let json = json.trim();
    if json.is_empty() {
        return Err(HintsError::Empty);
    }
    let doc: SuaDocument = parse_json_object(json)?;
    Ok(doc.into())
}

/// Decode a Structured User-Agent JSON payload.
///
/// Malformed input yields an empty [`RichPayload`].
pub fn decode_structured_user_agent(json: &str) -> RichPayload {
    match try_decode_structured_user_agent(json) {
        Ok(payload) => payload,
        Err(err) => {
            debug!(error = %err, "sua_decode_failed");
            RichPayload::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOWS_CHROME_124: &str = r#"{"browsers":[{"brand":"Chromium","version":["124","0","6367","91"]},{"brand":"Google Chrome","version":["124","0","6367","91"]},{"brand":"Not-A.Brand","version":["99","0","0","0"]}],"platform":{"brand":"Windows","version":["14","0","0"]},"mobile":0,"architecture":"x86","source":2}"#;

    #[test]
    fn decodes_browsers_and_platform() {
        let payload = try_decode_structured_user_agent(WINDOWS_CHROME_124).expect("decode");
        let full = payload.full_version_list.as_ref().expect("full list");
        assert_eq!(full[0], BrandVersion::new("Chromium", "124.0.6367.91"));
        assert_eq!(full[2], BrandVersion::new("Not-A.Brand", "99.0.0.0"));
        let brands = payload.brands.as_ref().expect("brands");
        assert_eq!(brands[1], BrandVersion::new("Google Chrome", "124"));
        assert_eq!(payload.platform.as_deref(), Some("Windows"));
        assert_eq!(payload.platform_version.as_deref(), Some("14.0.0"));
        assert_eq!(payload.mobile, Some(false));
        assert_eq!(payload.architecture.as_deref(), Some("x86"));
        assert_eq!(payload.model, None);
    }

    #[test]
    fn mobile_flag_from_integer() {
        let payload = decode_structured_user_agent(r#"{"mobile":1}"#);
        assert_eq!(payload.mobile, Some(true));
        assert!(payload.brands.is_none());
        assert!(payload.full_version_list.is_none());
    }

    #[test]
    fn platform_without_version_has_no_version() {
        let payload = decode_structured_user_agent(r#"{"platform":{"brand":"Linux"}}"#);
        assert_eq!(payload.platform.as_deref(), Some("Linux"));
        assert_eq!(payload.platform_version, None);
    }

    #[test]
    fn malformed_json_is_empty() {
        assert!(decode_structured_user_agent("{\"browsers\": [").is_empty());
        assert!(decode_structured_user_agent("[]").is_empty());
        assert!(decode_structured_user_agent("").is_empty());
        assert!(decode_structured_user_agent(r#"{"mobile":"no"}"#).is_empty());
    }

    #[test]
    fn top_level_array_is_rejected() {
        let positional = r#"[[{"brand":"X","version":["1"]}],{"brand":"Android"},1]"#;
        assert!(matches!(
            try_decode_structured_user_agent(positional),
            Err(HintsError::Json(_))
        ));
        assert!(decode_structured_user_agent(positional).is_empty());
    }
}
