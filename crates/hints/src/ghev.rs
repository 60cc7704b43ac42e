//! High Entropy Values payloads.
//!
//! The client-side snippet calls `navigator.userAgentData.getHighEntropyValues`
//! and sends back `btoa(JSON.stringify(values))`:
//!
//! ```json
//! {"brands":[{"brand":"Not/A)Brand","version":"8"}, ...],
//!  "fullVersionList":[...], "mobile":false, "model":"",
//!  "platform":"macOS", "platformVersion":"14.5.0"}
//! ```
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::HintsError;
use crate::payload::{parse_json_object, BrandVersion, RichPayload};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GhevDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    brands: Option<Vec<BrandVersion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    full_version_list: Option<Vec<BrandVersion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mobile: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    platform_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    architecture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bitness: Option<String>,
}

impl From<GhevDocument> for RichPayload {
    fn from(doc: GhevDocument) -> Self {
        RichPayload {
            brands: doc.brands,
            full_version_list: doc.full_version_list,
            mobile: doc.mobile,
            model: doc.model,
            platform: doc.platform,
            platform_version: doc.platform_version,
            architecture: doc.architecture,
            bitness: doc.bitness,
        }
    }
}

impl From<&RichPayload> for GhevDocument {
    fn from(payload: &RichPayload) -> Self {
        GhevDocument {
            brands: payload.brands.clone(),
            full_version_list: payload.full_version_list.clone(),
            mobile: payload.mobile,
            model: payload.model.clone(),
            platform: payload.platform.clone(),
            platform_version: payload.platform_version.clone(),
            architecture: payload.architecture.clone(),
            bitness: payload.bitness.clone(),
        }
    }
}

/// Decode a base64 High Entropy Values payload, reporting why it failed.
pub fn try_decode_high_entropy_values(encoded: &str) -> Result<RichPayload, HintsError> {
    let bytes = decode_base64(encoded)?;
    let json = std::str::from_utf8(&bytes).map_err(|_| HintsError::Utf8)?;
    let doc: GhevDocument = parse_json_object(json)?;
    Ok(doc.into())
}

/// Decode a base64 High Entropy Values payload.
///
/// Malformed input yields an empty [`RichPayload`]; it never fails the
/// request.
///
/// ```rust
/// use hints::decode_high_entropy_values;
///
/// // {"platform":"macOS"}
/// let payload = decode_high_entropy_values("eyJwbGF0Zm9ybSI6Im1hY09TIn0=");
/// assert_eq!(payload.platform.as_deref(), Some("macOS"));
///
/// assert!(decode_high_entropy_values("not base64!").is_empty());
/// ```
pub fn decode_high_entropy_values(encoded: &str) -> RichPayload {
    match try_decode_high_entropy_values(encoded) {
        Ok(payload) => payload,
        Err(err) => {
            debug!(error = %err, "ghev_decode_failed");
            RichPayload::default()
        }
    }
}

/// Encode a payload the way the client-side snippet does.
pub fn encode_high_entropy_values(payload: &RichPayload) -> String {
    // Serializing plain strings/bools/vecs cannot fail.
    let json = serde_json::to_string(&GhevDocument::from(payload)).unwrap_or_default();
    STANDARD.encode(json)
}

fn decode_base64(encoded: &str) -> Result<Vec<u8>, HintsError> {
    // Form-decoded query strings turn '+' into ' '.
    let cleaned: String = encoded
        .trim()
        .chars()
        .map(|c| if c == ' ' { '+' } else { c })
        .collect();
    if cleaned.is_empty() {
        return Err(HintsError::Empty);
    }
    let mut first_err = None;
    for engine in [&STANDARD, &URL_SAFE, &STANDARD_NO_PAD, &URL_SAFE_NO_PAD] {
        match engine.decode(cleaned.as_bytes()) {
            Ok(bytes) => return Ok(bytes),
            Err(err) => {
                first_err.get_or_insert(err);
            }
        }
    }
    Err(HintsError::Base64(
        first_err.map(|e| e.to_string()).unwrap_or_default(),
    ))
}
