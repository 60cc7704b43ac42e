//! Rich-evidence decoders for User-Agent Client Hints.
//!
//! Browsers that support UA-CH can hand over richer evidence than the
//! `User-Agent` header, either because the server asked for the high entropy
//! `Sec-CH-UA-*` headers or because a client-side snippet posted them back.
//! Two encodings reach us through query strings and cookies:
//!
//! - **High Entropy Values** (`51d_gethighentropyvalues`): base64 JSON from
//!   `navigator.userAgentData.getHighEntropyValues()`.
//! - **Structured User-Agent** (`51d_structureduseragent`): raw OpenRTB-style
//!   JSON with version component arrays.
//!
//! Both decode into one [`RichPayload`], which renders back into the
//! `sec-ch-ua-*` header values the rest of detection understands.
//!
//! ## Pure functions
//!
//! Decoding does no I/O and keeps no state. Malformed input degrades to an
//! empty payload; callers that want the reason use the `try_` variants.
//!
//! ```
//! use hints::{decode_structured_user_agent, primary_brand};
//!
//! let payload = decode_structured_user_agent(
//!     r#"{"browsers":[{"brand":"Not-A.Brand","version":["99"]},
//!                     {"brand":"Google Chrome","version":["124","0"]}]}"#,
//! );
//! let list = payload.full_version_list.as_deref().unwrap_or_default();
//! assert_eq!(primary_brand(list).map(|b| b.brand.as_str()), Some("Google Chrome"));
//! ```

mod error;
mod ghev;
mod grease;
mod header;
mod payload;
mod sua;

pub use crate::error::HintsError;
pub use crate::ghev::{
    decode_high_entropy_values, encode_high_entropy_values, try_decode_high_entropy_values,
};
pub use crate::grease::{is_grease_brand, primary_brand, ENGINE_BRAND};
pub use crate::header::{
    format_brand_list, format_sf_boolean, format_sf_string, parse_brand_list, parse_sf_boolean,
    parse_sf_string,
};
pub use crate::payload::{BrandVersion, RichPayload};
pub use crate::sua::{decode_structured_user_agent, try_decode_structured_user_agent};
