//! Well-known evidence field names (lower-cased).

pub const USER_AGENT: &str = "user-agent";

pub const SEC_CH_UA: &str = "sec-ch-ua";
pub const SEC_CH_UA_MOBILE: &str = "sec-ch-ua-mobile";
pub const SEC_CH_UA_PLATFORM: &str = "sec-ch-ua-platform";
pub const SEC_CH_UA_PLATFORM_VERSION: &str = "sec-ch-ua-platform-version";
pub const SEC_CH_UA_MODEL: &str = "sec-ch-ua-model";
pub const SEC_CH_UA_FULL_VERSION_LIST: &str = "sec-ch-ua-full-version-list";
pub const SEC_CH_UA_ARCH: &str = "sec-ch-ua-arch";
pub const SEC_CH_UA_BITNESS: &str = "sec-ch-ua-bitness";

/// Base64 JSON from `navigator.userAgentData.getHighEntropyValues()`.
pub const HIGH_ENTROPY_VALUES: &str = "51d_gethighentropyvalues";
/// OpenRTB-style structured user-agent JSON.
pub const STRUCTURED_USER_AGENT: &str = "51d_structureduseragent";

/// Client-hint fields whose absence makes the client-side snippet worth
/// emitting.
pub const SNIPPET_HINT_FIELDS: [&str; 6] = [
    SEC_CH_UA,
    SEC_CH_UA_MOBILE,
    SEC_CH_UA_PLATFORM,
    SEC_CH_UA_PLATFORM_VERSION,
    SEC_CH_UA_MODEL,
    SEC_CH_UA_FULL_VERSION_LIST,
];
