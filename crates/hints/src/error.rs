use thiserror::Error;

/// Reasons a rich-evidence payload could not be decoded.
///
/// Only the `try_decode_*` functions surface these. The plain `decode_*`
/// functions log them and return an empty [`RichPayload`](crate::RichPayload).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HintsError {
    #[error("payload is empty")]
    Empty,
    #[error("invalid base64: {0}")]
    Base64(String),
    #[error("decoded payload is not UTF-8")]
    Utf8,
    #[error("invalid JSON: {0}")]
    Json(String),
}
