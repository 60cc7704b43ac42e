//! Structured-header helpers for `Sec-CH-UA*` values.
//!
//! Client hints use a small subset of RFC 8941 structured fields:
//!
//! ```text
//! sec-ch-ua          "Google Chrome";v="129", "Not=A?Brand";v="8"
//! sec-ch-ua-mobile   ?0
//! sec-ch-ua-platform "macOS"
//! ```
//!
//! Rendering is exact. Parsing is forgiving: unquoted tokens are accepted as
//! bare strings and unknown parameters are ignored.

use crate::payload::BrandVersion;

/// Quote a string as an sf-string, escaping `\` and `"`.
pub fn format_sf_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

pub fn format_sf_boolean(value: bool) -> &'static str {
    if value {
        "?1"
    } else {
        "?0"
    }
}

/// Render a brand list as `"Brand";v="version", ...`.
pub fn format_brand_list(list: &[BrandVersion]) -> String {
    list.iter()
        .map(|item| {
            format!(
                "{};v={}",
                format_sf_string(&item.brand),
                format_sf_string(&item.version)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Unquote an sf-string. Unquoted input is returned trimmed.
///
/// ```rust
/// use hints::parse_sf_string;
///
/// assert_eq!(parse_sf_string("\"macOS\""), "macOS");
/// assert_eq!(parse_sf_string(" Windows "), "Windows");
/// assert_eq!(parse_sf_string("\"a\\\"b\""), "a\"b");
/// ```
pub fn parse_sf_string(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(inner) = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return trimmed.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut escaped = false;
    for c in inner.chars() {
        if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse `?1` / `?0`.
pub fn parse_sf_boolean(raw: &str) -> Option<bool> {
    match raw.trim() {
        "?1" => Some(true),
        "?0" => Some(false),
        _ => None,
    }
}

/// Parse a `Sec-CH-UA` style brand list, keeping the header's order.
///
/// ```rust
/// use hints::{parse_brand_list, BrandVersion};
///
/// let list = parse_brand_list("\"Chromium\";v=\"124\", \"Not-A.Brand\";v=\"99\"");
/// assert_eq!(
///     list,
///     vec![
///         BrandVersion::new("Chromium", "124"),
///         BrandVersion::new("Not-A.Brand", "99"),
///     ]
/// );
/// ```
pub fn parse_brand_list(raw: &str) -> Vec<BrandVersion> {
    split_outside_quotes(raw, ',')
        .into_iter()
        .filter_map(|item| {
            let mut parts = split_outside_quotes(item, ';').into_iter();
            let brand = parse_sf_string(parts.next()?);
            if brand.is_empty() {
                return None;
            }
            let version = parts
                .filter_map(|param| param.split_once('='))
                .find(|(name, _)| name.trim() == "v")
                .map(|(_, value)| parse_sf_string(value))
                .unwrap_or_default();
            Some(BrandVersion { brand, version })
        })
        .collect()
}

fn split_outside_quotes(raw: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;
    for (idx, c) in raw.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            c if c == sep && !in_quotes => {
                parts.push(&raw[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&raw[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chrome_header() {
        let list = parse_brand_list(
            "\"Google Chrome\";v=\"129\", \"Not=A?Brand\";v=\"8\", \"Chromium\";v=\"129\"",
        );
        let brands: Vec<&str> = list.iter().map(|b| b.brand.as_str()).collect();
        assert_eq!(brands, vec!["Google Chrome", "Not=A?Brand", "Chromium"]);
        assert_eq!(list[1].version, "8");
    }

    #[test]
    fn separators_inside_quotes_are_literal() {
        let list = parse_brand_list("\"Not;A,Brand\";v=\"99\", \"Edge\";v=\"120\"");
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].brand, "Not;A,Brand");
        assert_eq!(list[1].version, "120");
    }

    #[test]
    fn missing_version_parameter_is_empty() {
        let list = parse_brand_list("\"Chromium\"");
        assert_eq!(list, vec![BrandVersion::new("Chromium", "")]);
    }

    #[test]
    fn empty_header_yields_empty_list() {
        assert!(parse_brand_list("").is_empty());
        assert!(parse_brand_list(" , ").is_empty());
    }

    #[test]
    fn format_then_parse_keeps_order_and_escapes() {
        let list = vec![
            BrandVersion::new("Quote\"d", "1.0"),
            BrandVersion::new("Not/A)Brand", "8.0.0.0"),
            BrandVersion::new("Chromium", "126.0.6478.127"),
        ];
        assert_eq!(parse_brand_list(&format_brand_list(&list)), list);
    }

    #[test]
    fn booleans() {
        assert_eq!(parse_sf_boolean("?1"), Some(true));
        assert_eq!(parse_sf_boolean(" ?0 "), Some(false));
        assert_eq!(parse_sf_boolean("true"), None);
        assert_eq!(format_sf_boolean(true), "?1");
    }
}
