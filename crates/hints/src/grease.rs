//! GREASE brand detection and primary-brand selection.
//!
//! Chromium browsers insert a fake brand such as `Not=A?Brand`,
//! `Not/A)Brand` or `Not-A.Brand` into every brand list so servers cannot
//! rely on exact string matches. The shape is always `Not`, one `A`
//! surrounded by punctuation or spaces, then `Brand`.

use crate::payload::BrandVersion;

/// Brand listed by every Chromium derivative alongside its own brand.
pub const ENGINE_BRAND: &str = "Chromium";

/// True for GREASE placeholder brands.
///
/// ```rust
/// use hints::is_grease_brand;
///
/// assert!(is_grease_brand("Not=A?Brand"));
/// assert!(is_grease_brand(" Not A;Brand"));
/// assert!(!is_grease_brand("Google Chrome"));
/// assert!(!is_grease_brand("NotABrand Browser"));
/// ```
pub fn is_grease_brand(brand: &str) -> bool {
    let Some(middle) = brand
        .trim()
        .strip_prefix("Not")
        .and_then(|rest| rest.strip_suffix("Brand"))
    else {
        return false;
    };
    let mut alnum = middle.chars().filter(|c| c.is_alphanumeric());
    alnum.next() == Some('A') && alnum.next().is_none()
}

/// Pick the brand that identifies the browser.
///
/// GREASE entries are skipped. The generic engine brand only wins when no
/// other real brand is listed, so `Chromium` + `Google Chrome` resolves to
/// `Google Chrome` regardless of order. Returns `None` for an empty or
/// all-placeholder list.
pub fn primary_brand(list: &[BrandVersion]) -> Option<&BrandVersion> {
    let mut real = list.iter().filter(|item| !is_grease_brand(&item.brand));
    let first = real.next()?;
    if first.brand != ENGINE_BRAND {
        return Some(first);
    }
    real.find(|item| item.brand != ENGINE_BRAND).or(Some(first))
}
