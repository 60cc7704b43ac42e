use std::borrow::Cow;

/// Remove ASCII control characters (0x00-0x1F and 0x7F).
///
/// Borrows when there is nothing to strip.
///
/// ```rust
/// use evidence::strip_control_chars;
///
/// assert_eq!(strip_control_chars("a\u{0}b"), "ab");
/// assert_eq!(strip_control_chars("clean"), "clean");
/// ```
pub fn strip_control_chars(value: &str) -> Cow<'_, str> {
    if !value.chars().any(|c| c.is_ascii_control()) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(value.chars().filter(|c| !c.is_ascii_control()).collect())
}
