//! Canonical form of raw cell text
//!
//! Shift logs are typed by hand with a Japanese IME, so the same note may
//! arrive with full-width digits or ideographic spaces. Every name and content
//! cell goes through [`normalize`] before it is compared against markers.

/// Normalize raw cell text
///
/// Absent input yields an empty string. Otherwise the ideographic space
/// (U+3000) and full-width digits `０`-`９` become their ASCII equivalents,
/// then leading and trailing whitespace is trimmed.
///
/// ```
/// use care_diary_core::normalize;
///
/// assert_eq!(normalize(Some("　２０１号室 ")), "201号室");
/// assert_eq!(normalize(None), "");
/// ```
pub fn normalize(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let halfwidth: String = raw.chars().map(to_halfwidth).collect();
    halfwidth.trim().to_string()
}

fn to_halfwidth(c: char) -> char {
    match c {
        '\u{3000}' => ' ',
        '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
        _ => c,
    }
}
