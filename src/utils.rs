use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Viewports wider than this get a "dial from your phone" confirmation
pub const DESKTOP_MIN_WIDTH: f64 = 768.0;

/// Format a ten digit US number as `(123) 456-7890`; anything else is
/// returned unchanged
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 10 {
        return phone.to_string();
    }
    format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Number part of a `tel:` link
pub fn phone_from_href(href: &str) -> &str {
    href.strip_prefix("tel:").unwrap_or(href)
}

/// Confirmation text for a tel: click, only on desktop-sized viewports
pub fn call_confirmation(href: &str, viewport_width: f64) -> Option<String> {
    (viewport_width > DESKTOP_MIN_WIDTH).then(|| {
        format!(
            "Calling {}\n\nIf you're on a desktop, please dial this number on your phone.",
            phone_from_href(href)
        )
    })
}
