//! Contact field validation used by the registration flow.

use std::sync::OnceLock;

use regex::Regex;

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\+?38)?0\d{9}$").expect("phone pattern compiles"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern compiles")
    })
}

/// Accepts Ukrainian numbers such as `+380501234567`, `380501234567` or
/// `050 123 45 67`. Spaces are ignored.
pub fn validate_phone(raw: &str) -> bool {
    let compact: String = raw.chars().filter(|c| *c != ' ').collect();
    phone_pattern().is_match(&compact)
}

pub fn validate_email(raw: &str) -> bool {
    email_pattern().is_match(raw)
}
