use std::sync::OnceLock;

use regex::Regex;

fn name_part_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z]+([-'][A-Za-z]+)*$").expect("hard-coded name pattern")
    })
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("hard-coded email pattern"))
}

/// A name is one or more whitespace-separated parts, each at least two
/// characters of letters optionally joined by single hyphens or
/// apostrophes ("Anne-Marie", "O'Brien"). Empty input is invalid.
pub fn is_valid_name(name: &str) -> bool {
    let mut parts = name.split_whitespace().peekable();
    if parts.peek().is_none() {
        return false;
    }
    parts.all(|part| part.len() >= 2 && name_part_pattern().is_match(part))
}

/// `local@domain.tld` shape: exactly one `@`, no whitespace, and a dot
/// after the `@` with non-empty segments around it.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}
