//! Email section - loose `local@domain.tld` shape check.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s\x{FEFF}]+@[^@\s\x{FEFF}]+\.[^@\s\x{FEFF}]+$")
        .expect("email pattern is valid")
});

/// Checks the value looks like `local@domain.tld`.
///
/// No part may contain `@`, whitespace or U+FEFF; the domain needs at least one dot
/// with something on both sides.
pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_minimal_valid() {
        assert!(is_email("a@b.co"));
    }

    #[test]
    fn test_email_missing_tld() {
        assert!(!is_email("a@b"));
    }

    #[test]
    fn test_email_whitespace_in_local_part() {
        assert!(!is_email("a b@c.com"));
    }

    #[test]
    fn test_email_double_at() {
        assert!(!is_email("a@@b.com"));
        assert!(!is_email("a@b@c.com"));
    }

    #[test]
    fn test_email_byte_order_mark_rejected() {
        assert!(!is_email("a\u{FEFF}b@c.com"));
        assert!(!is_email("a@b.co\u{FEFF}"));
    }

    #[test]
    fn test_email_subdomains() {
        assert!(is_email("first.last@mail.example.org"));
    }

    #[test]
    fn test_email_empty() {
        assert!(!is_email(""));
    }
}
