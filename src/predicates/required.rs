//! Required section - rejects blank values.

/// Whitespace as browsers trim it: Unicode whitespace plus the byte order
/// mark U+FEFF.
pub fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Returns `true` when the value has something besides whitespace.
pub fn is_present(value: &str) -> bool {
    !value.trim_matches(is_blank_char).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_empty() {
        assert!(!is_present(""));
    }

    #[test]
    fn test_required_whitespace_only() {
        assert!(!is_present("   \t\n"));
    }

    #[test]
    fn test_required_byte_order_mark_is_blank() {
        assert!(!is_present("\u{FEFF}"));
        assert!(!is_present(" \u{FEFF}\t"));
        assert!(is_present("\u{FEFF}x"));
    }

    #[test]
    fn test_required_padded_value() {
        assert!(is_present("  Ada Lovelace "));
    }
}
