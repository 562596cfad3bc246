//! Digits section - phone-style numbers with arbitrary punctuation.

/// Checks the value holds at least `min` ASCII digits, ignoring every other
/// character.
pub fn has_min_digits(value: &str, min: usize) -> bool {
    value.chars().filter(|c| c.is_ascii_digit()).count() >= min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_with_separators() {
        assert!(has_min_digits("123-456-7890", 10));
        assert!(has_min_digits("(123) 456 7890", 10));
    }

    #[test]
    fn test_digits_too_few() {
        assert!(!has_min_digits("12345", 10));
        assert!(!has_min_digits("123-456-789", 10));
    }

    #[test]
    fn test_digits_empty() {
        assert!(!has_min_digits("", 10));
    }
}
