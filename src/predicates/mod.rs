//! Field predicates
//!
//! Each module checks one kind of constraint on a raw input value.

mod digits;
mod email;
mod length;
mod required;

pub use digits::has_min_digits;
pub use email::is_email;
pub use length::{has_min_length, text_length};
pub use required::is_present;

/// Validity condition attached to a [`ValidationRule`](crate::ValidationRule).
///
/// Evaluated fresh on every check, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Trimmed value is non-empty.
    Required,
    /// `local@domain.tld` with no `@` or whitespace in any part.
    Email,
    /// At least this many UTF-16 code units.
    MinLength(usize),
    /// At least this many digits once everything else is stripped.
    MinDigits(usize),
}

impl Predicate {
    pub fn evaluate(&self, value: &str) -> bool {
        match *self {
            Predicate::Required => is_present(value),
            Predicate::Email => is_email(value),
            Predicate::MinLength(min) => has_min_length(value, min),
            Predicate::MinDigits(min) => has_min_digits(value, min),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_dispatch() {
        assert!(Predicate::Required.evaluate(" x "));
        assert!(Predicate::Email.evaluate("a@b.co"));
        assert!(Predicate::MinLength(3).evaluate("abc"));
        assert!(Predicate::MinDigits(2).evaluate("a1b2"));
        assert!(!Predicate::MinDigits(3).evaluate("a1b2"));
    }
}
