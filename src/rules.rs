//! Field rule table.
//!
//! Binds each form field to a [`Predicate`] and the message shown when the
//! predicate fails. The same table drives blur, focus and submit handling.

use thiserror::Error;

use crate::predicates::Predicate;

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_PHONE_DIGITS: usize = 10;

/// A rule that failed for the current value of its field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field_id}: {message}")]
pub struct RuleViolation {
    pub field_id: &'static str,
    pub message: &'static str,
}

/// Maps a field identifier to its id-safe form: every whitespace character
/// becomes `-`.
pub fn slug(field_id: &str) -> String {
    field_id
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRule {
    field_id: &'static str,
    predicate: Predicate,
    message: &'static str,
}

impl ValidationRule {
    pub const fn new(field_id: &'static str, predicate: Predicate, message: &'static str) -> Self {
        Self {
            field_id,
            predicate,
            message,
        }
    }

    /// Id of the input element this rule governs.
    pub fn field_id(&self) -> &'static str {
        self.field_id
    }

    pub fn predicate(&self) -> Predicate {
        self.predicate
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn slug(&self) -> String {
        slug(self.field_id)
    }

    /// Id of the element that displays this rule's message.
    pub fn error_id(&self) -> String {
        format!("{}-error", self.slug())
    }

    pub fn check(&self, value: &str) -> Result<(), RuleViolation> {
        if self.predicate.evaluate(value) {
            Ok(())
        } else {
            Err(RuleViolation {
                field_id: self.field_id,
                message: self.message,
            })
        }
    }
}

/// Ordered, fixed set of rules. Order only affects the order violations are
/// reported in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<ValidationRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<ValidationRule>) -> Self {
        Self { rules }
    }

    /// The signup form: name, email, password, phone number, address.
    pub fn standard() -> Self {
        Self::new(vec![
            ValidationRule::new("name", Predicate::Required, "Name is required."),
            ValidationRule::new("email", Predicate::Email, "Enter a valid email."),
            ValidationRule::new(
                "password",
                Predicate::MinLength(MIN_PASSWORD_LENGTH),
                "Password must be at least 6 characters.",
            ),
            ValidationRule::new(
                "phone number",
                Predicate::MinDigits(MIN_PHONE_DIGITS),
                "Enter a valid phone number.",
            ),
            ValidationRule::new("address", Predicate::Required, "Address is required."),
        ])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, field_id: &str) -> Option<&ValidationRule> {
        self.rules.iter().find(|r| r.field_id == field_id)
    }

    /// Checks every rule in table order, `value_of` supplying each field's
    /// current value.
    pub fn check_all<F>(&self, mut value_of: F) -> Vec<RuleViolation>
    where
        F: FnMut(&ValidationRule) -> String,
    {
        self.rules
            .iter()
            .filter_map(|rule| rule.check(&value_of(rule)).err())
            .collect()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a ValidationRule;
    type IntoIter = std::slice::Iter<'a, ValidationRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
