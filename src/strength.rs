//! Password strength evaluator - five-point heuristic and its classification.

use secrecy::{ExposeSecret, SecretString};

use crate::predicates::text_length;

pub const WEAK_COLOR: &str = "#e53e3e";
pub const MEDIUM_COLOR: &str = "#f6ad55";
pub const STRONG_COLOR: &str = "#38a169";
/// Meter background while the password field is empty.
pub const NEUTRAL_COLOR: &str = "#eee";

pub const MAX_SCORE: u8 = 5;

type Criterion = fn(&str) -> bool;

/// One point per satisfied criterion.
const CRITERIA: [(&str, Criterion); 5] = [
    ("min length", has_min_length),
    ("uppercase", has_uppercase),
    ("digit", has_digit),
    ("symbol", has_symbol),
    ("long", is_long),
];

fn has_min_length(pwd: &str) -> bool {
    text_length(pwd) >= 6
}

fn has_uppercase(pwd: &str) -> bool {
    pwd.chars().any(|c| c.is_ascii_uppercase())
}

fn has_digit(pwd: &str) -> bool {
    pwd.chars().any(|c| c.is_ascii_digit())
}

fn has_symbol(pwd: &str) -> bool {
    pwd.chars().any(|c| !c.is_ascii_alphanumeric())
}

fn is_long(pwd: &str) -> bool {
    text_length(pwd) >= 10
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrengthLabel {
    Weak,
    Medium,
    Strong,
}

impl StrengthLabel {
    /// `0..=1` is weak, `2..=3` medium, anything higher strong.
    pub fn from_score(score: u8) -> Self {
        match score {
            0 | 1 => StrengthLabel::Weak,
            2 | 3 => StrengthLabel::Medium,
            _ => StrengthLabel::Strong,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Medium => "Medium",
            StrengthLabel::Strong => "Strong",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            StrengthLabel::Weak => WEAK_COLOR,
            StrengthLabel::Medium => MEDIUM_COLOR,
            StrengthLabel::Strong => STRONG_COLOR,
        }
    }

    /// CSS width of the meter fill.
    pub fn width(&self) -> &'static str {
        match self {
            StrengthLabel::Weak => "33%",
            StrengthLabel::Medium => "66%",
            StrengthLabel::Strong => "100%",
        }
    }

    pub fn fill_fraction(&self) -> f64 {
        match self {
            StrengthLabel::Weak => 1.0 / 3.0,
            StrengthLabel::Medium => 2.0 / 3.0,
            StrengthLabel::Strong => 1.0,
        }
    }
}

impl std::fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthResult {
    pub score: u8,
    pub label: StrengthLabel,
    pub color: &'static str,
    pub fill_fraction: f64,
}

impl StrengthResult {
    pub fn from_score(score: u8) -> Self {
        let label = StrengthLabel::from_score(score);
        Self {
            score,
            label,
            color: label.color(),
            fill_fraction: label.fill_fraction(),
        }
    }

    pub fn width(&self) -> &'static str {
        self.label.width()
    }

    /// Text shown in the strength label, e.g. `Strength: Medium`.
    pub fn display_text(&self) -> String {
        format!("Strength: {}", self.label)
    }
}

/// Scores a password from 0 to [`MAX_SCORE`].
pub fn strength_score(password: &str) -> u8 {
    CRITERIA
        .iter()
        .filter(|(_, criterion)| criterion(password))
        .count() as u8
}

/// Evaluates password strength.
///
/// # Returns
/// `None` for an empty password (nothing is displayed), otherwise the
/// classification of [`strength_score`].
pub fn evaluate_strength(password: &SecretString) -> Option<StrengthResult> {
    let pwd = password.expose_secret();
    if pwd.is_empty() {
        return None;
    }

    let score = strength_score(pwd);

    #[cfg(feature = "tracing")]
    {
        let met: Vec<&str> = CRITERIA
            .iter()
            .filter(|(_, criterion)| criterion(pwd))
            .map(|(name, _)| *name)
            .collect();
        tracing::trace!("password strength score {} ({:?})", score, met);
    }

    Some(StrengthResult::from_score(score))
}
