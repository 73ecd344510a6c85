// File: puntos-validation/src/rule.rs
// Purpose: Rule variants and the dispatcher that evaluates them

use crate::patterns::{Pattern, EMAIL_MESSAGE, PHONE_MESSAGE, REQUIRED_MESSAGE};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A single validation constraint derived from a field's markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ValidationRule {
    /// Value must contain at least one character
    Required,

    /// Value must match `regex`
    Pattern { regex: Pattern, message: String },

    /// Value must contain a run of at least `n` characters
    MinLength { n: usize },

    /// Value must be at most `n` characters long
    MaxLength { n: usize },
}

impl ValidationRule {
    pub fn email() -> Self {
        Self::Pattern {
            regex: Pattern::email(),
            message: EMAIL_MESSAGE.to_string(),
        }
    }

    pub fn phone() -> Self {
        Self::Pattern {
            regex: Pattern::phone(),
            message: PHONE_MESSAGE.to_string(),
        }
    }

    /// Evaluate this rule against an already trimmed value.
    ///
    /// Length rules build their pattern here. A bound too large for the
    /// regex engine yields no pattern, and the rule then passes.
    pub fn evaluate(&self, value: &str) -> Outcome {
        match self {
            Self::Required => Outcome::check(!value.is_empty(), REQUIRED_MESSAGE),
            Self::Pattern { regex, message } => Outcome::check(regex.is_match(value), message),
            Self::MinLength { n } => match Regex::new(&format!(".{{{},}}", n)) {
                Ok(re) => Outcome::check(re.is_match(value), format!("Mínimo {} caracteres", n)),
                Err(e) => {
                    warn!("minLength({}) has no usable pattern: {}", n, e);
                    Outcome::Valid
                }
            },
            Self::MaxLength { n } => match Regex::new(&format!("^.{{0,{}}}$", n)) {
                Ok(re) => Outcome::check(re.is_match(value), format!("Máximo {} caracteres", n)),
                Err(e) => {
                    warn!("maxLength({}) has no usable pattern: {}", n, e);
                    Outcome::Valid
                }
            },
        }
    }
}

/// Result of evaluating one or more rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Outcome {
    Valid,
    Invalid { message: String },
}

impl Outcome {
    fn check(passed: bool, message: impl Into<String>) -> Self {
        if passed {
            Self::Valid
        } else {
            Self::Invalid {
                message: message.into(),
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Error message, empty when valid
    pub fn message(&self) -> &str {
        match self {
            Self::Valid => "",
            Self::Invalid { message } => message,
        }
    }
}

/// Evaluate `rules` in order and stop at the first failure
pub fn first_failure(rules: &[ValidationRule], value: &str) -> Outcome {
    rules
        .iter()
        .map(|rule| rule.evaluate(value))
        .find(|outcome| !outcome.is_valid())
        .unwrap_or(Outcome::Valid)
}
