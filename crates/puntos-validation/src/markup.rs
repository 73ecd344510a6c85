//! Field markup → rules

use crate::rule::ValidationRule;
use serde::{Deserialize, Serialize};

/// The markers a field carries that turn into rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMarkup {
    #[serde(default)]
    pub required: bool,

    /// Declared control type (`email`, `tel`, ...)
    #[serde(default, rename = "type")]
    pub input_type: Option<String>,

    #[serde(default)]
    pub min_length: Option<usize>,

    #[serde(default)]
    pub max_length: Option<usize>,
}

impl FieldMarkup {
    /// Rules in evaluation order: required, type pattern, min, max
    pub fn rules(&self) -> Vec<ValidationRule> {
        let mut rules = Vec::new();

        if self.required {
            rules.push(ValidationRule::Required);
        }

        match self.input_type.as_deref() {
            Some("email") => rules.push(ValidationRule::email()),
            Some("tel") => rules.push(ValidationRule::phone()),
            _ => {}
        }

        if let Some(n) = self.min_length {
            rules.push(ValidationRule::MinLength { n });
        }
        if let Some(n) = self.max_length {
            rules.push(ValidationRule::MaxLength { n });
        }

        rules
    }
}
