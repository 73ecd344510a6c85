// File: src/rules.rs
// Purpose: Derive a field's validation rules from its markup

use crate::config::MarkupConfig;
use crate::dom::Element;
use puntos_validation::{FieldMarkup, ValidationRule};
use tracing::debug;

/// Read the rule markers off `element`
pub fn field_markup(element: &Element, markup: &MarkupConfig) -> FieldMarkup {
    FieldMarkup {
        required: element.has_attr("required"),
        input_type: Some(element.input_type()),
        min_length: length_bound(element, &markup.min_length_attribute),
        max_length: length_bound(element, &markup.max_length_attribute),
    }
}

/// Rules for `element`, in evaluation order: required, type-specific
/// pattern, minimum length, maximum length.
pub fn derive_rules(element: &Element, markup: &MarkupConfig) -> Vec<ValidationRule> {
    field_markup(element, markup).rules()
}

fn length_bound(element: &Element, attribute: &str) -> Option<usize> {
    let raw = element.attr(attribute)?;
    match raw.trim().parse::<usize>() {
        Ok(n) => Some(n),
        Err(_) => {
            debug!(
                "Ignoring {}=\"{}\" on field {:?}: not a length",
                attribute,
                raw,
                element.name()
            );
            None
        }
    }
}
