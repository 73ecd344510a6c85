//! Puntos Forms WASM
//!
//! WebAssembly bindings for the form rule table, so page scripts validate
//! with the same rules and messages as the engine and the server.

use puntos_validation::{self as core, FieldMarkup, ValidationRule};
use wasm_bindgen::prelude::*;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Rules for a field described by its markers
///
/// # Example (JavaScript)
/// ```javascript
/// const rules = deriveRules({ required: true, type: 'email', maxLength: 80 });
/// ```
#[wasm_bindgen(js_name = deriveRules)]
pub fn derive_rules(markup: JsValue) -> Result<JsValue, JsValue> {
    let markup: FieldMarkup = serde_wasm_bindgen::from_value(markup)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse field markup: {}", e)))?;

    Ok(serde_wasm_bindgen::to_value(&markup.rules())?)
}

/// Validate a value against a list of rules
///
/// Returns the first failing message, or `undefined` when the value passes.
/// The value is trimmed first.
///
/// # Example (JavaScript)
/// ```javascript
/// const message = validateValue(input.value, deriveRules({ required: true }));
/// ```
#[wasm_bindgen(js_name = validateValue)]
pub fn validate_value(value: &str, rules: JsValue) -> Result<Option<String>, JsValue> {
    let rules: Vec<ValidationRule> = serde_wasm_bindgen::from_value(rules).map_err(|e| {
        let msg = format!("Failed to parse rules: {}", e);
        web_sys::console::warn_1(&JsValue::from_str(&msg));
        JsValue::from_str(&msg)
    })?;

    Ok(first_failure_message(&rules, value))
}

fn first_failure_message(rules: &[ValidationRule], value: &str) -> Option<String> {
    let outcome = core::first_failure(rules, value.trim());
    if outcome.is_valid() {
        None
    } else {
        Some(outcome.message().to_string())
    }
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    core::is_valid_email(email)
}

/// Quick phone validation
#[wasm_bindgen(js_name = isValidPhone)]
pub fn is_valid_phone_js(phone: &str) -> bool {
    core::is_valid_phone(phone)
}
