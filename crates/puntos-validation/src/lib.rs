//! Puntos Validation
//!
//! Rule table shared by the form engine, the wasm bindings and the
//! reference server. Every rule is a variant of [`ValidationRule`] and is
//! evaluated by a single dispatcher, [`ValidationRule::evaluate`].

pub mod markup;
pub mod patterns;
pub mod rule;

pub use markup::FieldMarkup;
pub use patterns::{is_valid_email, is_valid_phone, Pattern};
pub use rule::{first_failure, Outcome, ValidationRule};
