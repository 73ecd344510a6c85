// File: src/state.rs
// Purpose: Per-form and per-field validation records

use crate::dom::NodeId;
use puntos_validation::{Outcome, ValidationRule};

/// One tracked input, textarea or select
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub element: NodeId,
    pub name: String,
    pub field_type: String,
    pub rules: Vec<ValidationRule>,
    is_valid: bool,
    message: String,
}

impl FieldState {
    pub fn new(
        element: NodeId,
        name: impl Into<String>,
        field_type: impl Into<String>,
        rules: Vec<ValidationRule>,
    ) -> Self {
        Self {
            element,
            name: name.into(),
            field_type: field_type.into(),
            rules,
            is_valid: true,
            message: String::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Current error message, empty when valid
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Record the latest outcome for this field
    pub fn apply(&mut self, outcome: &Outcome) {
        self.is_valid = outcome.is_valid();
        self.message = outcome.message().to_string();
    }
}

/// One tracked form
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub element: NodeId,
    pub fields: Vec<FieldState>,
    pub is_valid: bool,
    pub(crate) is_submitting: bool,
}

impl FormState {
    pub fn new(element: NodeId, fields: Vec<FieldState>) -> Self {
        Self {
            element,
            fields,
            is_valid: false,
            is_submitting: false,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldState> {
        self.fields.iter_mut().find(|f| f.name == name)
    }
}
