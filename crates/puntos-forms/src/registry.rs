// File: src/registry.rs
// Purpose: Discover tracked forms and hold their state

use crate::config::MarkupConfig;
use crate::dom::{Document, NodeId};
use crate::rules::derive_rules;
use crate::state::{FieldState, FormState};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Form identifier to form state, in discovery order
#[derive(Debug, Clone, Default)]
pub struct FormRegistry {
    forms: HashMap<String, FormState>,
    order: Vec<String>,
}

impl FormRegistry {
    /// Scan `document` once for tracked forms.
    ///
    /// Forms without an id get a generated `form-N` id, written back to the
    /// element. Forms inserted after the scan are never picked up.
    pub fn scan(document: &mut Document, markup: &MarkupConfig) -> Self {
        let mut registry = Self::default();
        let mut next_generated = 1usize;

        let forms = document.find_all(|el| el.tag() == "form" && el.has_attr(&markup.tracked_attribute));

        for form in forms {
            let existing = document
                .element(form)
                .and_then(|el| el.id())
                .map(str::to_string);

            let form_id = match existing {
                Some(id) if !registry.contains(&id) => id,
                Some(id) => {
                    warn!("Duplicate form id {:?}, assigning a generated one", id);
                    registry.generate_id(document, &mut next_generated)
                }
                None => registry.generate_id(document, &mut next_generated),
            };

            if let Some(element) = document.element_mut(form) {
                element.set_attr("id", &form_id);
            }

            let fields = collect_fields(document, form, markup);
            debug!("Tracking form {:?} with {} fields", form_id, fields.len());

            registry.order.push(form_id.clone());
            registry.forms.insert(form_id, FormState::new(form, fields));
        }

        registry
    }

    fn generate_id(&self, document: &Document, next: &mut usize) -> String {
        loop {
            let candidate = format!("form-{}", next);
            *next += 1;
            if !self.contains(&candidate) && document.get_element_by_id(&candidate).is_none() {
                return candidate;
            }
        }
    }

    pub fn get(&self, form_id: &str) -> Option<&FormState> {
        self.forms.get(form_id)
    }

    pub fn get_mut(&mut self, form_id: &str) -> Option<&mut FormState> {
        self.forms.get_mut(form_id)
    }

    pub fn contains(&self, form_id: &str) -> bool {
        self.forms.contains_key(form_id)
    }

    /// Form ids in document order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

/// Named controls of `form` in document order, first occurrence per name
fn collect_fields(document: &Document, form: NodeId, markup: &MarkupConfig) -> Vec<FieldState> {
    let mut fields: Vec<FieldState> = Vec::new();

    for id in document.descendants(form) {
        let Some(element) = document.element(id) else {
            continue;
        };
        if !element.is_form_control() {
            continue;
        }
        let Some(name) = element.name() else {
            continue;
        };
        if fields.iter().any(|f| f.name == name) {
            debug!("Field {:?} already tracked, skipping repeat", name);
            continue;
        }

        fields.push(FieldState::new(
            id,
            name,
            element.input_type(),
            derive_rules(element, markup),
        ));
    }

    fields
}
