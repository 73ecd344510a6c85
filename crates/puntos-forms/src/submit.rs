// File: src/submit.rs
// Purpose: Submit lifecycle, re-entrancy guard and form serialization

use crate::dom::{Document, NodeId};
use crate::engine::{lock_state, EngineState, FormEngine};
use crate::error::SubmitError;
use crate::notify::{Notification, Severity};
use crate::render;
use crate::validator;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, error, info};

/// Which way a submit attempt went
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// No tracked form has that id
    UnknownForm,

    /// At least one field failed; nothing was sent
    Invalid,

    /// A submission of this form is already in flight
    AlreadySubmitting,

    /// Server accepted the form; carries its JSON reply
    Submitted(Value),

    /// Request failed or was rejected; entered values are kept
    Failed(SubmitError),
}

/// Marks a form as submitting for as long as it is alive.
///
/// Dropping the guard clears the flag and the loading class, whichever way
/// the submission ends. The engine lock must not be held at that point.
pub struct SubmissionGuard {
    shared: Arc<Mutex<EngineState>>,
    form_id: String,
    loading_class: String,
}

impl SubmissionGuard {
    /// Take the form's single submission slot, or `None` if it is taken
    pub fn acquire(
        shared: &Arc<Mutex<EngineState>>,
        state: &mut EngineState,
        form_id: &str,
        loading_class: &str,
    ) -> Option<Self> {
        let form = state.registry.get_mut(form_id)?;
        if form.is_submitting {
            return None;
        }
        form.is_submitting = true;

        if let Some(element) = state.document.element_mut(form.element) {
            element.add_class(loading_class);
        }

        Some(Self {
            shared: Arc::clone(shared),
            form_id: form_id.to_string(),
            loading_class: loading_class.to_string(),
        })
    }
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        let mut state = lock_state(&self.shared);
        let state = &mut *state;
        if let Some(form) = state.registry.get_mut(&self.form_id) {
            form.is_submitting = false;
            if let Some(element) = state.document.element_mut(form.element) {
                element.remove_class(&self.loading_class);
            }
        }
    }
}

/// Name to value for every successful control of `form`, last value winning
/// for repeated names. Unnamed, disabled, button and file controls are
/// skipped, as are unchecked checkboxes and radios.
pub fn serialize_form(document: &Document, form: NodeId) -> Map<String, Value> {
    let mut data = Map::new();

    for id in document.descendants(form) {
        let Some(element) = document.element(id) else {
            continue;
        };
        if !element.is_form_control() || element.is_disabled() {
            continue;
        }
        let Some(name) = element.name() else {
            continue;
        };

        let value = match element.input_type().as_str() {
            "submit" | "button" | "reset" | "image" | "file" => continue,
            "checkbox" | "radio" if !element.checked() => continue,
            _ => element.value().to_string(),
        };

        data.insert(name.to_string(), Value::String(value));
    }

    data
}

/// Restore every control of `form` to its default value
pub fn reset_form(document: &mut Document, form: NodeId) {
    for id in document.descendants(form) {
        if let Some(element) = document.element_mut(id) {
            if element.is_form_control() {
                element.reset();
            }
        }
    }
}

impl FormEngine {
    /// Validate and, when every field passes, POST the form.
    ///
    /// Overlapping submissions of the same form are rejected without a
    /// request. Nothing is retried, and the request only times out when
    /// `http.request_timeout_secs` is set.
    pub async fn submit(&self, form_id: &str) -> SubmitOutcome {
        let (guard, action, body) = {
            let mut state = self.lock();
            let state = &mut *state;

            if !state.registry.contains(form_id) {
                debug!("submit: unknown form {:?}", form_id);
                return SubmitOutcome::UnknownForm;
            }

            if !validator::validate_form(
                &mut state.document,
                &mut state.registry,
                &self.config.classes,
                form_id,
            ) {
                debug!("Form {:?} has invalid fields, not submitting", form_id);
                return SubmitOutcome::Invalid;
            }

            let Some(form_element) = state.registry.get(form_id).map(|form| form.element) else {
                return SubmitOutcome::UnknownForm;
            };
            let action = state
                .document
                .element(form_element)
                .and_then(|el| el.attr("action"))
                .unwrap_or_default()
                .to_string();
            let body = Value::Object(serialize_form(&state.document, form_element));

            let Some(guard) = SubmissionGuard::acquire(
                &self.shared,
                state,
                form_id,
                &self.config.classes.form_loading,
            ) else {
                debug!("Form {:?} is already submitting", form_id);
                return SubmitOutcome::AlreadySubmitting;
            };

            (guard, action, body)
        };

        info!("Submitting form {:?} to {:?}", form_id, action);
        let result = self.transport.post_json(&action, &body).await;

        let duration = Duration::from_millis(self.config.messages.notification_duration_ms);
        let (outcome, notification) = {
            let mut state = self.lock();
            let state = &mut *state;

            match result {
                Ok(reply) => {
                    self.finish_success(state, form_id);
                    (
                        SubmitOutcome::Submitted(reply),
                        Notification::new(&self.config.messages.submit_success, Severity::Success, duration),
                    )
                }
                Err(err) => {
                    error!("Submitting form {:?} failed: {}", form_id, err);
                    (
                        SubmitOutcome::Failed(err),
                        Notification::new(&self.config.messages.submit_failure, Severity::Error, duration),
                    )
                }
            }
        };

        drop(guard);
        self.notifier.notify(notification);
        outcome
    }

    fn finish_success(&self, state: &mut EngineState, form_id: &str) {
        let Some(form) = state.registry.get(form_id) else {
            return;
        };

        reset_form(&mut state.document, form.element);
        for field in &form.fields {
            render::clear_field_error(&mut state.document, &self.config.classes, field.element, &field.name);
        }
    }
}
