// File: src/engine.rs
// Purpose: Engine handle owning the document and the form registry

use crate::config::EngineConfig;
use crate::dom::Document;
use crate::notify::{Notifier, TracingNotifier};
use crate::registry::FormRegistry;
use crate::render;
use crate::state::{FieldState, FormState};
use crate::submit::SubmitOutcome;
use crate::transport::{HttpTransport, Transport};
use crate::validator;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// Document plus the registry scanned from it
#[derive(Debug, Clone)]
pub struct EngineState {
    pub document: Document,
    pub registry: FormRegistry,
}

/// Browser events the engine reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Form submitted. The native submission never happens.
    Submit { form_id: String },

    /// Field lost focus
    Blur { form_id: String, field: String },

    /// Field value edited
    Input { form_id: String, field: String },
}

/// Cloneable handle shared by the event layer and the renderer
#[derive(Clone)]
pub struct FormEngine {
    pub(crate) shared: Arc<Mutex<EngineState>>,
    pub(crate) config: Arc<EngineConfig>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) notifier: Arc<dyn Notifier>,
}

pub(crate) fn lock_state(shared: &Mutex<EngineState>) -> MutexGuard<'_, EngineState> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FormEngine {
    /// Install the validation styles, scan `document` for tracked forms and
    /// take ownership of both.
    pub fn new(
        mut document: Document,
        config: EngineConfig,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        render::install_styles(&mut document);
        let registry = FormRegistry::scan(&mut document, &config.markup);
        info!("Form engine ready with {} tracked forms", registry.len());

        Self {
            shared: Arc::new(Mutex::new(EngineState { document, registry })),
            config: Arc::new(config),
            transport,
            notifier,
        }
    }

    /// Engine submitting over HTTP and logging notifications
    pub fn with_http(document: Document, config: EngineConfig) -> anyhow::Result<Self> {
        let transport = HttpTransport::new(&config.http)?;
        Ok(Self::new(
            document,
            config,
            Arc::new(transport),
            Arc::new(TracingNotifier),
        ))
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, EngineState> {
        lock_state(&self.shared)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Tracked form ids in document order
    pub fn form_ids(&self) -> Vec<String> {
        self.lock().registry.ids().map(str::to_string).collect()
    }

    pub fn form(&self, form_id: &str) -> Option<FormState> {
        self.lock().registry.get(form_id).cloned()
    }

    pub fn field(&self, form_id: &str, field_name: &str) -> Option<FieldState> {
        self.lock()
            .registry
            .get(form_id)
            .and_then(|form| form.field(field_name))
            .cloned()
    }

    pub fn is_submitting(&self, form_id: &str) -> bool {
        self.lock()
            .registry
            .get(form_id)
            .is_some_and(FormState::is_submitting)
    }

    pub fn with_document<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&self.lock().document)
    }

    pub fn with_document_mut<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut self.lock().document)
    }

    /// Overwrite a tracked field's current value. No event is raised.
    pub fn set_field_value(&self, form_id: &str, field_name: &str, value: &str) -> bool {
        let mut state = self.lock();
        let state = &mut *state;
        let Some(element) = state
            .registry
            .get(form_id)
            .and_then(|form| form.field(field_name))
            .map(|field| field.element)
        else {
            return false;
        };
        match state.document.element_mut(element) {
            Some(el) => {
                el.set_value(value);
                true
            }
            None => false,
        }
    }

    pub fn field_value(&self, form_id: &str, field_name: &str) -> Option<String> {
        let state = self.lock();
        let element = state.registry.get(form_id)?.field(field_name)?.element;
        state.document.element(element).map(|el| el.value().to_string())
    }

    pub fn validate_field(&self, form_id: &str, field_name: &str) -> bool {
        let mut state = self.lock();
        let state = &mut *state;
        validator::validate_field(
            &mut state.document,
            &mut state.registry,
            &self.config.classes,
            form_id,
            field_name,
        )
    }

    pub fn validate_form(&self, form_id: &str) -> bool {
        let mut state = self.lock();
        let state = &mut *state;
        validator::validate_form(
            &mut state.document,
            &mut state.registry,
            &self.config.classes,
            form_id,
        )
    }

    pub fn clear_field_error(&self, form_id: &str, field_name: &str) {
        let mut state = self.lock();
        let state = &mut *state;
        let Some(field) = state.registry.get(form_id).and_then(|form| form.field(field_name)) else {
            return;
        };
        render::clear_field_error(&mut state.document, &self.config.classes, field.element, &field.name);
    }

    /// Route an event. Only `Submit` yields an outcome.
    pub async fn dispatch(&self, event: FormEvent) -> Option<SubmitOutcome> {
        debug!("dispatch {:?}", event);
        match event {
            FormEvent::Submit { form_id } => Some(self.submit(&form_id).await),
            FormEvent::Blur { form_id, field } => {
                self.validate_field(&form_id, &field);
                None
            }
            FormEvent::Input { form_id, field } => {
                self.clear_field_error(&form_id, &field);
                None
            }
        }
    }
}
