//! Shared fixtures for the engine integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use puntos_forms::{Document, El, Notification, Notifier, SubmitError, Transport};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Transport that records requests and answers from a script
#[derive(Default)]
pub struct ScriptedTransport {
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, Value)>>,
    replies: Mutex<VecDeque<Result<Value, SubmitError>>>,
    /// Signalled when a request arrives
    pub entered: Notify,
    /// When set, each request waits for a permit before answering
    pub gate: Option<Notify>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn gated() -> Arc<Self> {
        Arc::new(Self {
            gate: Some(Notify::new()),
            ..Self::default()
        })
    }

    pub fn push_reply(&self, reply: Result<Value, SubmitError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(&self, action: &str, body: &Value) -> Result<Value, SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((action.to_string(), body.clone()));
        self.entered.notify_one();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let scripted = self.replies.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(json!({ "ok": true })))
    }
}

/// Notifier that keeps everything it is asked to show
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seen(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

/// Page with one tracked form holding a required email field
pub fn email_page() -> Document {
    let mut doc = Document::new();
    doc.insert(
        doc.body(),
        El::new("form")
            .attr("id", "contacto")
            .attr("action", "/api/contacto")
            .flag("data-validate")
            .child(
                El::new("div").attr("class", "form-group").child(
                    El::new("input")
                        .attr("name", "email")
                        .attr("type", "email")
                        .flag("required"),
                ),
            )
            .child(El::new("button").attr("type", "submit").text("Enviar")),
    );
    doc
}

/// Texts of every error-message node in the document
pub fn error_messages(doc: &Document) -> Vec<String> {
    doc.find_all(|el| el.has_class("error-message"))
        .into_iter()
        .filter_map(|id| doc.element(id).map(|el| el.text().to_string()))
        .collect()
}
