// Puntos Forms - validation and submission engine
// Scans tracked forms, validates on blur and submit, and POSTs them as JSON

pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod notify;
pub mod registry;
pub mod render;
pub mod rules;
pub mod state;
pub mod submit;
pub mod transport;
pub mod validator;

// Re-export the engine surface
pub use config::{ClassNames, EngineConfig, HttpConfig, MarkupConfig, MessageConfig};
pub use dom::{Document, El, Element, NodeId};
pub use engine::{EngineState, FormEngine, FormEvent};
pub use error::SubmitError;
pub use notify::{Notification, Notifier, Severity, TracingNotifier};
pub use registry::FormRegistry;
pub use state::{FieldState, FormState};
pub use submit::{SubmissionGuard, SubmitOutcome};
pub use transport::{HttpTransport, Transport};

// Rule table
pub use puntos_validation::{Outcome, ValidationRule};
