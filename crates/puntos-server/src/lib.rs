// Puntos Server - reference backend for the tracked contact form
// Serves the page and accepts the JSON the form engine posts

pub mod contact;
pub mod settings;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use contact::{contact_fields, contact_page, validate_contact, ContactField, CONTACT_ACTION};
pub use settings::ServerSettings;

/// Application routes
pub fn app() -> Router {
    Router::new()
        .route("/", get(contact::contact_page_handler))
        .route(CONTACT_ACTION, post(contact::submit_contact_handler))
        .layer(TraceLayer::new_for_http())
}
