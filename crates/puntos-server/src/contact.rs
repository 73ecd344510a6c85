// File: src/contact.rs
// Purpose: Contact form page and its JSON endpoint

use axum::{http::StatusCode, response::Html, Json};
use maud::{html, Markup, DOCTYPE};
use puntos_validation::{first_failure, FieldMarkup};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Where the contact form posts to
pub const CONTACT_ACTION: &str = "/api/contacto";

/// One field of the contact form
#[derive(Debug, Clone)]
pub struct ContactField {
    pub name: &'static str,
    pub label: &'static str,
    pub multiline: bool,
    pub markup: FieldMarkup,
}

impl ContactField {
    fn input_type(&self) -> &str {
        self.markup.input_type.as_deref().unwrap_or("text")
    }
}

/// Fields in page order
pub fn contact_fields() -> Vec<ContactField> {
    vec![
        ContactField {
            name: "nombre",
            label: "Nombre",
            multiline: false,
            markup: FieldMarkup {
                required: true,
                min_length: Some(3),
                ..FieldMarkup::default()
            },
        },
        ContactField {
            name: "email",
            label: "Email",
            multiline: false,
            markup: FieldMarkup {
                required: true,
                input_type: Some("email".to_string()),
                ..FieldMarkup::default()
            },
        },
        ContactField {
            name: "telefono",
            label: "Teléfono",
            multiline: false,
            markup: FieldMarkup {
                input_type: Some("tel".to_string()),
                ..FieldMarkup::default()
            },
        },
        ContactField {
            name: "mensaje",
            label: "Mensaje",
            multiline: true,
            markup: FieldMarkup {
                required: true,
                max_length: Some(500),
                ..FieldMarkup::default()
            },
        },
    ]
}

/// Render the contact page with a tracked form
pub fn contact_page() -> Markup {
    let fields = contact_fields();

    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Contacto - Puntos de Residuos" }
            }
            body {
                main class="container" {
                    h1 { "Contacto" }
                    p { "¿Dudas sobre la recolección en tu barrio? Escribinos." }
                    form id="contacto" action=(CONTACT_ACTION) method="post" data-validate {
                        @for field in &fields {
                            div class="form-group" {
                                label for=(field.name) { (field.label) }
                                @if field.multiline {
                                    textarea
                                        id=(field.name)
                                        name=(field.name)
                                        required[field.markup.required]
                                        data-min-length=[field.markup.min_length]
                                        data-max-length=[field.markup.max_length] {}
                                } @else {
                                    input
                                        id=(field.name)
                                        name=(field.name)
                                        type=(field.input_type())
                                        required[field.markup.required]
                                        data-min-length=[field.markup.min_length]
                                        data-max-length=[field.markup.max_length];
                                }
                            }
                        }
                        button type="submit" class="btn btn-primary" { "Enviar" }
                    }
                }
            }
        }
    }
}

/// First failing message per field, keyed by field name
pub fn validate_contact(body: &Value) -> BTreeMap<String, String> {
    contact_fields()
        .into_iter()
        .filter_map(|field| {
            let value = body.get(field.name).and_then(Value::as_str).unwrap_or("").trim();
            let outcome = first_failure(&field.markup.rules(), value);
            (!outcome.is_valid()).then(|| (field.name.to_string(), outcome.message().to_string()))
        })
        .collect()
}

pub async fn contact_page_handler() -> Html<String> {
    Html(contact_page().into_string())
}

pub async fn submit_contact_handler(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let errors = validate_contact(&body);

    if errors.is_empty() {
        info!("Contact form accepted");
        (StatusCode::OK, Json(json!({ "ok": true })))
    } else {
        warn!("Contact form rejected: {:?}", errors.keys().collect::<Vec<_>>());
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "ok": false, "errors": errors })),
        )
    }
}
