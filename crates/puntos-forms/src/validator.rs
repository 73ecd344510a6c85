// File: src/validator.rs
// Purpose: Field and form validation against the registry

use crate::config::ClassNames;
use crate::dom::Document;
use crate::registry::FormRegistry;
use crate::render;
use puntos_validation::first_failure;
use tracing::debug;

/// Validate one field, record the outcome and redraw it.
///
/// An unknown form is invalid; an unknown field of a known form is valid.
pub fn validate_field(
    document: &mut Document,
    registry: &mut FormRegistry,
    classes: &ClassNames,
    form_id: &str,
    field_name: &str,
) -> bool {
    let Some(form) = registry.get_mut(form_id) else {
        debug!("validate_field: unknown form {:?}", form_id);
        return false;
    };
    let Some(field) = form.field_mut(field_name) else {
        debug!("validate_field: form {:?} has no field {:?}", form_id, field_name);
        return true;
    };

    let value = document
        .element(field.element)
        .map(|el| el.value().trim().to_string())
        .unwrap_or_default();

    let outcome = first_failure(&field.rules, &value);
    field.apply(&outcome);
    render::update_field_ui(document, classes, field.element, &field.name, &outcome);

    outcome.is_valid()
}

/// Validate every field of a form in DOM order.
///
/// All fields are visited so each failing one is decorated, not only the
/// first.
pub fn validate_form(
    document: &mut Document,
    registry: &mut FormRegistry,
    classes: &ClassNames,
    form_id: &str,
) -> bool {
    let Some(form) = registry.get(form_id) else {
        return false;
    };
    let names: Vec<String> = form.fields.iter().map(|f| f.name.clone()).collect();

    let mut all_valid = true;
    for name in &names {
        if !validate_field(document, registry, classes, form_id, name) {
            all_valid = false;
        }
    }

    if let Some(form) = registry.get_mut(form_id) {
        form.is_valid = all_valid;
    }
    all_valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarkupConfig;
    use crate::dom::El;
    use pretty_assertions::assert_eq;

    fn setup() -> (Document, FormRegistry) {
        let mut doc = Document::new();
        doc.insert(
            doc.body(),
            El::new("form")
                .attr("id", "contacto")
                .flag("data-validate")
                .child(El::new("div").child(
                    El::new("input").attr("name", "email").attr("type", "email").flag("required"),
                ))
                .child(El::new("div").child(
                    El::new("input").attr("name", "nombre").flag("required").attr("data-min-length", "3"),
                ))
                .child(El::new("div").child(El::new("input").attr("name", "barrio"))),
        );
        let registry = FormRegistry::scan(&mut doc, &MarkupConfig::default());
        (doc, registry)
    }

    fn type_into(doc: &mut Document, name: &str, value: &str) {
        let id = doc.find_all(|el| el.name() == Some(name))[0];
        doc.element_mut(id).unwrap().set_value(value);
    }

    #[test]
    fn test_required_checked_before_pattern() {
        let (mut doc, mut registry) = setup();
        let classes = ClassNames::default();

        assert!(!validate_field(&mut doc, &mut registry, &classes, "contacto", "email"));
        let field = registry.get("contacto").unwrap().field("email").unwrap();
        assert_eq!(field.message(), "Este campo es obligatorio");
    }

    #[test]
    fn test_value_is_trimmed() {
        let (mut doc, mut registry) = setup();
        let classes = ClassNames::default();
        type_into(&mut doc, "nombre", "   ab   ");

        assert!(!validate_field(&mut doc, &mut registry, &classes, "contacto", "nombre"));
        assert_eq!(
            registry.get("contacto").unwrap().field("nombre").unwrap().message(),
            "Mínimo 3 caracteres"
        );
    }

    #[test]
    fn test_unknown_identifiers() {
        let (mut doc, mut registry) = setup();
        let classes = ClassNames::default();

        assert!(!validate_field(&mut doc, &mut registry, &classes, "nada", "email"));
        assert!(validate_field(&mut doc, &mut registry, &classes, "contacto", "nada"));
        assert!(!validate_form(&mut doc, &mut registry, &classes, "nada"));
    }

    #[test]
    fn test_form_decorates_every_failing_field() {
        let (mut doc, mut registry) = setup();
        let classes = ClassNames::default();

        assert!(!validate_form(&mut doc, &mut registry, &classes, "contacto"));

        let messages: Vec<String> = doc
            .find_all(|el| el.has_class("error-message"))
            .into_iter()
            .map(|id| doc.element(id).unwrap().text().to_string())
            .collect();
        assert_eq!(
            messages,
            vec!["Este campo es obligatorio", "Este campo es obligatorio"]
        );

        let barrio = doc.find_all(|el| el.name() == Some("barrio"))[0];
        assert!(doc.element(barrio).unwrap().has_class("field-success"));
        assert!(!registry.get("contacto").unwrap().is_valid);
    }

    #[test]
    fn test_repeated_failures_do_not_grow_document() {
        let (mut doc, mut registry) = setup();
        let classes = ClassNames::default();

        validate_field(&mut doc, &mut registry, &classes, "contacto", "email");
        let slots = doc.slot_count();

        for _ in 0..1000 {
            assert!(!validate_field(&mut doc, &mut registry, &classes, "contacto", "email"));
        }
        assert_eq!(doc.slot_count(), slots);
        assert_eq!(doc.find_all(|el| el.has_class("error-message")).len(), 1);
    }

    #[test]
    fn test_checked_box_satisfies_required() {
        let mut doc = Document::new();
        doc.insert(
            doc.body(),
            El::new("form").attr("id", "alta").flag("data-validate").child(
                El::new("label").child(
                    El::new("input")
                        .attr("type", "checkbox")
                        .attr("name", "acepto")
                        .flag("required")
                        .flag("checked"),
                ),
            ),
        );
        let mut registry = FormRegistry::scan(&mut doc, &MarkupConfig::default());
        let classes = ClassNames::default();

        assert!(validate_field(&mut doc, &mut registry, &classes, "alta", "acepto"));
        assert!(registry.get("alta").unwrap().field("acepto").unwrap().is_valid());
    }

    #[test]
    fn test_form_valid_when_all_fields_pass() {
        let (mut doc, mut registry) = setup();
        let classes = ClassNames::default();
        type_into(&mut doc, "email", "a@b.co");
        type_into(&mut doc, "nombre", "Lucía");

        assert!(validate_form(&mut doc, &mut registry, &classes, "contacto"));
        let form = registry.get("contacto").unwrap();
        assert!(form.is_valid);
        assert!(form.fields.iter().all(|f| f.is_valid() && f.message().is_empty()));
    }
}
