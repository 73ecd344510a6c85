// File: src/render.rs
// Purpose: Field decorations and error-message nodes

use crate::config::ClassNames;
use crate::dom::{Document, El, NodeId};
use puntos_validation::Outcome;
use tracing::debug;

/// Attribute linking an error-message node to the field it describes
pub const ERROR_FOR_ATTRIBUTE: &str = "data-error-for";

const STYLE_MARKER: &str = "data-puntos-forms";

/// Stylesheet for the default class names
pub const VALIDATION_STYLES: &str = r#"
.field-error {
    border-color: var(--color-error) !important;
    box-shadow: 0 0 0 2px rgba(244, 67, 54, 0.2) !important;
}

.field-success {
    border-color: var(--color-success) !important;
    box-shadow: 0 0 0 2px rgba(76, 175, 80, 0.2) !important;
}

.error-message {
    color: var(--color-error);
    font-size: var(--font-size-sm);
    margin-top: var(--spacing-xs);
    display: block;
}

.form-loading {
    opacity: 0.6;
    pointer-events: none;
}
"#;

/// Append the validation stylesheet to `<head>` once
pub fn install_styles(document: &mut Document) {
    let head = document.head();
    let installed = document
        .children(head)
        .iter()
        .any(|id| document.element(*id).is_some_and(|el| el.has_attr(STYLE_MARKER)));
    if installed {
        return;
    }

    document.insert(head, El::new("style").flag(STYLE_MARKER).text(VALIDATION_STYLES));
}

/// Redraw `field` for `outcome`: drop old decorations and its error node,
/// then apply the success class or the error class plus a fresh message.
pub fn update_field_ui(
    document: &mut Document,
    classes: &ClassNames,
    field: NodeId,
    field_name: &str,
    outcome: &Outcome,
) {
    if let Some(element) = document.element_mut(field) {
        element.remove_class(&classes.field_error);
        element.remove_class(&classes.field_success);
    }
    remove_error_node(document, classes, field, field_name);

    match outcome {
        Outcome::Valid => {
            if let Some(element) = document.element_mut(field) {
                element.add_class(&classes.field_success);
            }
        }
        Outcome::Invalid { message } => {
            if let Some(element) = document.element_mut(field) {
                element.add_class(&classes.field_error);
            }
            let Some(parent) = document.parent(field) else {
                debug!("Field {:?} has no parent, error message not shown", field_name);
                return;
            };
            document.insert(
                parent,
                El::new("span")
                    .attr("class", &classes.error_message)
                    .attr(ERROR_FOR_ATTRIBUTE, field_name)
                    .text(message),
            );
        }
    }
}

/// Remove the error class and message of `field`, leaving other classes
pub fn clear_field_error(document: &mut Document, classes: &ClassNames, field: NodeId, field_name: &str) {
    if let Some(element) = document.element_mut(field) {
        element.remove_class(&classes.field_error);
    }
    remove_error_node(document, classes, field, field_name);
}

fn remove_error_node(document: &mut Document, classes: &ClassNames, field: NodeId, field_name: &str) {
    let Some(parent) = document.parent(field) else {
        return;
    };

    let stale: Vec<NodeId> = document
        .descendants(parent)
        .into_iter()
        .filter(|id| {
            document.element(*id).is_some_and(|el| {
                el.has_class(&classes.error_message) && el.attr(ERROR_FOR_ATTRIBUTE) == Some(field_name)
            })
        })
        .collect();

    for id in stale {
        document.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_fields() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let group = doc.insert(
            doc.body(),
            El::new("div")
                .child(El::new("input").attr("name", "nombre"))
                .child(El::new("input").attr("name", "email")),
        );
        let children = doc.children(group).to_vec();
        (doc, children[0], children[1])
    }

    fn invalid(message: &str) -> Outcome {
        Outcome::Invalid {
            message: message.to_string(),
        }
    }

    fn error_nodes(doc: &Document, classes: &ClassNames) -> Vec<String> {
        doc.find_all(|el| el.has_class(&classes.error_message))
            .into_iter()
            .map(|id| doc.element(id).unwrap().text().to_string())
            .collect()
    }

    #[test]
    fn test_invalid_outcome_adds_error_node() {
        let (mut doc, nombre, _) = two_fields();
        let classes = ClassNames::default();

        update_field_ui(&mut doc, &classes, nombre, "nombre", &invalid("Este campo es obligatorio"));

        let element = doc.element(nombre).unwrap();
        assert!(element.has_class("field-error"));
        assert!(!element.has_class("field-success"));
        assert_eq!(error_nodes(&doc, &classes), vec!["Este campo es obligatorio"]);
    }

    #[test]
    fn test_render_is_idempotent() {
        let (mut doc, nombre, _) = two_fields();
        let classes = ClassNames::default();

        update_field_ui(&mut doc, &classes, nombre, "nombre", &invalid("Mínimo 3 caracteres"));
        let once = doc.outer_html(doc.body());
        update_field_ui(&mut doc, &classes, nombre, "nombre", &invalid("Mínimo 3 caracteres"));
        assert_eq!(doc.outer_html(doc.body()), once);
    }

    #[test]
    fn test_valid_outcome_replaces_error() {
        let (mut doc, nombre, _) = two_fields();
        let classes = ClassNames::default();

        update_field_ui(&mut doc, &classes, nombre, "nombre", &invalid("Este campo es obligatorio"));
        update_field_ui(&mut doc, &classes, nombre, "nombre", &Outcome::Valid);

        let element = doc.element(nombre).unwrap();
        assert!(element.has_class("field-success"));
        assert!(!element.has_class("field-error"));
        assert!(error_nodes(&doc, &classes).is_empty());
    }

    #[test]
    fn test_sibling_errors_are_independent() {
        let (mut doc, nombre, email) = two_fields();
        let classes = ClassNames::default();

        update_field_ui(&mut doc, &classes, nombre, "nombre", &invalid("Este campo es obligatorio"));
        update_field_ui(&mut doc, &classes, email, "email", &invalid("Ingresa un email válido"));
        update_field_ui(&mut doc, &classes, email, "email", &Outcome::Valid);

        assert_eq!(error_nodes(&doc, &classes), vec!["Este campo es obligatorio"]);
    }

    #[test]
    fn test_clear_keeps_success_class() {
        let (mut doc, nombre, _) = two_fields();
        let classes = ClassNames::default();

        update_field_ui(&mut doc, &classes, nombre, "nombre", &invalid("Este campo es obligatorio"));
        doc.element_mut(nombre).unwrap().add_class("field-success");
        clear_field_error(&mut doc, &classes, nombre, "nombre");

        let element = doc.element(nombre).unwrap();
        assert!(!element.has_class("field-error"));
        assert!(element.has_class("field-success"));
        assert!(error_nodes(&doc, &classes).is_empty());
    }

    #[test]
    fn test_install_styles_once() {
        let mut doc = Document::new();
        install_styles(&mut doc);
        install_styles(&mut doc);

        let styles = doc.find_all(|el| el.tag() == "style");
        assert_eq!(styles.len(), 1);
        assert!(doc.element(styles[0]).unwrap().text().contains(".form-loading"));
    }
}
