//! Document model
//!
//! A small element tree standing in for the browser DOM. Nodes live in an
//! arena owned by [`Document`]; everything else refers to them through
//! [`NodeId`] handles, which never keep a node alive on their own. Removing a
//! node frees its slot and its subtree's slots for reuse; handles to freed
//! nodes stop resolving instead of aliasing whatever takes the slot next.

use std::fmt::Write as _;
use tracing::debug;

const VOID_ELEMENTS: &[&str] = &["area", "br", "hr", "img", "input", "link", "meta"];

/// Handle to an element inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// A single element and its form-control state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    text: String,
    value: String,
    default_value: String,
    checked: bool,
    default_checked: bool,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            classes: Vec::new(),
            text: String::new(),
            value: String::new(),
            default_value: String::new(),
            checked: false,
            default_checked: false,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        (name == "class" && !self.classes.is_empty()) || self.attr(name).is_some()
    }

    /// Set an attribute. `class`, `value` and `checked` also update the
    /// class list and the control defaults, as the browser does for
    /// attributes parsed from markup.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "class" => {
                self.classes = value.split_whitespace().map(str::to_string).collect();
                return;
            }
            "value" => {
                self.default_value = value.to_string();
                self.value = value.to_string();
            }
            "checked" => {
                self.default_checked = true;
                self.checked = true;
            }
            _ => {}
        }

        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((name, value.to_string())),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id").filter(|id| !id.is_empty())
    }

    pub fn name(&self) -> Option<&str> {
        self.attr("name").filter(|name| !name.is_empty())
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set text content. For a textarea this is also its default value.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        if self.tag == "textarea" {
            self.default_value = text.to_string();
            self.value = text.to_string();
        }
    }

    /// Current value. A checkbox or radio without a `value` attribute
    /// reports `"on"`, as the browser does.
    pub fn value(&self) -> &str {
        if self.is_checkable() && self.attr("value").is_none() {
            "on"
        } else {
            &self.value
        }
    }

    /// Set the current value. For a checkbox or radio this writes the
    /// `value` attribute, since that is what their value reflects.
    pub fn set_value(&mut self, value: &str) {
        if self.is_checkable() {
            self.set_attr("value", value);
        } else {
            self.value = value.to_string();
        }
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// Restore the value and checkedness the control was created with
    pub fn reset(&mut self) {
        self.value = self.default_value.clone();
        self.checked = self.default_checked;
    }

    pub fn is_form_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select")
    }

    pub fn is_checkable(&self) -> bool {
        self.tag == "input" && matches!(self.input_type().as_str(), "checkbox" | "radio")
    }

    pub fn is_disabled(&self) -> bool {
        self.has_attr("disabled")
    }

    /// Control type as the browser reports it
    pub fn input_type(&self) -> String {
        match self.tag.as_str() {
            "input" => self
                .attr("type")
                .map(str::to_ascii_lowercase)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "text".to_string()),
            "select" if self.has_attr("multiple") => "select-multiple".to_string(),
            "select" => "select-one".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Element tree rooted at `<html>` with a `<head>` and a `<body>`
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let placeholder = NodeId { index: 0, generation: 0 };
        let mut document = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: placeholder,
            head: placeholder,
            body: placeholder,
        };
        document.root = document.create_element("html");
        document.head = document.create_element("head");
        document.body = document.create_element("body");
        document.append_child(document.root, document.head);
        document.append_child(document.root, document.body);
        document
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create a detached element, reusing a freed slot when there is one
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let node = Node {
            element: Element::new(tag),
            parent: None,
            children: Vec::new(),
        };

        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node(id).map(|node| &node.element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.node_mut(id).map(|node| &mut node.element)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    /// Whether `ancestor` is `id` or one of its ancestors
    fn is_inclusive_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Move `child` to the end of `parent`'s children. Ignored when either
    /// handle is stale or `child` contains `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        if self.is_inclusive_ancestor(child, parent) {
            debug!("append_child: refusing to move a node under its own subtree");
            return;
        }

        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    /// Detach `id` from the tree and free it along with its subtree.
    /// The root element is never removed.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root || self.node(id).is_none() {
            return;
        }
        self.detach(id);

        let mut doomed = self.descendants(id);
        doomed.push(id);
        for node in doomed {
            let slot = &mut self.slots[node.index];
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(node.index);
        }
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|c| *c != id);
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = None;
        }
    }

    /// Number of slots the arena has allocated, live or free
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Descendants of `id` in document order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    /// Every connected element matching `predicate`, in document order
    pub fn find_all(&self, predicate: impl Fn(&Element) -> bool) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|id| self.element(*id).is_some_and(&predicate))
            .collect()
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_all(|el| el.id() == Some(id)).into_iter().next()
    }

    /// Build `markup` and append it under `parent`
    pub fn insert(&mut self, parent: NodeId, markup: El) -> NodeId {
        let id = self.create_element(&markup.tag);
        if let Some(element) = self.element_mut(id) {
            for (name, value) in &markup.attributes {
                element.set_attr(name, value);
            }
            if let Some(text) = &markup.text {
                element.set_text(text);
            }
        }
        for child in markup.children {
            self.insert(id, child);
        }
        self.append_child(parent, id);
        id
    }

    /// Serialize `id` and its subtree
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(element) = self.element(id) else {
            return;
        };

        let _ = write!(out, "<{}", element.tag);
        if !element.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&element.classes.join(" ")));
        }
        for (name, value) in &element.attributes {
            if value.is_empty() {
                let _ = write!(out, " {}", name);
            } else {
                let _ = write!(out, " {}=\"{}\"", name, escape(value));
            }
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&element.tag.as_str()) {
            return;
        }

        out.push_str(&escape(&element.text));
        for child in self.children(id) {
            self.write_html(*child, out);
        }
        let _ = write!(out, "</{}>", element.tag);
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Declarative element description for building documents
#[derive(Debug, Clone, Default)]
pub struct El {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<El>,
}

impl El {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Boolean attribute such as `required`
    pub fn flag(self, name: &str) -> Self {
        self.attr(name, "")
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn child(mut self, child: El) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = El>) -> Self {
        self.children.extend(children);
        self
    }
}
