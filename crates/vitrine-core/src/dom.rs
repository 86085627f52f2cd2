//! In-memory document model
//!
//! Every page controller works against this tree instead of a browser DOM:
//! elements carry classes, attributes, inline styles, text and a vertical
//! layout box, and the document owns the viewport scroll geometry.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Attribute on the document root that drives theme-dependent presentation
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Handle to an element in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single node of the page
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
    pub text: String,
    /// Current value of form controls
    pub value: String,
    pub disabled: bool,
    /// Offset of the box from the top of the page, in pixels
    pub top: f64,
    pub height: f64,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    removed: bool,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// The page: element arena plus viewport geometry
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    body: ElementId,
    scroll_top: f64,
    client_height: f64,
}

impl Document {
    /// Create an empty document with a `body` root and the given viewport height
    pub fn new(client_height: f64) -> Self {
        Self {
            elements: vec![Element::new("body")],
            body: ElementId(0),
            scroll_top: 0.0,
            client_height: client_height.max(0.0),
        }
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.elements.push(Element::new(tag));
        ElementId(self.elements.len() - 1)
    }

    /// Attach `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if let Some(old) = self.elements[child.0].parent {
            self.elements[old.0].children.retain(|c| *c != child);
        }
        self.elements[child.0].parent = Some(parent);
        self.elements[parent.0].children.push(child);
    }

    /// Detach an element (and with it its subtree) from the page
    pub fn remove(&mut self, id: ElementId) {
        if let Some(parent) = self.elements.get(id.0).and_then(|e| e.parent) {
            self.elements[parent.0].children.retain(|c| *c != id);
        }
        if let Some(element) = self.elements.get_mut(id.0) {
            element.parent = None;
            element.removed = true;
        }
    }

    /// Whether the element is still attached to the page
    pub fn is_connected(&self, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.body {
                return true;
            }
            match self.elements.get(node.0) {
                Some(element) if !element.removed => current = element.parent,
                _ => return false,
            }
        }
        false
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    /// Find the first connected element with the given `id` attribute
    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.walk(self.body)
            .into_iter()
            .find(|e| self.elements[e.0].id.as_deref() == Some(id))
    }

    /// All connected elements carrying `class`, in document order
    pub fn elements_by_class(&self, class: &str) -> Vec<ElementId> {
        self.descendants_by_class(self.body, class)
    }

    /// First connected element carrying `class`
    pub fn first_by_class(&self, class: &str) -> Option<ElementId> {
        self.elements_by_class(class).into_iter().next()
    }

    /// Descendants of `root` carrying `class`, in document order
    pub fn descendants_by_class(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        self.walk(root)
            .into_iter()
            .filter(|e| *e != root && self.elements[e.0].has_class(class))
            .collect()
    }

    /// Descendants of `root` with the given tag, in document order
    pub fn descendants_by_tag(&self, root: ElementId, tag: &str) -> Vec<ElementId> {
        self.walk(root)
            .into_iter()
            .filter(|e| *e != root && self.elements[e.0].tag == tag)
            .collect()
    }

    /// In-page anchors: `a` elements whose `href` starts with `#`
    pub fn anchors(&self) -> Vec<ElementId> {
        self.walk(self.body)
            .into_iter()
            .filter(|e| {
                let element = &self.elements[e.0];
                element.tag == "a" && element.attr("href").is_some_and(|h| h.starts_with('#'))
            })
            .collect()
    }

    /// Pre-order traversal of the subtree rooted at `root`
    fn walk(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let Some(element) = self.elements.get(node.0) else {
                continue;
            };
            if element.removed {
                continue;
            }
            out.push(node);
            stack.extend(element.children.iter().rev().copied());
        }
        out
    }

    pub fn set_id(&mut self, id: ElementId, value: &str) {
        if let Some(element) = self.get_mut(id) {
            element.id = Some(value.to_string());
        }
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.get_mut(id) {
            element.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.get_mut(id) {
            element.classes.remove(class);
        }
    }

    /// Add or remove `class` depending on `on`
    pub fn toggle_class(&mut self, id: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id).is_some_and(|e| e.has_class(class))
    }

    pub fn set_attr(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(element) = self.get_mut(id) {
            element.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id).and_then(|e| e.attr(name))
    }

    pub fn set_style(&mut self, id: ElementId, property: &str, value: &str) {
        if let Some(element) = self.get_mut(id) {
            element.style.insert(property.to_string(), value.to_string());
        }
    }

    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.get(id).and_then(|e| e.style(property))
    }

    pub fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(element) = self.get_mut(id) {
            element.text = text.to_string();
        }
    }

    pub fn text(&self, id: ElementId) -> &str {
        self.get(id).map(|e| e.text.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, id: ElementId, value: &str) {
        if let Some(element) = self.get_mut(id) {
            element.value = value.to_string();
        }
    }

    pub fn value(&self, id: ElementId) -> &str {
        self.get(id).map(|e| e.value.as_str()).unwrap_or("")
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        if let Some(element) = self.get_mut(id) {
            element.disabled = disabled;
        }
    }

    pub fn is_disabled(&self, id: ElementId) -> bool {
        self.get(id).is_some_and(|e| e.disabled)
    }

    pub fn set_box(&mut self, id: ElementId, top: f64, height: f64) {
        if let Some(element) = self.get_mut(id) {
            element.top = top;
            element.height = height.max(0.0);
        }
    }

    /// Theme attribute on the document root
    pub fn theme_attribute(&self) -> Option<&str> {
        self.attr(self.body, THEME_ATTRIBUTE)
    }

    pub fn set_theme_attribute(&mut self, value: &str) {
        let body = self.body;
        self.set_attr(body, THEME_ATTRIBUTE, value);
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Move the viewport, clamped to the scrollable range
    pub fn set_scroll_top(&mut self, offset: f64) {
        self.scroll_top = offset.clamp(0.0, self.max_scroll());
    }

    pub fn client_height(&self) -> f64 {
        self.client_height
    }

    pub fn set_client_height(&mut self, height: f64) {
        self.client_height = height.max(0.0);
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_scroll());
    }

    /// Full height of the page content (never less than the viewport)
    pub fn scroll_height(&self) -> f64 {
        self.walk(self.body)
            .into_iter()
            .map(|e| self.elements[e.0].bottom())
            .fold(self.client_height, f64::max)
    }

    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height() - self.client_height).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, ElementId, ElementId, ElementId) {
        let mut doc = Document::new(600.0);
        let body = doc.body();
        let grid = doc.create_element("div");
        doc.add_class(grid, "services-grid");
        doc.append_child(body, grid);
        let a = doc.create_element("div");
        doc.add_class(a, "service-card");
        doc.append_child(grid, a);
        let b = doc.create_element("div");
        doc.add_class(b, "service-card");
        doc.append_child(grid, b);
        doc.set_box(grid, 0.0, 2000.0);
        (doc, grid, a, b)
    }

    #[test]
    fn test_class_queries_follow_document_order() {
        let (doc, grid, a, b) = sample();
        assert_eq!(doc.elements_by_class("service-card"), vec![a, b]);
        assert_eq!(doc.descendants_by_class(grid, "service-card"), vec![a, b]);
        assert_eq!(doc.first_by_class("services-grid"), Some(grid));
    }

    #[test]
    fn test_removed_elements_disappear_from_queries() {
        let (mut doc, grid, a, b) = sample();
        doc.remove(a);
        assert_eq!(doc.elements_by_class("service-card"), vec![b]);
        assert!(!doc.is_connected(a));
        doc.remove(grid);
        assert!(doc.elements_by_class("service-card").is_empty());
        assert!(!doc.is_connected(b));
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let (mut doc, ..) = sample();
        assert_eq!(doc.scroll_height(), 2000.0);
        doc.set_scroll_top(5000.0);
        assert_eq!(doc.scroll_top(), 1400.0);
        doc.set_scroll_top(-10.0);
        assert_eq!(doc.scroll_top(), 0.0);
    }

    #[test]
    fn test_anchor_query() {
        let mut doc = Document::new(100.0);
        let body = doc.body();
        let inner = doc.create_element("a");
        doc.set_attr(inner, "href", "#contact");
        doc.append_child(body, inner);
        let outer = doc.create_element("a");
        doc.set_attr(outer, "href", "https://example.com");
        doc.append_child(body, outer);
        assert_eq!(doc.anchors(), vec![inner]);
    }
}
