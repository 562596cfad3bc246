//! In-memory host document.
//!
//! A small element tree standing in for the page the form lives in. Nodes are
//! stored in an arena and addressed by [`NodeId`]; nothing is ever freed, which
//! matches the lifetime of a page.

use std::collections::BTreeMap;
use thiserror::Error;

/// Handle to an element of a [`Document`].
///
/// Only valid for the document that created it. Passing it to another
/// document's methods reads the wrong node or panics on an out-of-range index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomError {
    #[error("node {0:?} is not attached to a parent")]
    Detached(NodeId),
    #[error("node {0:?} cannot be inserted into itself or its descendants")]
    Cycle(NodeId),
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    text: String,
    value: String,
    style: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            text: String::new(),
            value: String::new(),
            style: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Arena of elements rooted at a `body` node.
///
/// # Panics
///
/// Methods taking a [`NodeId`] panic if the id was not issued by this
/// document and is out of range.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document with a `body` root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("body")],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Creates a detached element. It becomes visible to id lookups once
    /// inserted under the root.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].id.as_deref()
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.nodes[node.0].id = Some(id.to_string());
    }

    /// Returns the first attached element, in tree order, carrying `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.nodes[n.0].id.as_deref() == Some(id))
    }

    /// Returns the first attached element, in tree order, with the given tag.
    pub fn first_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.nodes[n.0].tag == tag)
    }

    /// Returns the first descendant of `scope` (excluding `scope`) with `class`.
    pub fn find_by_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&n| self.has_class(n, class))
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|&n| n == node)?;
        siblings.get(pos + 1).copied()
    }

    /// True when the node is reachable from the root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == self.root {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Appends `child` as the last child of `parent`, moving it if needed.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_cycle(parent, child)?;
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Inserts `node` as the sibling immediately following `reference`.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> Result<(), DomError> {
        let parent = self.parent(reference).ok_or(DomError::Detached(reference))?;
        self.check_cycle(parent, node)?;
        self.detach(node);
        let siblings = &mut self.nodes[parent.0].children;
        let pos = siblings
            .iter()
            .position(|&n| n == reference)
            .ok_or(DomError::Detached(reference))?;
        siblings.insert(pos + 1, node);
        self.nodes[node.0].parent = Some(parent);
        Ok(())
    }

    pub fn text(&self, node: NodeId) -> &str {
        &self.nodes[node.0].text
    }

    /// Replaces the node's own text. Child elements are left in place.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.nodes[node.0].text = text.to_string();
    }

    pub fn value(&self, node: NodeId) -> &str {
        &self.nodes[node.0].value
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        self.nodes[node.0].value = value.to_string();
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.nodes[node.0].classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].classes.retain(|c| c != class);
    }

    /// Replaces the whole class list with the whitespace-separated `names`.
    pub fn set_class_name(&mut self, node: NodeId, names: &str) {
        self.nodes[node.0].classes = names.split_whitespace().map(str::to_string).collect();
    }

    pub fn class_name(&self, node: NodeId) -> String {
        self.nodes[node.0].classes.join(" ")
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes[node.0].style.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        self.nodes[node.0]
            .style
            .insert(property.to_string(), value.to_string());
    }

    /// Clears the value of every `input` and `textarea` inside `form`.
    pub fn reset_form(&mut self, form: NodeId) {
        for node in self.descendants(form) {
            if matches!(self.nodes[node.0].tag.as_str(), "input" | "textarea") {
                self.nodes[node.0].value.clear();
            }
        }
    }

    /// Descendants of `scope` in tree (pre-)order, `scope` excluded.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&n| n != node);
        }
    }

    fn check_cycle(&self, parent: NodeId, node: NodeId) -> Result<(), DomError> {
        let mut current = Some(parent);
        while let Some(n) = current {
            if n == node {
                return Err(DomError::Cycle(node));
            }
            current = self.parent(n);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element_with_id(doc: &mut Document, tag: &str, id: &str) -> NodeId {
        let node = doc.create_element(tag);
        doc.set_id(node, id);
        node
    }

    #[test]
    fn test_get_element_by_id_ignores_detached_nodes() {
        let mut doc = Document::new();
        let node = element_with_id(&mut doc, "div", "lonely");
        assert_eq!(doc.get_element_by_id("lonely"), None);

        doc.append_child(doc.root(), node).unwrap();
        assert_eq!(doc.get_element_by_id("lonely"), Some(node));
    }

    #[test]
    fn test_tag_id_and_attachment() {
        let mut doc = Document::new();
        assert_eq!(doc.tag(doc.root()), "body");
        assert!(doc.is_attached(doc.root()));

        let outer = element_with_id(&mut doc, "form", "signup");
        let inner = doc.create_element("input");
        doc.append_child(outer, inner).unwrap();
        assert_eq!(doc.tag(inner), "input");
        assert_eq!(doc.id(outer), Some("signup"));
        assert_eq!(doc.id(inner), None);
        assert!(!doc.is_attached(inner));

        doc.append_child(doc.root(), outer).unwrap();
        assert!(doc.is_attached(inner));
    }

    #[test]
    #[should_panic]
    fn test_foreign_node_id_panics() {
        let mut big = Document::new();
        let foreign = (0..3).map(|_| big.create_element("div")).last().unwrap();
        let small = Document::new();
        let _ = small.text(foreign);
    }

    #[test]
    fn test_insert_after_places_node_next_to_reference() {
        let mut doc = Document::new();
        let first = doc.create_element("div");
        let last = doc.create_element("div");
        let middle = doc.create_element("div");
        doc.append_child(doc.root(), first).unwrap();
        doc.append_child(doc.root(), last).unwrap();

        doc.insert_after(first, middle).unwrap();

        assert_eq!(doc.children(doc.root()), &[first, middle, last]);
        assert_eq!(doc.next_sibling(first), Some(middle));
        assert_eq!(doc.next_sibling(last), None);
    }

    #[test]
    fn test_insert_after_detached_reference_fails() {
        let mut doc = Document::new();
        let reference = doc.create_element("div");
        let node = doc.create_element("div");
        assert_eq!(
            doc.insert_after(reference, node),
            Err(DomError::Detached(reference))
        );
    }

    #[test]
    fn test_append_child_rejects_cycles() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(outer, inner).unwrap();
        assert_eq!(doc.append_child(inner, outer), Err(DomError::Cycle(outer)));
    }

    #[test]
    fn test_append_child_moves_existing_node() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        let child = doc.create_element("span");
        doc.append_child(a, child).unwrap();
        doc.append_child(b, child).unwrap();
        assert!(doc.children(a).is_empty());
        assert_eq!(doc.parent(child), Some(b));
    }

    #[test]
    fn test_class_list_operations() {
        let mut doc = Document::new();
        let node = doc.create_element("input");
        doc.add_class(node, "invalid");
        doc.add_class(node, "invalid");
        assert_eq!(doc.class_name(node), "invalid");

        doc.set_class_name(node, "strength-text  active");
        assert!(doc.has_class(node, "active"));
        doc.remove_class(node, "active");
        assert_eq!(doc.class_name(node), "strength-text");
    }

    #[test]
    fn test_reset_form_clears_only_inputs_inside_form() {
        let mut doc = Document::new();
        let form = doc.create_element("form");
        let inside = doc.create_element("input");
        let outside = doc.create_element("input");
        let label = doc.create_element("div");
        doc.append_child(doc.root(), form).unwrap();
        doc.append_child(form, inside).unwrap();
        doc.append_child(form, label).unwrap();
        doc.append_child(doc.root(), outside).unwrap();
        doc.set_value(inside, "typed");
        doc.set_value(outside, "kept");
        doc.set_text(label, "label");

        doc.reset_form(form);

        assert_eq!(doc.value(inside), "");
        assert_eq!(doc.value(outside), "kept");
        assert_eq!(doc.text(label), "label");
    }

    #[test]
    fn test_find_by_class_searches_nested_nodes() {
        let mut doc = Document::new();
        let meter = doc.create_element("div");
        let bar = doc.create_element("div");
        doc.set_class_name(bar, "strength-bar");
        doc.append_child(meter, bar).unwrap();
        assert_eq!(doc.find_by_class(meter, "strength-bar"), Some(bar));
        assert_eq!(doc.find_by_class(bar, "strength-bar"), None);
    }
}
