//! Arena-backed document used off-browser.
//!
//! Holds just enough structure (tags, attributes, content, children) to
//! answer the [`DocumentTree`] queries. Markup is stored verbatim rather than
//! parsed.

use std::collections::{BTreeMap, HashSet};

use crate::error::TreeError;
use crate::tree::{Control, ControlBinder, DocumentTree};

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

/// Index of an element inside a [`MemoryDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Current content of an element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Markup(String),
}

#[derive(Clone, Debug)]
pub struct MemoryElement {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub content: Content,
    children: Vec<NodeId>,
}

impl MemoryElement {
    fn new(tag: &str) -> Self {
        Self { tag: tag.to_owned(), attrs: BTreeMap::new(), content: Content::Empty, children: Vec::new() }
    }
}

/// Minimal document: `<html>` root with a `<body>` child.
#[derive(Clone, Debug)]
pub struct MemoryDocument {
    nodes: Vec<MemoryElement>,
    root: NodeId,
    body: Option<NodeId>,
    rejected_attrs: HashSet<String>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![MemoryElement::new("html")],
            root: NodeId(0),
            body: None,
            rejected_attrs: HashSet::new(),
        };
        doc.body = Some(doc.append(doc.root, "body", &[]));
        doc
    }

    /// A document whose `<body>` has not been parsed yet.
    #[must_use]
    pub fn without_body() -> Self {
        Self {
            nodes: vec![MemoryElement::new("html")],
            root: NodeId(0),
            body: None,
            rejected_attrs: HashSet::new(),
        }
    }

    #[must_use]
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Body id, falling back to the root for body-less documents.
    #[must_use]
    pub fn body_id(&self) -> NodeId {
        self.body.unwrap_or(self.root)
    }

    /// Append a child element and return its id.
    pub fn append(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut element = MemoryElement::new(tag);
        for (name, value) in attrs {
            element.attrs.insert((*name).to_owned(), (*value).to_owned());
        }
        self.nodes.push(element);
        if let Some(parent) = self.nodes.get_mut(parent.0) {
            parent.children.push(id);
        }
        id
    }

    /// Append under `<body>`.
    pub fn append_to_body(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        self.append(self.body_id(), tag, attrs)
    }

    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<&MemoryElement> {
        self.nodes.get(node.0)
    }

    #[must_use]
    pub fn content(&self, node: NodeId) -> Content {
        self.element(node).map(|el| el.content.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attrs.get(name).map(String::as_str)
    }

    /// Make every later write of attribute `name` fail.
    pub fn reject_attribute(&mut self, name: &str) {
        self.rejected_attrs.insert(name.to_owned());
    }

    /// Elements reachable from the root, in document order. Subtrees
    /// replaced by `set_text`/`set_markup` stay in the arena but are not
    /// reachable.
    fn attached(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(el) = self.element(id) else {
                continue;
            };
            order.push(id);
            stack.extend(el.children.iter().rev().copied());
        }
        order
    }

    fn select(&self, pred: impl Fn(&MemoryElement) -> bool) -> Vec<NodeId> {
        self.attached().into_iter().filter(|id| self.element(*id).is_some_and(&pred)).collect()
    }

    fn element_mut(&mut self, node: NodeId) -> Result<&mut MemoryElement, TreeError> {
        self.nodes.get_mut(node.0).ok_or(TreeError::Missing("target"))
    }
}

impl DocumentTree for MemoryDocument {
    type Node = NodeId;

    fn root(&self) -> Result<NodeId, TreeError> {
        Ok(self.root)
    }

    fn body(&self) -> Option<NodeId> {
        self.body
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.attached().into_iter().find(|node| self.attr(*node, "id") == Some(id))
    }

    fn translatable_nodes(&self) -> Vec<NodeId> {
        self.select(|el| el.attrs.contains_key("data-en"))
    }

    fn placeholder_inputs(&self) -> Vec<NodeId> {
        self.select(|el| el.tag == "input" && el.attrs.contains_key("data-en-placeholder"))
    }

    fn anchors(&self) -> Vec<NodeId> {
        self.select(|el| el.tag == "a" && el.attrs.contains_key("href"))
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.attr(*node, name).map(str::to_owned)
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), TreeError> {
        if self.rejected_attrs.contains(name) {
            return Err(TreeError::Attribute { name: name.to_owned(), reason: "rejected".to_owned() });
        }
        self.element_mut(*node)?.attrs.insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn has_child_elements(&self, node: &NodeId) -> bool {
        self.element(*node).is_some_and(|el| {
            !el.children.is_empty() || matches!(&el.content, Content::Markup(m) if m.contains('<'))
        })
    }

    fn set_text(&mut self, node: &NodeId, text: &str) -> Result<(), TreeError> {
        let el = self.element_mut(*node)?;
        el.children.clear();
        el.content = Content::Text(text.to_owned());
        Ok(())
    }

    fn set_markup(&mut self, node: &NodeId, markup: &str) -> Result<(), TreeError> {
        let el = self.element_mut(*node)?;
        el.children.clear();
        el.content = Content::Markup(markup.to_owned());
        Ok(())
    }
}

/// Binder that records which controls were bound, for tests and for hosts
/// that dispatch clicks themselves.
#[derive(Clone, Debug, Default)]
pub struct RecordingBinder {
    pub bound: Vec<Control>,
}

impl<N> ControlBinder<N> for RecordingBinder {
    fn bind(&mut self, control: Control, _node: &N) -> Result<(), TreeError> {
        self.bound.push(control);
        Ok(())
    }
}
