//! In-memory document model
//!
//! An arena-backed tree of elements and text that stands in for the
//! browser DOM: it can be parsed from HTML, queried, re-ordered with
//! `append_child`, clicked, and serialized back to HTML.

pub mod error;
pub mod event;
pub mod markup;
pub mod serialize;

use std::collections::HashMap;

pub use error::{DomError, DomResult};
pub use event::{ClickEvent, ClickListener, DispatchOutcome};

/// Handle to a node inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the document arena
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element name and attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub name: String,
    pub attrs: Vec<(String, String)>,
}

impl ElementData {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attrs: vec![],
        }
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Check the whitespace-separated `class` attribute
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

/// Node payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Document,
    Doctype(String),
    Element(ElementData),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

/// Arena of nodes rooted at a single document node
pub struct Document {
    nodes: Vec<Node>,
    pub(crate) listeners: HashMap<NodeId, Vec<ClickListener>>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("listeners", &self.listeners.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only its root node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: vec![],
                data: NodeData::Document,
            }],
            listeners: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: vec![],
            data,
        });
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeData::Element(ElementData::new(name)))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    pub(crate) fn create_node(&mut self, data: NodeData) -> NodeId {
        self.push(data)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_checked(&self, id: NodeId) -> DomResult<&Node> {
        self.nodes.get(id.0).ok_or(DomError::UnknownNode { id })
    }

    /// Element data, or None for non-element or unknown nodes
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.node(id).map(|n| &n.data) {
            Some(NodeData::Element(element)) => Some(element),
            _ => None,
        }
    }

    /// Check whether a node is an element with the given tag name
    pub fn is_element_named(&self, id: NodeId, name: &str) -> bool {
        self.element(id)
            .map(|e| e.name.eq_ignore_ascii_case(name))
            .unwrap_or(false)
    }

    /// Set (or replace) an attribute
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.node_checked(id)?;
        match &mut self.nodes[id.0].data {
            NodeData::Element(element) => {
                let name = name.to_ascii_lowercase();
                match element.attrs.iter_mut().find(|attr| attr.0 == name) {
                    Some(slot) => slot.1 = value.to_string(),
                    None => element.attrs.push((name, value.to_string())),
                }
                Ok(())
            }
            _ => Err(DomError::NotAnElement { id }),
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Child nodes that are elements, in document order
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.element(*child).is_some())
            .collect()
    }

    /// First direct child element with the given tag name
    pub fn first_child_by_tag(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|child| self.is_element_named(*child, name))
    }

    /// All descendants of `id` in document order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Descendant elements with the given tag name
    pub fn elements_by_tag(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.is_element_named(*id, name))
            .collect()
    }

    /// Descendant elements carrying the given class
    pub fn elements_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.element(*id).map(|e| e.has_class(class)).unwrap_or(false))
            .collect()
    }

    /// Concatenated text of the node and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        match self.node(id).map(|n| &n.data) {
            Some(NodeData::Text(text)) | Some(NodeData::Comment(text)) => text.clone(),
            Some(NodeData::Element(_)) | Some(NodeData::Document) => self
                .descendants(id)
                .into_iter()
                .filter_map(|d| match &self.nodes[d.0].data {
                    NodeData::Text(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
            _ => String::new(),
        }
    }

    /// Check whether `ancestor` is `id` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Append `child` as the last child of `parent`
    ///
    /// A child that is already attached somewhere is moved, so appending an
    /// existing child of `parent` sends it to the end.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.node_checked(parent)?;
        self.node_checked(child)?;
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Remove a node from its parent; the node and its subtree stay in the arena
    pub fn detach(&mut self, id: NodeId) {
        if let Some(old_parent) = self.nodes.get(id.0).and_then(|n| n.parent) {
            self.nodes[old_parent.0].children.retain(|c| *c != id);
            self.nodes[id.0].parent = None;
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with_items(doc: &mut Document, items: &[&str]) -> (NodeId, Vec<NodeId>) {
        let list = doc.create_element("ul");
        doc.append_child(doc.root(), list).unwrap();
        let mut ids = vec![];
        for item in items {
            let li = doc.create_element("li");
            let text = doc.create_text(item);
            doc.append_child(li, text).unwrap();
            doc.append_child(list, li).unwrap();
            ids.push(li);
        }
        (list, ids)
    }

    #[test]
    fn test_append_moves_existing_child() {
        let mut doc = Document::new();
        let (list, ids) = list_with_items(&mut doc, &["a", "b", "c"]);

        doc.append_child(list, ids[0]).unwrap();
        assert_eq!(doc.children(list), &[ids[1], ids[2], ids[0]]);
        assert_eq!(doc.parent(ids[0]), Some(list));
    }

    #[test]
    fn test_append_moves_between_parents() {
        let mut doc = Document::new();
        let (list, ids) = list_with_items(&mut doc, &["a", "b"]);
        let other = doc.create_element("ol");
        doc.append_child(doc.root(), other).unwrap();

        doc.append_child(other, ids[1]).unwrap();
        assert_eq!(doc.children(list), &[ids[0]]);
        assert_eq!(doc.children(other), &[ids[1]]);
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut doc = Document::new();
        let (list, ids) = list_with_items(&mut doc, &["a"]);

        let err = doc.append_child(ids[0], list).unwrap_err();
        assert_eq!(err, DomError::HierarchyRequest { parent: ids[0], child: list });
        assert!(doc.append_child(list, list).is_err());
    }

    #[test]
    fn test_append_unknown_node() {
        let mut doc = Document::new();
        let err = doc.append_child(doc.root(), NodeId(42)).unwrap_err();
        assert_eq!(err, DomError::UnknownNode { id: NodeId(42) });
    }

    #[test]
    fn test_text_content() {
        let mut doc = Document::new();
        let (list, _) = list_with_items(&mut doc, &["one", "two"]);
        assert_eq!(doc.text_content(list), "onetwo");
        assert_eq!(doc.text_content(NodeId(99)), "");
    }

    #[test]
    fn test_attributes_and_classes() {
        let mut doc = Document::new();
        let table = doc.create_element("TABLE");
        doc.set_attribute(table, "class", "data  sortable").unwrap();
        doc.set_attribute(table, "Data-Sort", "2").unwrap();
        doc.set_attribute(table, "data-sort", "3").unwrap();

        let element = doc.element(table).unwrap();
        assert_eq!(element.name, "table");
        assert!(element.has_class("sortable"));
        assert!(!element.has_class("sort"));
        assert_eq!(element.attr("data-sort"), Some("3"));
        assert_eq!(element.attrs.len(), 2);

        let text = doc.create_text("x");
        assert_eq!(
            doc.set_attribute(text, "id", "t"),
            Err(DomError::NotAnElement { id: text })
        );
    }

    #[test]
    fn test_queries() {
        let mut doc = Document::new();
        let (list, ids) = list_with_items(&mut doc, &["a", "b"]);
        doc.set_attribute(ids[1], "class", "active").unwrap();

        assert_eq!(doc.elements_by_tag(doc.root(), "li"), ids);
        assert_eq!(doc.elements_by_class(doc.root(), "active"), vec![ids[1]]);
        assert_eq!(doc.first_child_by_tag(list, "li"), Some(ids[0]));
        assert_eq!(doc.element_children(list), ids);
        assert_eq!(doc.descendants(list).len(), 4);
    }
}
