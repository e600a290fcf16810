//! HTML serialization through html5ever
//!
//! The document is walked and fed to html5ever's serializer, so void
//! elements, raw-text elements and escaping follow the HTML rules.

use std::io;

use html5ever::serialize::{serialize, Serialize, SerializeOpts, Serializer, TraversalScope};
use html5ever::{namespace_url, ns, LocalName, QualName};

use crate::{Document, NodeData, NodeId};

/// One node of a document, ready for html5ever
struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

fn element_name(name: &str) -> QualName {
    QualName::new(None, ns!(html), LocalName::from(name))
}

fn attribute_name(name: &str) -> QualName {
    QualName::new(None, ns!(), LocalName::from(name))
}

impl NodeRef<'_> {
    fn write<S: Serializer>(&self, serializer: &mut S, id: NodeId) -> io::Result<()> {
        let node = match self.doc.node(id) {
            Some(node) => node,
            None => return Ok(()),
        };

        match &node.data {
            NodeData::Document => {
                for child in &node.children {
                    self.write(serializer, *child)?;
                }
            }
            NodeData::Doctype(name) => serializer.write_doctype(name)?,
            NodeData::Comment(text) => serializer.write_comment(text)?,
            NodeData::Text(text) => serializer.write_text(text)?,
            NodeData::Element(element) => {
                let attrs: Vec<(QualName, &str)> = element
                    .attrs
                    .iter()
                    .map(|(key, value)| (attribute_name(key), value.as_str()))
                    .collect();
                serializer.start_elem(
                    element_name(&element.name),
                    attrs.iter().map(|(key, value)| (key, *value)),
                )?;
                for child in &node.children {
                    self.write(serializer, *child)?;
                }
                serializer.end_elem(element_name(&element.name))?;
            }
        }
        Ok(())
    }
}

impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(
        &self,
        serializer: &mut S,
        traversal_scope: TraversalScope,
    ) -> io::Result<()> {
        match traversal_scope {
            TraversalScope::IncludeNode => self.write(serializer, self.id),
            TraversalScope::ChildrenOnly(_) => {
                for child in self.doc.children(self.id) {
                    self.write(serializer, *child)?;
                }
                Ok(())
            }
        }
    }
}

impl Document {
    /// Serialize the whole document
    pub fn to_html(&self) -> String {
        self.serialize_node(self.root(), TraversalScope::ChildrenOnly(None))
    }

    /// Serialize one node and its subtree
    pub fn outer_html(&self, id: NodeId) -> String {
        self.serialize_node(id, TraversalScope::IncludeNode)
    }

    fn serialize_node(&self, id: NodeId, traversal_scope: TraversalScope) -> String {
        let mut buf = Vec::new();
        let opts = SerializeOpts {
            traversal_scope,
            ..Default::default()
        };
        if let Err(e) = serialize(&mut buf, &NodeRef { doc: self, id }, opts) {
            log::error!(target: "bakeweb::dom", "failed to serialize {}: {}", id, e);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

// ==================== Tests ====================
