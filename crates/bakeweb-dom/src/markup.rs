//! HTML parsing into a [`Document`]

use std::collections::HashMap;

use scraper::Html;

use crate::{Document, ElementData, NodeData};

impl Document {
    /// Parse a full HTML page
    ///
    /// Parsing follows the HTML5 tree builder, so the usual implied elements
    /// appear: `html`/`head`/`body` wrappers, and a `tbody` around rows placed
    /// directly inside a `table`. A table with no rows gets no `tbody`.
    pub fn parse_html(markup: &str) -> Document {
        let html = Html::parse_document(markup);
        let mut doc = Document::new();
        let mut ids = HashMap::new();

        for node in html.tree.root().descendants() {
            let parent = match node.parent() {
                Some(parent) => match ids.get(&parent.id()) {
                    Some(id) => *id,
                    None => continue,
                },
                None => {
                    ids.insert(node.id(), doc.root());
                    continue;
                }
            };

            let data = match node.value() {
                scraper::Node::Element(element) => NodeData::Element(ElementData {
                    name: element.name().to_string(),
                    attrs: element
                        .attrs()
                        .map(|(key, value)| (key.to_string(), value.to_string()))
                        .collect(),
                }),
                scraper::Node::Text(text) => NodeData::Text(text.to_string()),
                scraper::Node::Comment(comment) => NodeData::Comment(comment.to_string()),
                scraper::Node::Doctype(doctype) => NodeData::Doctype(doctype.name().to_string()),
                // Template contents live in a fragment; hang them off the template itself
                scraper::Node::Fragment => {
                    ids.insert(node.id(), parent);
                    continue;
                }
                _ => continue,
            };

            let id = doc.create_node(data);
            // Freshly created and parent comes from the same pass, cannot cycle
            if doc.append_child(parent, id).is_ok() {
                ids.insert(node.id(), id);
            }
        }

        log::debug!(target: "bakeweb::dom", "parsed document with {} nodes", doc.len());
        doc
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use crate::{Document, NodeData};

    #[test]
    fn test_parse_builds_tree() {
        let doc = Document::parse_html(
            "<!DOCTYPE html><html><body><p class=\"lead\">Hello <b>world</b></p></body></html>",
        );

        let root_children = doc.children(doc.root());
        assert!(matches!(
            doc.node(root_children[0]).map(|n| &n.data),
            Some(NodeData::Doctype(name)) if name == "html"
        ));

        let paragraphs = doc.elements_by_tag(doc.root(), "p");
        assert_eq!(paragraphs.len(), 1);
        assert!(doc.element(paragraphs[0]).unwrap().has_class("lead"));
        assert_eq!(doc.text_content(paragraphs[0]), "Hello world");
    }

    #[test]
    fn test_parse_inserts_implied_tbody() {
        let doc = Document::parse_html(
            "<table><tr><th>名前</th></tr><tr><td>いちご</td></tr></table>",
        );
        let table = doc.elements_by_tag(doc.root(), "table")[0];
        let tbody = doc.first_child_by_tag(table, "tbody").unwrap();
        assert_eq!(doc.element_children(tbody).len(), 2);
    }

    #[test]
    fn test_parse_table_without_rows_has_no_tbody() {
        let doc = Document::parse_html("<table class=\"sortable\"><thead></thead></table>");
        let table = doc.elements_by_tag(doc.root(), "table")[0];
        assert!(doc.first_child_by_tag(table, "thead").is_some());
        assert!(doc.first_child_by_tag(table, "tbody").is_none());
    }

    #[test]
    fn test_parse_keeps_template_contents() {
        let doc = Document::parse_html("<template><p>クロワッサン</p></template>");
        let template = doc.elements_by_tag(doc.root(), "template")[0];
        let children = doc.element_children(template);
        assert_eq!(children.len(), 1);
        assert!(doc.is_element_named(children[0], "p"));
        assert_eq!(doc.text_content(template), "クロワッサン");
    }

    #[test]
    fn test_parse_keeps_attributes() {
        let doc = Document::parse_html("<table><thead><tr><th data-sort=\"2\">価格</th></tr></thead></table>");
        let th = doc.elements_by_tag(doc.root(), "th")[0];
        assert_eq!(doc.element(th).unwrap().attr("data-sort"), Some("2"));
    }
}
