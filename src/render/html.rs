//! HTML writer for output elements
//!
//!     Serializes an output element tree to an HTML string. Text is escaped for element content
//!     and attribute values are escaped for double-quoted attributes. Element keys are a
//!     reconciliation aid for view frameworks and are not written.
//!
//!     Top-level nodes are separated by newlines; everything below them is written compactly so
//!     inline whitespace is preserved exactly.

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::element::{Attributes, OutputElement, OutputNode};

/// Elements written without children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link", "wbr"];

/// Serialize a node sequence as an HTML fragment.
pub fn to_html(nodes: &[OutputNode]) -> String {
    let mut out = String::new();
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_node(&mut out, node);
    }
    out
}

/// Serialize a node sequence wrapped in a `div` carrying `attributes`.
///
/// An empty attribute map produces the bare fragment.
pub fn to_html_document(nodes: &[OutputNode], attributes: &Attributes) -> String {
    if attributes.is_empty() {
        return to_html(nodes);
    }

    let mut out = String::from("<div");
    write_attributes(&mut out, attributes);
    out.push_str(">\n");
    out.push_str(&to_html(nodes));
    out.push_str("\n</div>");
    out
}

/// Serialize a single element.
pub fn element_to_html(element: &OutputElement) -> String {
    let mut out = String::new();
    write_element(&mut out, element);
    out
}

fn write_node(out: &mut String, node: &OutputNode) {
    match node {
        OutputNode::Text(text) => out.push_str(&encode_text(text)),
        OutputNode::Element(element) => write_element(out, element),
    }
}

fn write_element(out: &mut String, element: &OutputElement) {
    out.push('<');
    out.push_str(&element.tag);
    write_attributes(out, &element.attributes);

    if VOID_ELEMENTS.contains(&element.tag.as_str()) {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in &element.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn write_attributes(out: &mut String, attributes: &Attributes) {
    for (name, value) in attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(value));
        out.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::element::attributes;

    #[test]
    fn writes_nested_elements() {
        let nodes = vec![OutputElement::new("p")
            .with_child("Hello ")
            .with_child(OutputElement::new("strong").with_child("world"))
            .into()];
        assert_eq!(to_html(&nodes), "<p>Hello <strong>world</strong></p>");
    }

    #[test]
    fn escapes_text_and_attributes() {
        let element = OutputElement::new("a")
            .with_attribute("href", "/search?q=\"a\"&b")
            .with_child("1 < 2 & 3");
        assert_eq!(
            element_to_html(&element),
            "<a href=\"/search?q=&quot;a&quot;&amp;b\">1 &lt; 2 &amp; 3</a>"
        );
    }

    #[test]
    fn void_elements_self_close() {
        let nodes = vec![OutputElement::new("hr").into()];
        assert_eq!(to_html(&nodes), "<hr />");
    }

    #[test]
    fn attributes_are_written_in_name_order() {
        let element = OutputElement::new("a")
            .with_attributes(attributes([("target", "_blank"), ("href", "x")]));
        assert_eq!(element_to_html(&element), "<a href=\"x\" target=\"_blank\"></a>");
    }

    #[test]
    fn top_level_nodes_are_newline_separated() {
        let nodes = vec![
            OutputElement::new("p").with_child("a").into(),
            OutputElement::new("p").with_child("b").into(),
        ];
        assert_eq!(to_html(&nodes), "<p>a</p>\n<p>b</p>");
    }

    #[test]
    fn document_wrapper_carries_attributes() {
        let nodes = vec![OutputElement::new("p").with_child("a").into()];
        let html = to_html_document(&nodes, &attributes([("class", "markdown-body")]));
        assert_eq!(html, "<div class=\"markdown-body\">\n<p>a</p>\n</div>");
        assert_eq!(to_html_document(&nodes, &Attributes::new()), "<p>a</p>");
    }
}
