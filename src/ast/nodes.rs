//! Document node definitions
//!
//!     A document arrives from the org parser as an ordered sequence of typed nodes. Every node
//!     category is a variant of [`DocumentNode`] carrying exactly the fields it needs, so dispatch
//!     over the tree is an exhaustive `match` rather than a string switch.
//!
//!     The wire shape is the parser's JSON: nodes are tagged by a `"type"` field, field names are
//!     camelCase and `children` may be omitted on leaves. A `"type"` this crate does not know
//!     deserializes to [`DocumentNode::Unknown`], which renders to nothing.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A single node of a parsed org document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DocumentNode {
    /// Literal text.
    Text { value: String },
    /// Inline grouping introduced by the parser around runs of inline content.
    InlineContainer {
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
    /// An outline header. `level` is 1-based and need not be contiguous with its neighbours.
    Header {
        level: u32,
        #[serde(default)]
        children: Vec<DocumentNode>,
        /// Hierarchical index, present once the header has been annotated.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<String>,
    },
    Link {
        src: String,
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
    Paragraph {
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
    Bold {
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
    Italic {
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
    Dashed {
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
    Underline {
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
    Code {
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
    /// A `#+BEGIN_<NAME> ... #+END_<NAME>` block (`quote`, `example`, `src`).
    Directive {
        directive_name: String,
        /// Raw annotation after the block name, e.g. the language of a `src` block.
        #[serde(default)]
        directive_raw_value: String,
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
    Table {
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
    TableRow {
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
    TableCell {
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
    OrderedList {
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
    UnorderedList {
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
    /// A list item. Inside a definition list, `term` carries the term nodes.
    ListElement {
        #[serde(default)]
        children: Vec<DocumentNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        term: Option<Vec<DocumentNode>>,
    },
    DefinitionList {
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
    HorizontalRule,
    /// A literal block outside of any directive.
    Preformatted {
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
    /// A header tag badge (`:tag:` in org source).
    Tag { value: String },
    /// Any node type produced by a newer parser.
    #[serde(other)]
    Unknown,
}

impl DocumentNode {
    pub fn text(value: impl Into<String>) -> Self {
        DocumentNode::Text {
            value: value.into(),
        }
    }

    pub fn header(level: u32, children: Vec<DocumentNode>) -> Self {
        DocumentNode::Header {
            level,
            children,
            index: None,
        }
    }

    /// A header whose only content is the given text.
    pub fn header_text(level: u32, title: impl Into<String>) -> Self {
        Self::header(level, vec![Self::text(title)])
    }

    pub fn inline(children: Vec<DocumentNode>) -> Self {
        DocumentNode::InlineContainer { children }
    }

    pub fn paragraph(children: Vec<DocumentNode>) -> Self {
        DocumentNode::Paragraph { children }
    }

    pub fn link(src: impl Into<String>, children: Vec<DocumentNode>) -> Self {
        DocumentNode::Link {
            src: src.into(),
            children,
        }
    }

    pub fn directive(
        name: impl Into<String>,
        raw_value: impl Into<String>,
        children: Vec<DocumentNode>,
    ) -> Self {
        DocumentNode::Directive {
            directive_name: name.into(),
            directive_raw_value: raw_value.into(),
            children,
        }
    }

    /// A `src` block holding `content` verbatim.
    pub fn source_block(language: impl Into<String>, content: impl Into<String>) -> Self {
        Self::directive("src", language, vec![Self::text(content)])
    }

    pub fn preformatted(content: impl Into<String>) -> Self {
        DocumentNode::Preformatted {
            children: vec![Self::text(content)],
        }
    }

    pub fn list_element(children: Vec<DocumentNode>) -> Self {
        DocumentNode::ListElement {
            children,
            term: None,
        }
    }

    /// A definition list entry with its term nodes.
    pub fn definition(term: Vec<DocumentNode>, children: Vec<DocumentNode>) -> Self {
        DocumentNode::ListElement {
            children,
            term: Some(term),
        }
    }

    /// The parser's type name for this node (e.g. "inlineContainer").
    pub fn type_name(&self) -> &'static str {
        match self {
            DocumentNode::Text { .. } => "text",
            DocumentNode::InlineContainer { .. } => "inlineContainer",
            DocumentNode::Header { .. } => "header",
            DocumentNode::Link { .. } => "link",
            DocumentNode::Paragraph { .. } => "paragraph",
            DocumentNode::Bold { .. } => "bold",
            DocumentNode::Italic { .. } => "italic",
            DocumentNode::Dashed { .. } => "dashed",
            DocumentNode::Underline { .. } => "underline",
            DocumentNode::Code { .. } => "code",
            DocumentNode::Directive { .. } => "directive",
            DocumentNode::Table { .. } => "table",
            DocumentNode::TableRow { .. } => "tableRow",
            DocumentNode::TableCell { .. } => "tableCell",
            DocumentNode::OrderedList { .. } => "orderedList",
            DocumentNode::UnorderedList { .. } => "unorderedList",
            DocumentNode::ListElement { .. } => "listElement",
            DocumentNode::DefinitionList { .. } => "definitionList",
            DocumentNode::HorizontalRule => "horizontalRule",
            DocumentNode::Preformatted { .. } => "preformatted",
            DocumentNode::Tag { .. } => "tag",
            DocumentNode::Unknown => "unknown",
        }
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[DocumentNode] {
        match self {
            DocumentNode::InlineContainer { children }
            | DocumentNode::Header { children, .. }
            | DocumentNode::Link { children, .. }
            | DocumentNode::Paragraph { children }
            | DocumentNode::Bold { children }
            | DocumentNode::Italic { children }
            | DocumentNode::Dashed { children }
            | DocumentNode::Underline { children }
            | DocumentNode::Code { children }
            | DocumentNode::Directive { children, .. }
            | DocumentNode::Table { children }
            | DocumentNode::TableRow { children }
            | DocumentNode::TableCell { children }
            | DocumentNode::OrderedList { children }
            | DocumentNode::UnorderedList { children }
            | DocumentNode::ListElement { children, .. }
            | DocumentNode::DefinitionList { children }
            | DocumentNode::Preformatted { children } => children,
            DocumentNode::Text { .. }
            | DocumentNode::HorizontalRule
            | DocumentNode::Tag { .. }
            | DocumentNode::Unknown => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<DocumentNode>> {
        match self {
            DocumentNode::InlineContainer { children }
            | DocumentNode::Header { children, .. }
            | DocumentNode::Link { children, .. }
            | DocumentNode::Paragraph { children }
            | DocumentNode::Bold { children }
            | DocumentNode::Italic { children }
            | DocumentNode::Dashed { children }
            | DocumentNode::Underline { children }
            | DocumentNode::Code { children }
            | DocumentNode::Directive { children, .. }
            | DocumentNode::Table { children }
            | DocumentNode::TableRow { children }
            | DocumentNode::TableCell { children }
            | DocumentNode::OrderedList { children }
            | DocumentNode::UnorderedList { children }
            | DocumentNode::ListElement { children, .. }
            | DocumentNode::DefinitionList { children }
            | DocumentNode::Preformatted { children } => Some(children),
            DocumentNode::Text { .. }
            | DocumentNode::HorizontalRule
            | DocumentNode::Tag { .. }
            | DocumentNode::Unknown => None,
        }
    }

    /// Literal value of a text node.
    pub fn text_value(&self) -> Option<&str> {
        match self {
            DocumentNode::Text { value } => Some(value),
            _ => None,
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, DocumentNode::Header { .. })
    }

    /// Header level, `None` for every other category.
    pub fn level(&self) -> Option<u32> {
        match self {
            DocumentNode::Header { level, .. } => Some(*level),
            _ => None,
        }
    }
}

/// A parsed document: the ordered top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub nodes: Vec<DocumentNode>,
}

/// Accepted JSON layouts: `{"nodes": [...]}` or a bare node array.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireDocument {
    Wrapped { nodes: Vec<DocumentNode> },
    Bare(Vec<DocumentNode>),
}

impl Document {
    pub fn new(nodes: Vec<DocumentNode>) -> Self {
        Self { nodes }
    }

    /// Deserialize a document from the parser's JSON output.
    pub fn from_json(source: &str) -> Result<Self> {
        let nodes = match serde_json::from_str::<WireDocument>(source)? {
            WireDocument::Wrapped { nodes } | WireDocument::Bare(nodes) => nodes,
        };
        Ok(Self { nodes })
    }

    /// Top-level header nodes paired with their position in [`Document::nodes`].
    pub fn headers(&self) -> impl Iterator<Item = (usize, &DocumentNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_header())
    }
}

impl From<Vec<DocumentNode>> for Document {
    fn from(nodes: Vec<DocumentNode>) -> Self {
        Self::new(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_parser_shape() {
        let json = r#"{"nodes": [
            {"type": "header", "level": 2, "children": [{"type": "text", "value": "Intro"}]},
            {"type": "directive", "directiveName": "src", "directiveRawValue": "rust",
             "children": [{"type": "text", "value": "fn main() {}"}]},
            {"type": "horizontalRule"}
        ]}"#;

        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.nodes.len(), 3);
        assert_eq!(doc.nodes[0], DocumentNode::header_text(2, "Intro"));
        assert_eq!(doc.nodes[1], DocumentNode::source_block("rust", "fn main() {}"));
        assert_eq!(doc.nodes[2], DocumentNode::HorizontalRule);
    }

    #[test]
    fn unknown_type_becomes_unknown_variant() {
        let doc = Document::from_json(r#"[{"type": "frobnicate", "value": "x"}]"#).unwrap();
        assert_eq!(doc.nodes, vec![DocumentNode::Unknown]);
        assert_eq!(doc.nodes[0].type_name(), "unknown");
    }

    #[test]
    fn children_default_to_empty() {
        let doc = Document::from_json(r#"[{"type": "paragraph"}]"#).unwrap();
        assert!(doc.nodes[0].children().is_empty());
    }

    #[test]
    fn definition_term_is_optional() {
        let json = r#"[
            {"type": "listElement", "children": [{"type": "text", "value": "body"}]},
            {"type": "listElement", "term": [{"type": "inlineContainer",
                "children": [{"type": "text", "value": "Term"}]}], "children": []}
        ]"#;
        let doc = Document::from_json(json).unwrap();

        assert!(matches!(&doc.nodes[0], DocumentNode::ListElement { term: None, .. }));
        assert!(matches!(&doc.nodes[1], DocumentNode::ListElement { term: Some(t), .. } if t.len() == 1));
    }

    #[test]
    fn header_index_is_not_serialized_until_set() {
        let json = serde_json::to_string(&DocumentNode::header_text(1, "A")).unwrap();
        assert!(!json.contains("index"));
    }

    #[test]
    fn headers_reports_top_level_positions() {
        let doc = Document::new(vec![
            DocumentNode::paragraph(vec![DocumentNode::text("lead")]),
            DocumentNode::header_text(1, "A"),
            DocumentNode::HorizontalRule,
            DocumentNode::header_text(2, "B"),
        ]);
        let positions: Vec<usize> = doc.headers().map(|(i, _)| i).collect();
        assert_eq!(positions, vec![1, 3]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Document::from_json("{not json").is_err());
    }
}
