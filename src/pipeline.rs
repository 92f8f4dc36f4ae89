//! The two-phase render pipeline
//!
//!     Phase 1 indexes the top-level headers into a TOC forest plus per-header annotations.
//!     Phase 2 transforms the nodes into output elements, taking the annotations as input
//!     alongside the untouched document. A TOC consumer sees the forest between the phases.

use serde::Serialize;

use crate::ast::Document;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::render::{Attributes, ElementTransformer, OutputNode};
use crate::toc::{TocBuilder, TocEntry, TocOutcome};

/// Everything one render pass produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub elements: Vec<OutputNode>,
    pub toc: Vec<TocEntry>,
    /// Attributes of the outer container when the result is emitted as a whole document.
    #[serde(skip)]
    pub document_attributes: Attributes,
}

/// Run the TOC pass over the top-level headers of `document`.
pub fn index_headers(document: &Document, config: &RenderConfig) -> TocOutcome {
    TocBuilder::with_prefix(config.settings.anchor_prefix()).build(document)
}

/// Render `document` to output elements.
pub fn render(document: &Document, config: &RenderConfig) -> Result<Vec<OutputNode>> {
    render_with_toc(document, config, |_| {})
}

/// Render `document`, handing the TOC forest to `on_toc` before elements are produced.
pub fn render_with_toc<F>(
    document: &Document,
    config: &RenderConfig,
    on_toc: F,
) -> Result<Vec<OutputNode>>
where
    F: FnOnce(&[TocEntry]),
{
    let outcome = index_headers(document, config);
    on_toc(&outcome.entries);
    ElementTransformer::new(config)
        .with_annotations(&outcome.annotations)
        .transform(&document.nodes)
}

/// Render `document` and keep the TOC alongside the elements.
pub fn render_document(document: &Document, config: &RenderConfig) -> Result<Rendered> {
    let outcome = index_headers(document, config);
    let elements = ElementTransformer::new(config)
        .with_annotations(&outcome.annotations)
        .transform(&document.nodes)?;
    Ok(Rendered {
        elements,
        toc: outcome.entries,
        document_attributes: config.settings.document.attributes.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::DocumentNode;

    fn sample() -> Document {
        Document::new(vec![
            DocumentNode::header_text(1, "A"),
            DocumentNode::paragraph(vec![DocumentNode::text("body")]),
            DocumentNode::header_text(2, "B :x:"),
        ])
    }

    #[test]
    fn callback_receives_forest_once() {
        let mut calls = 0;
        let mut roots = 0;
        let elements = render_with_toc(&sample(), &RenderConfig::default(), |entries| {
            calls += 1;
            roots = entries.len();
        })
        .unwrap();

        assert_eq!(calls, 1);
        assert_eq!(roots, 1);
        assert_eq!(elements.len(), 3);
    }

    #[test]
    fn render_anchors_headers() {
        let elements = render(&sample(), &RenderConfig::default()).unwrap();
        let b = elements[2].as_element().unwrap();
        assert_eq!(b.attribute("id"), Some("section-1.1"));
    }

    #[test]
    fn anchor_prefix_flows_into_ids_and_toc() {
        let config = RenderConfig::builder().anchor_prefix("doc").build();
        let rendered = render_document(&sample(), &config).unwrap();

        assert_eq!(rendered.toc[0].index, "doc-1");
        assert_eq!(rendered.toc[0].children[0].index, "doc-1.1");
        let a = rendered.elements[0].as_element().unwrap();
        assert_eq!(a.attribute("id"), Some("section-doc-1"));
    }

    #[test]
    fn document_is_left_untouched() {
        let document = sample();
        let before = document.clone();
        render(&document, &RenderConfig::default()).unwrap();
        assert_eq!(document, before);
    }
}
