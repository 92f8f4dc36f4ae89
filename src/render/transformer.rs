//! Document nodes to output elements
//!
//!     The transformer is a recursive walk that maps every node category to output elements:
//!
//!         paragraph -> p          bold -> strong        italic -> em
//!         dashed -> del           underline -> ins      code -> code
//!         tableRow -> tr          tableCell -> td       table -> table > tbody
//!         orderedList -> ol       unorderedList -> ul   listElement -> li
//!         definitionList -> dl    horizontalRule -> hr  header -> h1..h6
//!
//!     Code blocks, literal blocks and links go through the strategies in [`RenderConfig`].
//!
//!     The parser wraps runs of inline content in `inlineContainer` nodes. A container with a
//!     single child is transparent, and an element whose only child is a container takes the
//!     container's children directly, so the grouping never shows up as an extra wrapper.
//!
//!     Header anchors come from the [`HeaderAnnotations`] of a TOC pass (keyed by top-level
//!     position) or, failing that, from an `index` already written onto the node. Without
//!     either, headers render without an id. Input nodes are never mutated.

use crate::ast::{last_leaf_mut, DocumentNode};
use crate::config::RenderConfig;
use crate::error::{RenderError, Result};
use crate::toc::tags::{find_annotation, split_tags};
use crate::toc::HeaderAnnotations;

use super::element::{Attributes, KeySequence, OutputElement, OutputNode};
use super::renderers::ElementFactory;

/// Term text the parser emits for a definition entry without a term.
const EMPTY_TERM: &str = "???";

/// Maps document nodes to output elements.
#[derive(Debug, Clone, Copy)]
pub struct ElementTransformer<'a> {
    config: &'a RenderConfig,
    annotations: Option<&'a HeaderAnnotations>,
}

impl<'a> ElementTransformer<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            annotations: None,
        }
    }

    /// Use the results of a TOC pass for header anchors.
    pub fn with_annotations(mut self, annotations: &'a HeaderAnnotations) -> Self {
        self.annotations = Some(annotations);
        self
    }

    /// Transform a top-level node sequence.
    ///
    /// Nodes that render to nothing (unknown categories and directives) are dropped. Every
    /// element of the result carries a key unique within this call.
    pub fn transform(&self, nodes: &[DocumentNode]) -> Result<Vec<OutputNode>> {
        let mut output = Vec::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            if let Some(rendered) = self.render_node(node, Some(position))? {
                output.push(rendered);
            }
        }

        let mut keys = KeySequence::default();
        keys.assign(&mut output);
        log::debug!(
            "transformed {} nodes into {} elements",
            nodes.len(),
            keys.issued()
        );
        Ok(output)
    }

    /// `position` is the node's index in the top-level sequence, `None` below it.
    fn render_node(
        &self,
        node: &DocumentNode,
        position: Option<usize>,
    ) -> Result<Option<OutputNode>> {
        let rendered = match node {
            DocumentNode::Text { value } => OutputNode::Text(value.clone()),
            DocumentNode::InlineContainer { children } => return self.render_inline(children),
            DocumentNode::Header {
                level,
                children,
                index,
            } => self.render_header(*level, children, index.as_deref(), position)?,
            DocumentNode::Link { src, children } => {
                let factory = ElementFactory::new(self.render_children(children)?);
                self.config.link_renderer.render(src, factory).into()
            }
            DocumentNode::Paragraph { children } => self.element("p", children)?,
            DocumentNode::Bold { children } => self.element("strong", children)?,
            DocumentNode::Italic { children } => self.element("em", children)?,
            DocumentNode::Dashed { children } => self.element("del", children)?,
            DocumentNode::Underline { children } => self.element("ins", children)?,
            DocumentNode::Code { children } => self.element("code", children)?,
            DocumentNode::Directive {
                directive_name,
                directive_raw_value,
                children,
            } => return self.render_directive(directive_name, directive_raw_value, children),
            DocumentNode::Table { children } => OutputElement::new("table")
                .with_child(self.element("tbody", children)?)
                .into(),
            DocumentNode::TableRow { children } => self.element("tr", children)?,
            DocumentNode::TableCell { children } => self.element("td", children)?,
            DocumentNode::OrderedList { children } => self.element("ol", children)?,
            DocumentNode::UnorderedList { children } => self.element("ul", children)?,
            DocumentNode::ListElement { children, .. } => self.element("li", children)?,
            DocumentNode::DefinitionList { children } => self.render_definition_list(children)?,
            DocumentNode::HorizontalRule => OutputElement::new("hr").into(),
            DocumentNode::Preformatted { children } => {
                let content = block_content(children, "preformatted")?;
                let settings = &self.config.settings.preformatted;
                OutputElement::new("div")
                    .with_attributes(settings.wrapper_attributes.clone())
                    .with_child(self.config.preformatted_renderer.render(None, content))
                    .into()
            }
            DocumentNode::Tag { value } => OutputElement::new("span")
                .with_attributes(self.config.settings.tag_badge.attributes.clone())
                .with_child(value.as_str())
                .into(),
            DocumentNode::Unknown => {
                log::debug!("skipping node of unknown type");
                return Ok(None);
            }
        };
        Ok(Some(rendered))
    }

    /// Transform `children`, splicing in the grandchildren of a lone inline container.
    fn render_children(&self, children: &[DocumentNode]) -> Result<Vec<OutputNode>> {
        let children = match children {
            [DocumentNode::InlineContainer { children: inner }] => inner.as_slice(),
            _ => children,
        };

        let mut output = Vec::with_capacity(children.len());
        for child in children {
            if let Some(rendered) = self.render_node(child, None)? {
                output.push(rendered);
            }
        }
        Ok(output)
    }

    fn element(&self, tag: &str, children: &[DocumentNode]) -> Result<OutputNode> {
        Ok(self.element_with(tag, children, Attributes::new())?.into())
    }

    fn element_with(
        &self,
        tag: &str,
        children: &[DocumentNode],
        attributes: Attributes,
    ) -> Result<OutputElement> {
        Ok(OutputElement::new(tag)
            .with_attributes(attributes)
            .with_children(self.render_children(children)?))
    }

    fn render_inline(&self, children: &[DocumentNode]) -> Result<Option<OutputNode>> {
        match children {
            [] => Ok(None),
            [only] => self.render_node(only, None),
            _ => self.element("span", children).map(Some),
        }
    }

    fn render_directive(
        &self,
        name: &str,
        raw_value: &str,
        children: &[DocumentNode],
    ) -> Result<Option<OutputNode>> {
        let rendered = match name {
            "quote" => self.element("blockquote", children)?,
            "example" => self.element("pre", children)?,
            "src" => {
                let content = block_content(children, "directive")?;
                let settings = &self.config.settings.source_block;
                OutputElement::new("div")
                    .with_attributes(settings.wrapper_attributes.clone())
                    .with_child(
                        self.config
                            .source_block_renderer
                            .render(Some(raw_value), content),
                    )
                    .into()
            }
            other => {
                log::debug!("skipping unsupported directive '{other}'");
                return Ok(None);
            }
        };
        Ok(Some(rendered))
    }

    fn render_header(
        &self,
        level: u32,
        children: &[DocumentNode],
        index: Option<&str>,
        position: Option<usize>,
    ) -> Result<OutputNode> {
        let tag = format!("h{}", level.clamp(1, 6));

        let anchor = position
            .and_then(|pos| self.annotations?.get(pos))
            .map(|annotation| annotation.index.as_str())
            .or(index);
        let mut attributes = Attributes::new();
        if let Some(anchor) = anchor {
            attributes.insert("id".to_string(), self.config.settings.heading_anchor(anchor));
        }

        let children = with_tag_badges(children);
        Ok(self.element_with(&tag, &children, attributes)?.into())
    }

    fn render_definition_list(&self, entries: &[DocumentNode]) -> Result<OutputNode> {
        let mut items = Vec::new();
        for entry in entries {
            let DocumentNode::ListElement { children, term } = entry else {
                log::debug!("skipping {} inside definition list", entry.type_name());
                continue;
            };

            match term.as_deref() {
                None => items.push(self.element("dt", children)?),
                Some(term) => match first_term_child(term).map(DocumentNode::text_value) {
                    None => log::debug!("skipping definition entry with malformed term"),
                    Some(Some(EMPTY_TERM)) => items.push(self.element("dt", children)?),
                    Some(_) => {
                        items.push(self.element("dt", term)?);
                        items.push(self.element("dd", children)?);
                    }
                },
            }
        }
        Ok(OutputElement::new("dl").with_children(items).into())
    }
}

/// First child of the first term node; `None` when the term has no such structure.
fn first_term_child(term: &[DocumentNode]) -> Option<&DocumentNode> {
    term.first()?.children().first()
}

/// The literal content of a block: its first child, which must be text.
fn block_content<'n>(children: &'n [DocumentNode], node: &'static str) -> Result<&'n str> {
    children
        .first()
        .and_then(DocumentNode::text_value)
        .ok_or(RenderError::MissingContent { node })
}

/// Header children with a trailing tag annotation replaced by tag badge nodes.
fn with_tag_badges(children: &[DocumentNode]) -> Vec<DocumentNode> {
    let mut children = children.to_vec();
    let tags = match last_leaf_mut(&mut children) {
        Some(DocumentNode::Text { value }) => match find_annotation(value) {
            Some(range) => {
                let tags = split_tags(&value[range.clone()]);
                value.truncate(range.start);
                tags
            }
            None => return children,
        },
        _ => return children,
    };
    children.extend(tags.into_iter().map(|value| DocumentNode::Tag { value }));
    children
}
