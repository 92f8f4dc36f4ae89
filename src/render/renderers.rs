//! Pluggable rendering strategies
//!
//!     Code blocks, literal blocks and links are rendered through strategy traits so callers can
//!     swap in their own presentation (a syntax highlighter, a router-aware link, ...). Plain
//!     closures implement the traits, which keeps one-off overrides short:
//!
//!     ```ignore
//!     let config = RenderConfig::builder()
//!         .link_renderer(|target: &str, content: ElementFactory| {
//!             content.build("a", attributes([("href", target)]))
//!         })
//!         .build();
//!     ```

use super::element::{attributes, Attributes, OutputElement, OutputNode};

/// Renders the body of a code or literal block.
pub trait BlockRenderer: Send + Sync {
    /// `language` is the raw annotation of a `src` block, `None` for literal blocks.
    fn render(&self, language: Option<&str>, content: &str) -> OutputElement;
}

impl<F> BlockRenderer for F
where
    F: Fn(Option<&str>, &str) -> OutputElement + Send + Sync,
{
    fn render(&self, language: Option<&str>, content: &str) -> OutputElement {
        self(language, content)
    }
}

/// Renders a link around content the transformer has already produced.
pub trait LinkRenderer: Send + Sync {
    fn render(&self, target: &str, content: ElementFactory) -> OutputElement;
}

impl<F> LinkRenderer for F
where
    F: Fn(&str, ElementFactory) -> OutputElement + Send + Sync,
{
    fn render(&self, target: &str, content: ElementFactory) -> OutputElement {
        self(target, content)
    }
}

/// Transformed link children waiting for a wrapping element.
///
/// The link renderer picks the tag and attributes; the children are supplied by the transformer.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementFactory {
    children: Vec<OutputNode>,
}

impl ElementFactory {
    pub(crate) fn new(children: Vec<OutputNode>) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &[OutputNode] {
        &self.children
    }

    /// Wrap the children in a `tag` element carrying `attributes`.
    pub fn build(self, tag: &str, attributes: Attributes) -> OutputElement {
        OutputElement::new(tag)
            .with_attributes(attributes)
            .with_children(self.children)
    }
}

/// Default block renderer: `<pre><code>` with the language as a styling hint.
///
/// The first word of the annotation is the language (`"python -n"` highlights as `python`).
/// Without a language the block is emitted unstyled.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeBlockRenderer;

impl CodeBlockRenderer {
    fn language(annotation: Option<&str>) -> Option<&str> {
        annotation.and_then(|raw| raw.split_whitespace().next())
    }
}

impl BlockRenderer for CodeBlockRenderer {
    fn render(&self, language: Option<&str>, content: &str) -> OutputElement {
        let code = OutputElement::new("code").with_child(content);
        match Self::language(language) {
            Some(lang) => OutputElement::new("pre")
                .with_attribute("class", lang)
                .with_child(code.with_attribute("class", format!("language-{lang}"))),
            None => OutputElement::new("pre").with_child(code),
        }
    }
}

/// Default link renderer: an anchor opening in a new viewing context.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorLinkRenderer;

impl LinkRenderer for AnchorLinkRenderer {
    fn render(&self, target: &str, content: ElementFactory) -> OutputElement {
        content.build("a", attributes([("href", target), ("target", "_blank")]))
    }
}
