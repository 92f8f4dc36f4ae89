//! Rendering of document nodes into styleable output elements.
//!
//! - [`element`]: the output element tree
//! - [`renderers`]: pluggable code block and link strategies
//! - [`transformer`]: node to element mapping
//! - [`html`]: HTML serialization of output elements

pub mod element;
pub mod html;
pub mod renderers;
pub mod transformer;

pub use element::{attributes, Attributes, ElementKey, OutputElement, OutputNode};
pub use html::{to_html, to_html_document};
pub use renderers::{
    AnchorLinkRenderer, BlockRenderer, CodeBlockRenderer, ElementFactory, LinkRenderer,
};
pub use transformer::ElementTransformer;
