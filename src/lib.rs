//! Rendering of parsed org documents
//!
//!     This crate takes the node tree produced by an org parser and turns it into generic,
//!     styleable output elements (tag, attributes, children) plus a hierarchical table of
//!     contents. The parser and the view framework that materializes elements are both outside
//!     of this crate: input is a [`Document`] (usually deserialized from the parser's JSON),
//!     output is a sequence of [`OutputNode`]s that can be handed to a view layer or written as
//!     HTML.
//!
//! Architecture
//!
//!     Rendering is a two-phase pipeline:
//!
//!     1. TOC pass ([`toc`]): the top-level headers are indexed in document order. Each header
//!        gets a dot-separated outline index (`1`, `1.2`, `1.2.1`) derived from the level change
//!        relative to the previous header, and the headers are arranged into a forest of
//!        [`TocEntry`] values. Per-header results come back as [`toc::HeaderAnnotations`]; the
//!        document itself is not touched.
//!     2. Element pass ([`mod@render`]): every node is mapped to output elements. Headers pick up
//!        their anchor from the annotations and turn trailing `:tag:` annotations into badges.
//!        Code blocks, literal blocks and links are rendered by pluggable strategies.
//!
//!     A TOC consumer (e.g. a navigation panel) receives the forest between the two phases, see
//!     [`render_with_toc`].
//!
//!     The file structure :
//!     .
//!     ├── ast                     # Document nodes and text helpers
//!     ├── toc                     # Tag extraction, index allocation, TOC builder
//!     ├── render                  # Output elements, strategies, transformer, HTML writer
//!     ├── config.rs               # Layered settings and RenderConfig
//!     ├── pipeline.rs             # render / render_with_toc
//!     ├── format.rs               # Output format trait and built-in formats
//!     ├── registry.rs             # FormatRegistry for selection by name
//!     ├── error.rs
//!     └── lib.rs
//!
//! Configuration
//!
//!     Declarative settings live in `defaults/orgview.default.toml`, embedded at build time and
//!     layered with user files through [`SettingsLoader`]. Rendering strategies are set
//!     on [`RenderConfig::builder`].
//!
//! Testing
//!     tests
//!     ├── toc_indexing.rs         # index allocation and forest shape
//!     ├── transform.rs            # end to end rendering
//!     └── fixtures
//!         └── outline.json

pub mod ast;
pub mod config;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod registry;
pub mod render;
pub mod toc;

pub use ast::{Document, DocumentNode};
pub use crate::config::{RenderConfig, RenderSettings, SettingsLoader};
pub use error::{RenderError, Result};
pub use format::Format;
pub use pipeline::{index_headers, render, render_document, render_with_toc, Rendered};
pub use registry::FormatRegistry;
pub use render::{ElementTransformer, OutputElement, OutputNode};
pub use toc::{TocBuilder, TocEntry};
