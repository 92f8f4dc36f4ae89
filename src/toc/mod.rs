//! Table of contents derivation.
//!
//! - [`tags`]: trailing `:tag:` annotation extraction
//! - [`index`]: hierarchical index allocation
//! - [`builder`]: the TOC forest and per-header annotations

pub mod builder;
pub mod index;
pub mod tags;

pub use builder::{
    annotate, build_toc, HeaderAnnotation, HeaderAnnotations, TocBuilder, TocEntry, TocOutcome,
};
pub use index::{next_index, IndexAllocator};
pub use tags::{extract_tags, Extracted};
