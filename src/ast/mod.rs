//! The parsed document tree handed in by the org parser.
//!
//! - [`nodes`]: the closed node taxonomy and the top-level [`Document`]
//! - [`text`]: text flattening and last-leaf lookup used by headers

pub mod nodes;
pub mod text;

pub use nodes::{Document, DocumentNode};
pub use text::{flatten_text, last_leaf, last_leaf_mut, tag_values};
