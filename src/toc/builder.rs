//! Table of contents construction
//!
//!     Headers arrive as a flat, level-annotated sequence. The builder walks them in document
//!     order, allocating an index for each one and attaching a TOC entry to the forest:
//!
//!     - deeper than the previous header: the entry becomes the previous entry's last child
//!     - otherwise: starting at the previous entry's parent, climb one ancestor per level of
//!       decrease, stopping early at the forest root, and attach there
//!
//!     The forest is grown in an arena where every slot records its parent position. That table
//!     never leaves this module; the result handed to callers is a plain downward tree of
//!     [`TocEntry`] values that serializes without cycles.
//!
//!     Header nodes are not mutated. Per-header results are returned as [`HeaderAnnotations`],
//!     keyed by the header's position in the node sequence, for the element transformer to
//!     consume. [`annotate`] writes them back onto the nodes for callers that want them inline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::index::IndexAllocator;
use super::tags::{extract_tags, find_annotation, split_tags};
use crate::ast::{flatten_text, last_leaf_mut, tag_values, Document, DocumentNode};

/// A node of the navigation forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub level: u32,
    /// Flattened header text with the tag annotation removed.
    pub title: String,
    /// Hierarchical index, prefixed when an anchor prefix is configured.
    pub index: String,
    pub tags: Vec<String>,
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    /// Number of entries in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TocEntry::count).sum::<usize>()
    }
}

/// What the builder computed for a single header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderAnnotation {
    pub index: String,
    pub title: String,
    pub tags: Vec<String>,
}

/// Per-header results keyed by the header's position in the node sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderAnnotations {
    by_position: BTreeMap<usize, HeaderAnnotation>,
}

impl HeaderAnnotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, position: usize) -> Option<&HeaderAnnotation> {
        self.by_position.get(&position)
    }

    pub fn insert(&mut self, position: usize, annotation: HeaderAnnotation) {
        self.by_position.insert(position, annotation);
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &HeaderAnnotation)> {
        self.by_position.iter().map(|(pos, ann)| (*pos, ann))
    }

    pub fn len(&self) -> usize {
        self.by_position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_position.is_empty()
    }
}

/// Result of a TOC pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocOutcome {
    /// Forest roots in document order.
    pub entries: Vec<TocEntry>,
    pub annotations: HeaderAnnotations,
}

const ROOT: usize = 0;

/// Arena slot. Slot 0 is the synthetic root at level 0 with no index.
#[derive(Debug)]
struct Slot {
    level: u32,
    index: Option<String>,
    title: String,
    tags: Vec<String>,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl Slot {
    fn root() -> Self {
        Self {
            level: 0,
            index: None,
            title: String::new(),
            tags: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Builds the TOC forest and header annotations from a header sequence.
#[derive(Debug, Clone, Default)]
pub struct TocBuilder {
    allocator: IndexAllocator,
}

impl TocBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder whose indices are wrapped as `<prefix>-<index>`.
    pub fn with_prefix(prefix: Option<&str>) -> Self {
        Self {
            allocator: prefix.map(IndexAllocator::with_prefix).unwrap_or_default(),
        }
    }

    /// Index the top-level headers of `document`.
    pub fn build(&self, document: &Document) -> TocOutcome {
        self.build_from_headers(document.headers())
    }

    /// Index the given `(position, header)` pairs. Non-header nodes are ignored.
    pub fn build_from_headers<'a>(
        &self,
        headers: impl IntoIterator<Item = (usize, &'a DocumentNode)>,
    ) -> TocOutcome {
        let mut slots = vec![Slot::root()];
        let mut annotations = HeaderAnnotations::new();
        let mut prev = ROOT;

        for (position, node) in headers {
            let Some(level) = node.level() else {
                continue;
            };

            let (title, tags) = header_title(node);
            let delta = i64::from(level) - i64::from(slots[prev].level);
            let index = self.allocator.next(slots[prev].index.as_deref(), delta);
            log::trace!("header at {position}: level {level}, delta {delta}, index {index}");

            let parent = if delta > 0 {
                prev
            } else {
                climb(&slots, slots[prev].parent.unwrap_or(ROOT), delta.unsigned_abs())
            };

            annotations.insert(
                position,
                HeaderAnnotation {
                    index: index.clone(),
                    title: title.clone(),
                    tags: tags.clone(),
                },
            );

            let id = slots.len();
            slots.push(Slot {
                level,
                index: Some(index),
                title,
                tags,
                parent: Some(parent),
                children: Vec::new(),
            });
            slots[parent].children.push(id);
            prev = id;
        }

        let entries = detach(&slots, ROOT);
        log::debug!(
            "toc built: {} headers, {} root entries",
            annotations.len(),
            entries.len()
        );
        TocOutcome {
            entries,
            annotations,
        }
    }
}

/// Walk up `steps` ancestors from `start`, stopping at the root.
fn climb(slots: &[Slot], start: usize, steps: u64) -> usize {
    let mut current = start;
    for _ in 0..steps {
        match slots[current].parent {
            Some(parent) => current = parent,
            None => break,
        }
    }
    current
}

/// Convert the arena below `slot` into an owned, downward-only forest.
fn detach(slots: &[Slot], slot: usize) -> Vec<TocEntry> {
    slots[slot]
        .children
        .iter()
        .map(|&child| {
            let s = &slots[child];
            TocEntry {
                level: s.level,
                title: s.title.clone(),
                index: s.index.clone().unwrap_or_default(),
                tags: s.tags.clone(),
                children: detach(slots, child),
            }
        })
        .collect()
}

/// Title and tags of a header: trailing text annotation first, then explicit tag nodes.
fn header_title(node: &DocumentNode) -> (String, Vec<String>) {
    let raw = flatten_text(node);
    let extracted = extract_tags(&raw);
    let mut tags = extracted.tags;
    tags.extend(tag_values(node));
    (extracted.title.to_string(), tags)
}

/// Index the headers of `nodes` (keyed by their position in the slice).
pub fn build_toc(anchor_prefix: Option<&str>, nodes: &[DocumentNode]) -> TocOutcome {
    TocBuilder::with_prefix(anchor_prefix).build_from_headers(nodes.iter().enumerate())
}

/// Write annotations back onto the header nodes they were computed for.
///
/// Each annotated header receives its `index`, and a trailing tag annotation on its last text
/// leaf is replaced by tag badge nodes. Running this again is a no-op.
pub fn annotate(nodes: &mut [DocumentNode], annotations: &HeaderAnnotations) {
    for (position, annotation) in annotations.iter() {
        let Some(DocumentNode::Header {
            index, children, ..
        }) = nodes.get_mut(position)
        else {
            continue;
        };
        *index = Some(annotation.index.clone());

        let badges = match last_leaf_mut(children) {
            Some(DocumentNode::Text { value }) => match find_annotation(value) {
                Some(range) => {
                    let tags = split_tags(&value[range.clone()]);
                    value.truncate(range.start);
                    tags
                }
                None => continue,
            },
            _ => continue,
        };
        children.extend(badges.into_iter().map(|value| DocumentNode::Tag { value }));
    }
}
