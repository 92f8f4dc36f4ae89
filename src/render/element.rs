//! Output element tree
//!
//!     The transformer produces generic, styleable elements: a tag name, an attribute mapping and
//!     ordered children that are either elements or literal text. This is the whole interface a
//!     rendering framework needs to materialize a view.
//!
//!     Every element carries an [`ElementKey`] for the consumer's reconciliation. Keys are handed
//!     out sequentially during a single transformation pass; they are unique within that pass and
//!     mean nothing beyond it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Element attributes, ordered by name.
pub type Attributes = BTreeMap<String, String>;

/// Build an [`Attributes`] map from `(name, value)` pairs.
pub fn attributes<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Locally unique element identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementKey(pub u64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputElement {
    pub tag: String,
    pub key: ElementKey,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutputNode>,
}

/// A child of an element: a nested element or literal text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputNode {
    Text(String),
    Element(OutputElement),
}

impl OutputElement {
    /// A childless element without attributes. Its key is assigned by the transformer.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            key: ElementKey::default(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Merge `attributes` over the existing ones.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes.extend(attributes);
        self
    }

    pub fn with_child(mut self, child: impl Into<OutputNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: Vec<OutputNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Concatenated text of the whole subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.push_text(&mut out);
        }
        out
    }

    /// Child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &OutputElement> {
        self.children.iter().filter_map(OutputNode::as_element)
    }

    /// First element in the subtree (including `self`) with the given tag, depth first.
    pub fn find(&self, tag: &str) -> Option<&OutputElement> {
        if self.tag == tag {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find(tag))
    }
}

impl OutputNode {
    pub fn as_element(&self) -> Option<&OutputElement> {
        match self {
            OutputNode::Element(element) => Some(element),
            OutputNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OutputNode::Text(text) => Some(text),
            OutputNode::Element(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            OutputNode::Text(text) => out.push_str(text),
            OutputNode::Element(element) => {
                for child in &element.children {
                    child.push_text(out);
                }
            }
        }
    }
}

impl From<OutputElement> for OutputNode {
    fn from(element: OutputElement) -> Self {
        OutputNode::Element(element)
    }
}

impl From<String> for OutputNode {
    fn from(text: String) -> Self {
        OutputNode::Text(text)
    }
}

impl From<&str> for OutputNode {
    fn from(text: &str) -> Self {
        OutputNode::Text(text.to_string())
    }
}

/// Hands out keys for one transformation pass.
#[derive(Debug, Default)]
pub(crate) struct KeySequence {
    next: u64,
}

impl KeySequence {
    /// Assign fresh keys to every element of `nodes`, in document order.
    pub(crate) fn assign(&mut self, nodes: &mut [OutputNode]) {
        for node in nodes {
            if let OutputNode::Element(element) = node {
                self.next += 1;
                element.key = ElementKey(self.next);
                self.assign(&mut element.children);
            }
        }
    }

    /// Number of keys handed out so far.
    pub(crate) fn issued(&self) -> u64 {
        self.next
    }
}
