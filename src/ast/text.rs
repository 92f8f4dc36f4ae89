//! Text helpers shared by the TOC builder and the element transformer.

use super::nodes::DocumentNode;

/// Concatenate every text value below `node`, depth first.
///
/// Tag badges are not part of the text; see [`tag_values`].
pub fn flatten_text(node: &DocumentNode) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &DocumentNode, out: &mut String) {
    match node {
        DocumentNode::Text { value } => out.push_str(value),
        DocumentNode::Tag { .. } => {}
        _ => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
    }
}

/// Values of the tag badge nodes below `node`, in document order.
pub fn tag_values(node: &DocumentNode) -> Vec<String> {
    let mut tags = Vec::new();
    collect_tags(node, &mut tags);
    tags
}

fn collect_tags(node: &DocumentNode, tags: &mut Vec<String>) {
    match node {
        DocumentNode::Tag { value } => tags.push(value.clone()),
        _ => {
            for child in node.children() {
                collect_tags(child, tags);
            }
        }
    }
}

/// The deepest last descendant of `node`, or `node` itself when it has no children.
pub fn last_leaf(node: &DocumentNode) -> &DocumentNode {
    match node.children().last() {
        Some(child) => last_leaf(child),
        None => node,
    }
}

/// Mutable variant of [`last_leaf`] over a child sequence.
pub fn last_leaf_mut(children: &mut [DocumentNode]) -> Option<&mut DocumentNode> {
    let last = children.last_mut()?;
    if last.children().is_empty() {
        return Some(last);
    }
    match last.children_mut() {
        Some(grandchildren) => last_leaf_mut(grandchildren),
        None => None,
    }
}
