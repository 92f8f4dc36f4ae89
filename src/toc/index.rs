//! Hierarchical index allocation
//!
//!     Each header receives a dotted index (`1`, `1.2`, `1.2.3`) computed from the previous
//!     header's index and the level difference between the two headers:
//!
//!     - first header: `1`
//!     - deeper (any positive delta): append `.1`, so a jump of several levels still adds exactly
//!       one component
//!     - same level: increment the last component
//!     - shallower by `n`: drop `n` components and increment the new last one
//!
//!     Climbing past the root (the previous index has `n` or fewer components) cannot be resolved
//!     against an ancestor, so the first component is incremented and returned alone. Well-formed
//!     level sequences never reach that branch.

/// Allocates hierarchical indices, optionally wrapped as `<prefix>-<index>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexAllocator {
    prefix: Option<String>,
}

impl IndexAllocator {
    /// An allocator producing bare indices.
    pub fn new() -> Self {
        Self { prefix: None }
    }

    /// An allocator producing `<prefix>-<index>` anchors. An empty prefix means no prefix.
    ///
    /// The prefix may contain dots (`v1.0-1.2`); count components with [`IndexAllocator::depth`],
    /// not [`depth`], for indices produced here.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: (!prefix.is_empty()).then_some(prefix),
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Number of dot-separated components of `index` after removing this allocator's prefix.
    pub fn depth(&self, index: &str) -> usize {
        match &self.prefix {
            None => depth(index),
            Some(prefix) => depth(strip_prefix(prefix, index)),
        }
    }

    /// Index following `prev` for a header `level_delta` levels below (positive) or above
    /// (negative) the previous one.
    pub fn next(&self, prev: Option<&str>, level_delta: i64) -> String {
        match &self.prefix {
            None => next_index(prev, level_delta),
            Some(prefix) => {
                let bare = prev.map(|prev| strip_prefix(prefix, prev));
                format!("{prefix}-{}", next_index(bare, level_delta))
            }
        }
    }
}

fn strip_prefix<'a>(prefix: &str, index: &'a str) -> &'a str {
    index
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .unwrap_or(index)
}

/// Unprefixed index allocation.
pub fn next_index(prev: Option<&str>, level_delta: i64) -> String {
    let Some(prev) = prev else {
        return "1".to_string();
    };

    if level_delta > 0 {
        return format!("{prev}.1");
    }

    let mut components = parse_components(prev);
    let climb = level_delta.unsigned_abs() as usize;

    if climb >= components.len() {
        // No ancestor `climb` levels up: restart as a sibling of the first top-level entry.
        log::debug!("index clamp: cannot climb {climb} level(s) from '{prev}'");
        let first = components.first().copied().unwrap_or(0);
        return first.saturating_add(1).to_string();
    }

    components.truncate(components.len() - climb);
    if let Some(last) = components.last_mut() {
        *last = last.saturating_add(1);
    }
    join_components(&components)
}

fn parse_components(index: &str) -> Vec<u64> {
    index
        .split('.')
        .map(|component| component.trim().parse().unwrap_or(0))
        .collect()
}

fn join_components(components: &[u64]) -> String {
    components
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// Number of dot-separated components of an unprefixed index.
///
/// A prefixed index must go through [`IndexAllocator::depth`].
pub fn depth(index: &str) -> usize {
    index.split('.').count()
}
