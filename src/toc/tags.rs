//! Trailing tag annotations on header text
//!
//!     Org headers may end with a tag list such as `Title   :work:urgent:`. The annotation is a
//!     whitespace run followed by colon-delimited names, anchored at the end of the text.
//!
//!     Trimming policy: the whitespace run that introduces the annotation belongs to the match and
//!     is removed together with it. Nothing else is trimmed, so leading or inner whitespace of the
//!     title survives untouched. Tag names are kept verbatim; empty or blank segments are dropped.

use once_cell::sync::Lazy;
use std::ops::Range;

use regex::Regex;

static TAG_ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+:(?:[\w\-\s]+:?)+:$").unwrap());

/// Header text split into its title and trailing tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<'a> {
    pub title: &'a str,
    pub tags: Vec<String>,
}

impl Extracted<'_> {
    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }
}

/// Byte range of the trailing tag annotation in `text`, including its leading whitespace.
pub fn find_annotation(text: &str) -> Option<Range<usize>> {
    TAG_ANNOTATION.find(text).map(|m| m.range())
}

/// Split a matched annotation (`"  :a:b:"`) into its tag names.
pub fn split_tags(annotation: &str) -> Vec<String> {
    annotation
        .split(':')
        .filter(|segment| !segment.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip a trailing tag annotation from `text`.
///
/// Text without an annotation comes back whole with no tags.
pub fn extract_tags(text: &str) -> Extracted<'_> {
    match find_annotation(text) {
        Some(range) => Extracted {
            title: &text[..range.start],
            tags: split_tags(&text[range]),
        },
        None => Extracted {
            title: text,
            tags: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_annotation_and_its_whitespace() {
        let extracted = extract_tags("Header with Tag   :tag1:tag2:");
        assert_eq!(extracted.title, "Header with Tag");
        assert_eq!(extracted.tags, vec!["tag1", "tag2"]);
    }

    #[test]
    fn single_tag() {
        let extracted = extract_tags("D :x:");
        assert_eq!(extracted.title, "D");
        assert_eq!(extracted.tags, vec!["x"]);
    }

    #[test]
    fn requires_leading_whitespace() {
        let extracted = extract_tags("Header:tag:");
        assert_eq!(extracted.title, "Header:tag:");
        assert!(!extracted.has_tags());
    }

    #[test]
    fn requires_closing_colon_at_end() {
        assert!(find_annotation("Title :tag").is_none());
        assert!(find_annotation("Title :tag: trailing").is_none());
    }

    #[test]
    fn leading_whitespace_of_title_is_kept() {
        let extracted = extract_tags("  Indented :a:");
        assert_eq!(extracted.title, "  Indented");
    }

    #[test]
    fn hyphenated_tags() {
        let extracted = extract_tags("Plan :long-term:q3_goal:");
        assert_eq!(extracted.tags, vec!["long-term", "q3_goal"]);
    }

    #[test]
    fn blank_segments_are_dropped() {
        assert_eq!(split_tags("   :a::b:"), vec!["a", "b"]);
    }

    #[test]
    fn plain_text_has_no_tags() {
        let extracted = extract_tags("Just a title");
        assert_eq!(extracted.title, "Just a title");
        assert!(extracted.tags.is_empty());
    }
}
