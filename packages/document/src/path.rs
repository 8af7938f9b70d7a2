//! # Path Mutator
//!
//! Immutable "set value at dotted path" over a [`Node`] tree.
//!
//! ## Semantics
//!
//! - Segments are separated by `.`; an all-digit segment addresses a
//!   position in a sequence, anything else addresses a key in a mapping.
//!   An all-digit segment reaching a mapping addresses the key spelled
//!   exactly as written (`007` stays `007`).
//! - Only the containers on the path are copied. Siblings are shared with
//!   the input tree by `Arc`.
//! - Missing containers are created on the way down: a sequence when the
//!   segment addressing into it is integer-shaped, a mapping otherwise.
//!   A freshly created sequence accepts position 0 only.
//! - Existing sequences never grow through a path write; an index past the
//!   end is [`PathError::IndexOutOfRange`].

use crate::error::PathError;
use crate::node::Node;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// One step of a dotted path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// All-digit segment; `raw` is the text as written
    Index { index: usize, raw: String },
    Key(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = raw.parse() {
                return Segment::Index {
                    index,
                    raw: raw.to_string(),
                };
            }
        }
        Segment::Key(raw.to_string())
    }

    /// Text of the segment when it addresses a mapping
    pub fn as_key(&self) -> &str {
        match self {
            Segment::Index { raw, .. } => raw,
            Segment::Key(k) => k,
        }
    }
}

/// Parsed dotted path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }

        let segments = raw
            .split('.')
            .map(|s| {
                if s.is_empty() {
                    Err(PathError::EmptySegment(raw.to_string()))
                } else {
                    Ok(Segment::parse(s))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Return a new tree with `value` stored at `path`
pub fn set_at_path(root: &Node, path: &str, value: Node) -> Result<Node, PathError> {
    let path = Path::parse(path)?;
    set_segments(Some(root), path.segments(), value)
}

/// Read the node stored at `path`, if any
pub fn get_at_path<'a>(root: &'a Node, path: &str) -> Option<&'a Node> {
    let path = Path::parse(path).ok()?;
    get_segments(root, path.segments())
}

/// Segment-level write. `node` is `None` when the container does not exist yet.
pub fn set_segments(
    node: Option<&Node>,
    segments: &[Segment],
    value: Node,
) -> Result<Node, PathError> {
    let Some((head, rest)) = segments.split_first() else {
        return Ok(value);
    };

    match (node, head) {
        (Some(Node::List(items)), Segment::Index { index, .. }) => {
            let child = items.get(*index).ok_or(PathError::IndexOutOfRange {
                index: *index,
                len: items.len(),
            })?;
            let replaced = set_segments(Some(child), rest, value)?;
            let mut items = items.clone();
            items[*index] = Arc::new(replaced);
            Ok(Node::List(items))
        }

        (Some(Node::List(_)), Segment::Key(key)) => Err(PathError::KeyOnSequence {
            segment: key.clone(),
        }),

        // Integer-shaped keys on an existing mapping are plain keys
        (Some(Node::Map(entries)), segment) => {
            let key = segment.as_key().to_string();
            let replaced = set_segments(entries.get(&key).map(Arc::as_ref), rest, value)?;
            let mut entries = entries.clone();
            entries.insert(key, Arc::new(replaced));
            Ok(Node::Map(entries))
        }

        (None | Some(Node::Null), Segment::Index { index, .. }) => {
            if *index != 0 {
                return Err(PathError::IndexOutOfRange {
                    index: *index,
                    len: 0,
                });
            }
            let child = set_segments(None, rest, value)?;
            Ok(Node::list([child]))
        }

        (None | Some(Node::Null), Segment::Key(key)) => {
            let child = set_segments(None, rest, value)?;
            Ok(Node::map([(key.clone(), child)]))
        }

        (Some(_), segment) => Err(PathError::NotAContainer {
            segment: segment.to_string(),
        }),
    }
}

pub fn get_segments<'a>(node: &'a Node, segments: &[Segment]) -> Option<&'a Node> {
    segments.iter().try_fold(node, |current, segment| match (current, segment) {
        (Node::List(items), Segment::Index { index, .. }) => items.get(*index).map(Arc::as_ref),
        (Node::Map(entries), segment) => entries.get(segment.as_key()).map(Arc::as_ref),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> Node {
        Node::from(json!({
            "title": "Old",
            "items": [
                { "title": "A", "description": "first" },
                { "title": "B", "description": "second" }
            ],
            "ctaButton": { "text": "Go", "url": "#" }
        }))
    }

    #[test]
    fn test_parse_segments() {
        let path = Path::parse("content.items.1.title").unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("content".into()),
                Segment::Key("items".into()),
                Segment::Index {
                    index: 1,
                    raw: "1".into()
                },
                Segment::Key("title".into()),
            ]
        );
        assert_eq!(path.to_string(), "content.items.1.title");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(Path::parse(""), Err(PathError::Empty));
        assert!(matches!(Path::parse("a..b"), Err(PathError::EmptySegment(_))));
        assert!(matches!(Path::parse("a."), Err(PathError::EmptySegment(_))));
    }

    #[test]
    fn test_set_scalar_leaves_input_untouched() {
        let root = tree();
        let snapshot = root.clone();

        let updated = set_at_path(&root, "title", Node::from("New")).unwrap();

        assert_eq!(root, snapshot);
        assert_eq!(get_at_path(&updated, "title"), Some(&Node::from("New")));
    }

    #[test]
    fn test_set_shares_siblings() {
        let root = tree();
        let updated = set_at_path(&root, "items.0.title", Node::from("Z")).unwrap();

        let old_items = root.get("items").unwrap().as_list().unwrap();
        let new_items = updated.get("items").unwrap().as_list().unwrap();
        assert!(Arc::ptr_eq(&old_items[1], &new_items[1]));
        assert!(!Arc::ptr_eq(&old_items[0], &new_items[0]));

        let old_cta = &root.as_map().unwrap()["ctaButton"];
        let new_cta = &updated.as_map().unwrap()["ctaButton"];
        assert!(Arc::ptr_eq(old_cta, new_cta));
    }

    #[test]
    fn test_digit_key_on_map_keeps_spelling() {
        let root = Node::map([("007", Node::from("bond")), ("7", Node::from("seven"))]);
        let updated = set_at_path(&root, "007", Node::from("x")).unwrap();

        let keys: Vec<&String> = updated.as_map().unwrap().keys().collect();
        assert_eq!(keys.len(), 2);
        assert_eq!(get_at_path(&updated, "007"), Some(&Node::from("x")));
        assert_eq!(get_at_path(&updated, "7"), Some(&Node::from("seven")));
        assert_eq!(Path::parse("items.01").unwrap().to_string(), "items.01");
    }

    #[test]
    fn test_auto_vivifies_map_and_list() {
        let root = Node::empty_map();
        let updated = set_at_path(&root, "navLinks.0.name", Node::from("Home")).unwrap();

        assert_eq!(
            updated.to_value(),
            json!({ "navLinks": [{ "name": "Home" }] })
        );
    }

    #[test]
    fn test_vivified_list_only_accepts_first_position() {
        let root = Node::empty_map();
        let err = set_at_path(&root, "images.2", Node::from("x.jpg")).unwrap_err();
        assert_eq!(err, PathError::IndexOutOfRange { index: 2, len: 0 });
    }

    #[test]
    fn test_index_past_end_is_invalid() {
        let root = tree();
        let err = set_at_path(&root, "items.2.title", Node::from("C")).unwrap_err();
        assert_eq!(err, PathError::IndexOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn test_descend_through_scalar_is_invalid() {
        let root = tree();
        let err = set_at_path(&root, "title.inner", Node::from("x")).unwrap_err();
        assert!(matches!(err, PathError::NotAContainer { .. }));
    }

    #[test]
    fn test_key_on_sequence_is_invalid() {
        let root = tree();
        let err = set_at_path(&root, "items.first", Node::from("x")).unwrap_err();
        assert!(matches!(err, PathError::KeyOnSequence { .. }));
    }

    #[test]
    fn test_null_is_treated_as_absent() {
        let root = Node::from(json!({ "ctaButton": null }));
        let updated = set_at_path(&root, "ctaButton.text", Node::from("Book")).unwrap();
        assert_eq!(updated.to_value(), json!({ "ctaButton": { "text": "Book" } }));
    }

    #[test]
    fn test_set_is_idempotent() {
        let root = tree();
        let once = set_at_path(&root, "items.1.price", Node::from("$5")).unwrap();
        let twice = set_at_path(&once, "items.1.price", Node::from("$5")).unwrap();
        let again = set_at_path(&root, "items.1.price", Node::from("$5")).unwrap();

        assert_eq!(once, twice);
        assert_eq!(once, again);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let root = tree();
        assert!(get_at_path(&root, "items.5").is_none());
        assert!(get_at_path(&root, "title.x").is_none());
        assert!(get_at_path(&root, "").is_none());
    }
}
