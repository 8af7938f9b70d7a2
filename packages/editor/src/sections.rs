//! # Section Collection Operations
//!
//! Structural edits on the section list and on `content.items`.
//!
//! ## Semantics
//!
//! Every operation takes a document and returns a new one; the input is
//! never modified. Sections not touched by an operation are shared by `Arc`.
//!
//! ### Frame
//! - Header and footer are pinned: they cannot be added, removed or moved,
//!   and no section can be moved across them.
//! - Rejected structural edits are no-ops, not errors.
//!
//! ### Identity
//! - New sections get a fresh id from the caller's [`IdGenerator`].
//! - Lookups are by id; positions are resolved at call time only.
//!
//! The `try_*` variants return `None` for a no-op so callers can tell a
//! rejected edit from an applied one.

use crate::mutations::Direction;
use serde::Serialize;
use sonasite_document::{Document, IdGenerator, Item, Node, Section, SectionKind};
use std::sync::Arc;
use tracing::{debug, warn};

const ITEMS_KEY: &str = "items";

/// Append a new `kind` section immediately before the footer
pub fn add_section(doc: &Document, kind: SectionKind, ids: &mut IdGenerator) -> Document {
    try_add_section(doc, kind, ids).unwrap_or_else(|| doc.clone())
}

pub fn try_add_section(
    doc: &Document,
    kind: SectionKind,
    ids: &mut IdGenerator,
) -> Option<Document> {
    if !kind.is_movable() {
        warn!(kind = %kind, "Rejected adding a frame section");
        return None;
    }

    let id = ids.fresh_for(kind, doc);
    let section = Section::new(id, kind, kind.default_content());
    debug!(section_id = %section.id(), kind = %kind, "Adding section");

    let at = footer_position(doc).unwrap_or(doc.sections.len());
    let mut sections = doc.sections.clone();
    sections.insert(at, Arc::new(section));

    Some(Document {
        sections,
        ..doc.clone()
    })
}

/// Remove the section with `id`. Header, footer and unknown ids are no-ops.
pub fn remove_section(doc: &Document, id: &str) -> Document {
    try_remove_section(doc, id).unwrap_or_else(|| doc.clone())
}

pub fn try_remove_section(doc: &Document, id: &str) -> Option<Document> {
    let index = doc.position(id)?;
    let kind = doc.sections[index].kind();

    if !kind.is_movable() {
        warn!(section_id = id, kind = %kind, "Rejected removing a frame section");
        return None;
    }

    let mut sections = doc.sections.clone();
    sections.remove(index);
    debug!(section_id = id, index, "Removed section");

    Some(Document {
        sections,
        ..doc.clone()
    })
}

/// Swap the section at `index` with its neighbour in `direction`
pub fn move_section(doc: &Document, index: usize, direction: Direction) -> Document {
    try_move_section(doc, index, direction).unwrap_or_else(|| doc.clone())
}

pub fn try_move_section(doc: &Document, index: usize, direction: Direction) -> Option<Document> {
    let target = match direction {
        Direction::Up => index.checked_sub(1)?,
        Direction::Down => index.checked_add(1)?,
    };

    let current = doc.sections.get(index)?;
    let neighbour = doc.sections.get(target)?;

    // Crossing or displacing the header/footer is never allowed
    if !current.kind().is_movable() || !neighbour.kind().is_movable() {
        warn!(index, direction = ?direction, "Rejected move across the page frame");
        return None;
    }

    let mut sections = doc.sections.clone();
    sections.swap(index, target);
    debug!(section_id = %current.id(), from = index, to = target, "Moved section");

    Some(Document {
        sections,
        ..doc.clone()
    })
}

/// Append the placeholder item to the section's `content.items`
pub fn add_list_item(doc: &Document, section_id: &str) -> Document {
    try_add_list_item(doc, section_id).unwrap_or_else(|| doc.clone())
}

pub fn try_add_list_item(doc: &Document, section_id: &str) -> Option<Document> {
    let index = doc.position(section_id)?;
    let section = &doc.sections[index];
    let item = Arc::new(to_node(&Item::placeholder()));

    let items = match section.content().get(ITEMS_KEY) {
        None | Some(Node::Null) => vec![item],
        Some(Node::List(existing)) => {
            let mut items = existing.clone();
            items.push(item);
            items
        }
        Some(_) => {
            warn!(section_id, "content.items is not a sequence; leaving it untouched");
            return None;
        }
    };

    let content = with_items(section.content(), items)?;
    debug!(section_id, "Added list item");
    Some(replace_section(doc, index, section.with_content(content)))
}

/// Remove `content.items[item_index]`. Out-of-range indices are no-ops.
pub fn remove_list_item(doc: &Document, section_id: &str, item_index: usize) -> Document {
    try_remove_list_item(doc, section_id, item_index).unwrap_or_else(|| doc.clone())
}

pub fn try_remove_list_item(
    doc: &Document,
    section_id: &str,
    item_index: usize,
) -> Option<Document> {
    let index = doc.position(section_id)?;
    let section = &doc.sections[index];

    let existing = section.content().get(ITEMS_KEY)?.as_list()?;
    if item_index >= existing.len() {
        return None;
    }

    let mut items = existing.to_vec();
    items.remove(item_index);

    let content = with_items(section.content(), items)?;
    debug!(section_id, item_index, "Removed list item");
    Some(replace_section(doc, index, section.with_content(content)))
}

fn footer_position(doc: &Document) -> Option<usize> {
    doc.sections
        .iter()
        .rposition(|s| s.kind() == SectionKind::Footer)
}

fn replace_section(doc: &Document, index: usize, section: Section) -> Document {
    let mut sections = doc.sections.clone();
    sections[index] = Arc::new(section);
    Document {
        sections,
        ..doc.clone()
    }
}

fn with_items(content: &Node, items: Vec<Arc<Node>>) -> Option<Node> {
    match content {
        Node::Map(entries) => {
            let mut entries = entries.clone();
            entries.insert(ITEMS_KEY.to_string(), Arc::new(Node::List(items)));
            Some(Node::Map(entries))
        }
        Node::Null => Some(Node::map([(ITEMS_KEY, Node::List(items))])),
        _ => None,
    }
}

// Records of strings always serialize
fn to_node<T: Serialize>(value: &T) -> Node {
    Node::from_typed(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonasite_document::Theme;

    fn doc(kinds: &[SectionKind]) -> Document {
        Document::new("Shop", "English", Theme::default()).with_sections(
            kinds
                .iter()
                .enumerate()
                .map(|(i, k)| Section::new(format!("{}-{}", k, i).into(), *k, Node::empty_map())),
        )
    }

    #[test]
    fn test_add_inserts_before_footer() {
        let d = doc(&[SectionKind::Header, SectionKind::Hero, SectionKind::Footer]);
        let mut ids = IdGenerator::with_clock(|| 42);
        let out = add_section(&d, SectionKind::About, &mut ids);

        assert_eq!(
            out.kinds(),
            vec![
                SectionKind::Header,
                SectionKind::Hero,
                SectionKind::About,
                SectionKind::Footer
            ]
        );
        assert_eq!(out.sections[2].id().as_str(), "about-42");
        assert_eq!(d.sections.len(), 3);
    }

    #[test]
    fn test_add_frame_kind_is_rejected() {
        let d = doc(&[SectionKind::Header, SectionKind::Footer]);
        let mut ids = IdGenerator::with_clock(|| 1);
        assert!(try_add_section(&d, SectionKind::Header, &mut ids).is_none());
        assert_eq!(add_section(&d, SectionKind::Footer, &mut ids), d);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let d = doc(&[SectionKind::Header, SectionKind::Footer]);
        assert!(try_remove_section(&d, "nope").is_none());
    }

    #[test]
    fn test_move_out_of_range_is_noop() {
        let d = doc(&[SectionKind::Header, SectionKind::Hero, SectionKind::Footer]);
        assert!(try_move_section(&d, 0, Direction::Up).is_none());
        assert!(try_move_section(&d, 9, Direction::Down).is_none());
        assert!(try_move_section(&d, 2, Direction::Down).is_none());
    }

    #[test]
    fn test_move_shares_untouched_sections() {
        let d = doc(&[
            SectionKind::Header,
            SectionKind::Hero,
            SectionKind::About,
            SectionKind::Footer,
        ]);
        let out = move_section(&d, 1, Direction::Down);

        assert!(Arc::ptr_eq(&d.sections[0], &out.sections[0]));
        assert!(Arc::ptr_eq(&d.sections[1], &out.sections[2]));
        assert!(Arc::ptr_eq(&d.sections[3], &out.sections[3]));
    }

    #[test]
    fn test_items_that_are_not_a_list_are_left_alone() {
        let d = doc(&[SectionKind::Header, SectionKind::Services, SectionKind::Footer]);
        let d = d
            .set_at_path("sections.1.content.items", Node::from("oops"))
            .unwrap();
        assert!(try_add_list_item(&d, "services-1").is_none());
    }

    #[test]
    fn test_remove_item_without_items_is_noop() {
        let d = doc(&[SectionKind::Header, SectionKind::Services, SectionKind::Footer]);
        assert!(try_remove_list_item(&d, "services-1", 0).is_none());
    }
}
