//! # Edit Commands
//!
//! Serializable, intent-preserving description of every user action the
//! session understands.
//!
//! ## Command Semantics
//!
//! ### SetField
//! - Generic dotted-path write, atomic replacement of the addressed value
//! - Fails with `InvalidPath` without changing the document
//!
//! ### AddSection / RemoveSection / MoveSection
//! - Structural; header and footer are pinned
//! - Rejected structural edits are silent no-ops
//!
//! ### AddListItem / RemoveListItem
//! - Operate on `content.items` of the section with the given id
//!
//! ### SelectSection
//! - Focus change only, never touches the document

use serde::{Deserialize, Serialize};
use sonasite_document::{Node, SectionId, SectionKind};
use std::fmt;
use std::str::FromStr;

/// Direction of an adjacent swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(format!("Unknown direction: {} (expected up or down)", other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}

/// User-level editing command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditCommand {
    /// Set the value at a dotted path
    SetField { path: String, value: Node },

    /// Add a section of `kind` before the footer
    AddSection { kind: SectionKind },

    /// Remove a section by id
    RemoveSection { id: SectionId },

    /// Swap the section at `index` with its neighbour
    MoveSection { index: usize, direction: Direction },

    /// Append the placeholder item to `content.items`
    #[serde(rename_all = "camelCase")]
    AddListItem { section_id: SectionId },

    /// Remove `content.items[item_index]`
    #[serde(rename_all = "camelCase")]
    RemoveListItem {
        section_id: SectionId,
        item_index: usize,
    },

    /// Focus a section, or clear focus with `None`
    SelectSection { id: Option<SectionId> },
}

impl EditCommand {
    /// Debug name for logging
    pub fn name(&self) -> &'static str {
        match self {
            EditCommand::SetField { .. } => "setField",
            EditCommand::AddSection { .. } => "addSection",
            EditCommand::RemoveSection { .. } => "removeSection",
            EditCommand::MoveSection { .. } => "moveSection",
            EditCommand::AddListItem { .. } => "addListItem",
            EditCommand::RemoveListItem { .. } => "removeListItem",
            EditCommand::SelectSection { .. } => "selectSection",
        }
    }

    /// Whether applying this command can replace the document
    pub fn is_document_edit(&self) -> bool {
        !matches!(self, EditCommand::SelectSection { .. })
    }
}
