//! # Sonasite Editor
//!
//! Editing engine for generated site documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ content provider: business info → Document  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session lifecycle + edits           │
//! │  - Load (normalize frame, reset history)    │
//! │  - Field edits via dotted paths             │
//! │  - Section add/remove/move, list items      │
//! │  - Undo/redo over document snapshots        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: re-reads the current Document     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Documents are values**: every edit yields a new `Document`
//! 2. **Identity is by id**: positions are resolved at call time only
//! 3. **The frame is pinned**: header first, footer last, always
//! 4. **Rejections are quiet**: structural violations are no-ops
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sonasite_editor::{Direction, EditSession};
//! use sonasite_document::{Node, SectionKind};
//!
//! let mut session = EditSession::new();
//! session.load(document);
//!
//! session.edit_field("theme.primaryColor", Node::from("#112233"))?;
//! let id = session.add_section(SectionKind::Gallery);
//! session.move_section(2, Direction::Up);
//!
//! for event in session.drain_events() {
//!     // re-render
//! }
//! ```

mod errors;
mod mutations;
pub mod sections;
mod session;
pub mod theme;
mod undo_stack;

pub use errors::EditorError;
pub use mutations::{Direction, EditCommand};
pub use sections::{add_list_item, add_section, move_section, remove_list_item, remove_section};
pub use session::{EditSession, SessionEvent};
pub use theme::{contrast_color, relative_luminance, safe_accent_text_color, ThemeColors};
pub use undo_stack::{Snapshot, UndoStack};

// Re-export document types for convenience
pub use sonasite_document::{
    Document, IdGenerator, Node, PathError, Section, SectionId, SectionKind, Theme,
};
