//! # Edit Session Management
//!
//! Tracks the editing state of a single user: the current document,
//! the focused section and panel visibility.
//!
//! ## States
//!
//! ```text
//! Empty { generating } ──load──▶ Editing ──(edits)──▶ Editing
//! ```
//!
//! Every edit replaces the current document with a new value; the previous
//! value goes to the undo stack. Calling an editing operation while `Empty`
//! is a contract violation and panics.

use crate::mutations::{Direction, EditCommand};
use crate::sections;
use crate::theme::ThemeColors;
use crate::undo_stack::UndoStack;
use crate::EditorError;
use serde::Serialize;
use sonasite_document::{Document, IdGenerator, Node, Section, SectionId, SectionKind};
use tracing::{debug, info, warn};

const NOT_LOADED: &str = "editing operation called before a document was loaded";

/// Notification for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    /// The current document was replaced
    DocumentChanged { version: u64 },

    /// The theme differs from the previous document's
    ThemeChanged { colors: ThemeColors },

    /// Focus moved to a section, or was cleared
    SelectionChanged { id: Option<SectionId> },
}

#[derive(Debug)]
enum SessionState {
    /// No document yet; `generating` while the content provider runs
    Empty { generating: bool },
    Editing(Editing),
}

#[derive(Debug)]
struct Editing {
    document: Document,
    selected: Option<SectionId>,
    version: u64,
}

/// Single-user edit session
#[derive(Debug)]
pub struct EditSession {
    state: SessionState,
    panel_open: bool,
    ids: IdGenerator,
    history: UndoStack,
    events: Vec<SessionEvent>,
}

impl EditSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::with_ids(IdGenerator::new())
    }

    /// Create an empty session drawing section ids from `ids`
    pub fn with_ids(ids: IdGenerator) -> Self {
        Self {
            state: SessionState::Empty { generating: false },
            panel_open: true,
            ids,
            history: UndoStack::new(),
            events: Vec::new(),
        }
    }

    /// Bound the undo history (0 = unlimited)
    pub fn with_history_limit(mut self, levels: usize) -> Self {
        self.history = UndoStack::with_max_levels(levels);
        self
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, SessionState::Editing(_))
    }

    /// True between `begin_generation` and `load`
    pub fn is_generating(&self) -> bool {
        matches!(self.state, SessionState::Empty { generating: true })
    }

    /// Mark that the content provider has been asked for a document
    pub fn begin_generation(&mut self) {
        if let SessionState::Empty { generating } = &mut self.state {
            *generating = true;
        }
    }

    /// Install a document and start editing.
    ///
    /// The document is normalized first (header first, footer last,
    /// unique ids). Loading over an existing document starts afresh.
    pub fn load(&mut self, document: Document) {
        let document = document.normalized(&mut self.ids);
        info!(
            name = %document.name,
            sections = document.sections.len(),
            "Loaded document"
        );

        self.history.clear();
        self.events.push(SessionEvent::DocumentChanged { version: 0 });
        self.events.push(SessionEvent::ThemeChanged {
            colors: ThemeColors::derive(&document.theme),
        });
        self.state = SessionState::Editing(Editing {
            document,
            selected: None,
            version: 0,
        });
    }

    /// Parse a JSON document and load it
    pub fn load_json(&mut self, text: &str) -> Result<(), EditorError> {
        let document: Document = serde_json::from_str(text)?;
        self.load(document);
        Ok(())
    }

    /// Current document
    pub fn document(&self) -> &Document {
        &self.editing().document
    }

    /// Current document as JSON text
    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self.document())?)
    }

    /// Number of document replacements since `load`
    pub fn version(&self) -> u64 {
        self.editing().version
    }

    pub fn selected_id(&self) -> Option<&SectionId> {
        self.editing().selected.as_ref()
    }

    pub fn selected_section(&self) -> Option<&Section> {
        let editing = self.editing();
        let id = editing.selected.as_ref()?;
        editing.document.section(id.as_str())
    }

    /// Colors derived from the current theme
    pub fn theme_colors(&self) -> ThemeColors {
        ThemeColors::derive(&self.document().theme)
    }

    /// Apply the path mutator to the current document
    pub fn edit_field(&mut self, path: &str, value: Node) -> Result<(), EditorError> {
        let next = match self.document().set_at_path(path, value) {
            Ok(next) => next,
            Err(e) => {
                warn!(path, error = %e, "Rejected field edit");
                return Err(e.into());
            }
        };
        debug!(path, "Field edited");
        self.replace(next, "setField");
        Ok(())
    }

    /// Focus a section. Unknown ids clear the selection.
    pub fn select_section(&mut self, id: Option<&str>) {
        let editing = self.editing_mut();
        let selected = id
            .filter(|id| editing.document.contains(id))
            .map(SectionId::from);

        if editing.selected != selected {
            editing.selected = selected.clone();
            self.events.push(SessionEvent::SelectionChanged { id: selected });
        }
    }

    /// Add a section before the footer. Returns the new id when added.
    pub fn add_section(&mut self, kind: SectionKind) -> Option<SectionId> {
        let next = sections::try_add_section(&loaded(&self.state).document, kind, &mut self.ids)?;
        // Inserted right before the footer, so it is the last of its kind
        let id = next
            .sections
            .iter()
            .rev()
            .find(|s| s.kind() == kind)?
            .id()
            .clone();
        self.replace(next, "addSection");
        Some(id)
    }

    /// Remove a section; clears the selection if it was selected
    pub fn remove_section(&mut self, id: &str) -> bool {
        match sections::try_remove_section(self.document(), id) {
            Some(next) => {
                self.replace(next, "removeSection");
                true
            }
            None => false,
        }
    }

    pub fn move_section(&mut self, index: usize, direction: Direction) -> bool {
        match sections::try_move_section(self.document(), index, direction) {
            Some(next) => {
                self.replace(next, "moveSection");
                true
            }
            None => false,
        }
    }

    pub fn add_list_item(&mut self, section_id: &str) -> bool {
        match sections::try_add_list_item(self.document(), section_id) {
            Some(next) => {
                self.replace(next, "addListItem");
                true
            }
            None => false,
        }
    }

    pub fn remove_list_item(&mut self, section_id: &str, item_index: usize) -> bool {
        match sections::try_remove_list_item(self.document(), section_id, item_index) {
            Some(next) => {
                self.replace(next, "removeListItem");
                true
            }
            None => false,
        }
    }

    /// Apply a serialized command
    pub fn apply(&mut self, command: EditCommand) -> Result<(), EditorError> {
        debug!(command = command.name(), "Applying command");
        match command {
            EditCommand::SetField { path, value } => return self.edit_field(&path, value),
            EditCommand::AddSection { kind } => {
                self.add_section(kind);
            }
            EditCommand::RemoveSection { id } => {
                self.remove_section(id.as_str());
            }
            EditCommand::MoveSection { index, direction } => {
                self.move_section(index, direction);
            }
            EditCommand::AddListItem { section_id } => {
                self.add_list_item(section_id.as_str());
            }
            EditCommand::RemoveListItem {
                section_id,
                item_index,
            } => {
                self.remove_list_item(section_id.as_str(), item_index);
            }
            EditCommand::SelectSection { id } => {
                self.select_section(id.as_ref().map(SectionId::as_str));
            }
        }
        Ok(())
    }

    /// Restore the previous document. Returns false when there is none.
    pub fn undo(&mut self) -> bool {
        let restored = self.history.undo(&loaded(&self.state).document);
        self.restore(restored, "Undo")
    }

    /// Re-apply an undone edit. Returns false when there is none.
    pub fn redo(&mut self) -> bool {
        let restored = self.history.redo(&loaded(&self.state).document);
        self.restore(restored, "Redo")
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn open_panel(&mut self) {
        self.panel_open = true;
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    /// Take pending notifications
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    fn editing(&self) -> &Editing {
        loaded(&self.state)
    }

    fn editing_mut(&mut self) -> &mut Editing {
        loaded_mut(&mut self.state)
    }

    /// Swap in `next`, keeping the previous document for undo
    fn replace(&mut self, next: Document, description: &str) {
        let editing = self.editing_mut();
        let previous = std::mem::replace(&mut editing.document, next);
        self.history.record(previous.clone(), Some(description.to_string()));
        self.after_change(&previous);
    }

    fn restore(&mut self, restored: Option<Document>, action: &str) -> bool {
        let Some(restored) = restored else {
            return false;
        };
        let editing = self.editing_mut();
        let previous = std::mem::replace(&mut editing.document, restored);
        debug!(action, "History step");
        self.after_change(&previous);
        true
    }

    /// Bump the version and publish events for the new current document
    fn after_change(&mut self, previous: &Document) {
        let editing = loaded_mut(&mut self.state);
        editing.version += 1;
        self.events.push(SessionEvent::DocumentChanged {
            version: editing.version,
        });

        if previous.theme != editing.document.theme {
            self.events.push(SessionEvent::ThemeChanged {
                colors: ThemeColors::derive(&editing.document.theme),
            });
        }

        let stale = editing
            .selected
            .as_ref()
            .is_some_and(|id| !editing.document.contains(id.as_str()));
        if stale {
            editing.selected = None;
            self.events.push(SessionEvent::SelectionChanged { id: None });
        }
    }
}

fn loaded(state: &SessionState) -> &Editing {
    match state {
        SessionState::Editing(editing) => editing,
        SessionState::Empty { .. } => panic!("EditSession: {}", NOT_LOADED),
    }
}

fn loaded_mut(state: &mut SessionState) -> &mut Editing {
    match state {
        SessionState::Editing(editing) => editing,
        SessionState::Empty { .. } => panic!("EditSession: {}", NOT_LOADED),
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonasite_document::Theme;

    fn framed() -> Document {
        Document::new("Shop", "English", Theme::default()).with_sections([
            Section::new("header".into(), SectionKind::Header, Node::empty_map()),
            Section::new("hero".into(), SectionKind::Hero, Node::empty_map()),
            Section::new("footer".into(), SectionKind::Footer, Node::empty_map()),
        ])
    }

    #[test]
    fn test_session_creation() {
        let session = EditSession::new();
        assert!(!session.is_editing());
        assert!(!session.is_generating());
        assert!(session.is_panel_open());
    }

    #[test]
    fn test_generation_then_load() {
        let mut session = EditSession::new();
        session.begin_generation();
        assert!(session.is_generating());

        session.load(framed());
        assert!(session.is_editing());
        assert!(!session.is_generating());
        assert_eq!(session.version(), 0);
    }

    #[test]
    #[should_panic(expected = "before a document was loaded")]
    fn test_edit_before_load_panics() {
        let mut session = EditSession::new();
        let _ = session.edit_field("name", Node::from("x"));
    }

    #[test]
    fn test_select_unknown_id_clears() {
        let mut session = EditSession::new();
        session.load(framed());

        session.select_section(Some("hero"));
        assert_eq!(session.selected_id().map(SectionId::as_str), Some("hero"));

        session.select_section(Some("missing"));
        assert!(session.selected_id().is_none());
    }

    #[test]
    fn test_theme_change_event() {
        let mut session = EditSession::new();
        session.load(framed());
        session.drain_events();

        session
            .edit_field("theme.primaryColor", Node::from("#ffffff"))
            .unwrap();

        let events = session.drain_events();
        assert_eq!(events[0], SessionEvent::DocumentChanged { version: 1 });
        match &events[1] {
            SessionEvent::ThemeChanged { colors } => {
                assert_eq!(colors.primary_contrast, "#000000");
                assert_eq!(colors.safe_accent_text, "#4c1d95");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_rejected_edit_keeps_version() {
        let mut session = EditSession::new();
        session.load(framed());

        assert!(session.edit_field("sections.9.content.title", Node::from("x")).is_err());
        assert!(!session.remove_section("header"));
        assert_eq!(session.version(), 0);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_panel_visibility() {
        let mut session = EditSession::new();
        session.close_panel();
        assert!(!session.is_panel_open());
        session.toggle_panel();
        assert!(session.is_panel_open());
    }
}
