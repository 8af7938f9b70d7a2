//! # Undo/Redo Stack
//!
//! Snapshot history of document values.
//!
//! ## Design
//!
//! - Documents are immutable values whose sections are `Arc`-shared, so a
//!   snapshot is a shallow copy
//! - Recording a new snapshot clears the redo stack
//! - Undo swaps the current document for the latest snapshot and keeps the
//!   current one for redo
//! - Each entry carries the name of the command that replaced it

use sonasite_document::Document;

/// A document as it was before one edit
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub document: Document,

    /// Name of the command that replaced this document
    pub description: Option<String>,
}

/// Undo/redo stack for document editing
#[derive(Debug)]
pub struct UndoStack {
    /// Previous documents (most recent last)
    undo_stack: Vec<Snapshot>,

    /// Undone documents (most recent last)
    redo_stack: Vec<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record the document that is about to be replaced
    pub fn record(&mut self, previous: Document, description: Option<String>) {
        self.undo_stack.push(Snapshot {
            document: previous,
            description,
        });

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates future
        self.redo_stack.clear();
    }

    /// Step back. Returns the document to restore, keeping `current` for redo.
    pub fn undo(&mut self, current: &Document) -> Option<Document> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(Snapshot {
            document: current.clone(),
            description: snapshot.description.clone(),
        });
        Some(snapshot.document)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: &Document) -> Option<Document> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(Snapshot {
            document: current.clone(),
            description: snapshot.description.clone(),
        });
        Some(snapshot.document)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|snapshot| snapshot.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|snapshot| snapshot.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonasite_document::Theme;

    fn named(name: &str) -> Document {
        Document::new(name, "English", Theme::default())
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_undo_then_redo() {
        let mut stack = UndoStack::new();
        stack.record(named("a"), Some("setField".to_string()));

        let current = named("b");
        let restored = stack.undo(&current).unwrap();
        assert_eq!(restored.name, "a");
        assert_eq!(stack.redo_description(), Some("setField"));

        let again = stack.redo(&restored).unwrap();
        assert_eq!(again.name, "b");
        assert!(stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_record_clears_redo() {
        let mut stack = UndoStack::new();
        stack.record(named("a"), None);
        stack.undo(&named("b"));
        assert!(stack.can_redo());

        stack.record(named("a"), None);
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_max_levels() {
        let mut stack = UndoStack::with_max_levels(2);
        stack.record(named("a"), None);
        stack.record(named("b"), None);
        stack.record(named("c"), None);

        assert_eq!(stack.undo_levels(), 2);
        assert_eq!(stack.undo(&named("d")).unwrap().name, "c");
        assert_eq!(stack.undo(&named("c")).unwrap().name, "b");
        assert!(stack.undo(&named("b")).is_none());
    }
}
