//! Edit-session state machine for sticky note text.

use crate::host::StickyPatch;
use crate::sticky::{ShapeId, StickyNote};

/// The two visual states of a sticky note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    /// Normal display state.
    #[default]
    Viewing,
    /// An editable text surface is active for the note.
    Editing,
}

/// In-place text editing for a single sticky note.
///
/// Only `commit` persists anything: it trims the buffer and produces
/// the patch for the host. `cancel` reverts the buffer to the last
/// committed text without touching the host. Invalid transitions are
/// inert rather than panicking.
#[derive(Debug, Clone)]
pub struct EditSession {
    shape: ShapeId,
    committed: String,
    buffer: String,
    state: EditState,
}

impl EditSession {
    /// Open a session for a note, in the `Viewing` state.
    pub fn new(note: &StickyNote) -> Self {
        Self {
            shape: note.id(),
            committed: note.text.clone(),
            buffer: note.text.clone(),
            state: EditState::Viewing,
        }
    }

    /// The note this session edits.
    pub fn shape(&self) -> ShapeId {
        self.shape
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state == EditState::Editing
    }

    /// `Viewing -> Editing`. Returns true when the transition happened;
    /// the caller must then focus the text surface and select its full
    /// content.
    pub fn begin(&mut self) -> bool {
        if self.state == EditState::Editing {
            return false;
        }
        self.buffer = self.committed.clone();
        self.state = EditState::Editing;
        true
    }

    /// The in-progress edit buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Mutable access to the edit buffer for the text surface.
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    /// `Editing -> Viewing`, persisting the trimmed buffer. This is
    /// the only transition that produces a host update; returns the
    /// patch to apply, or None when the session was not editing.
    pub fn commit(&mut self) -> Option<(ShapeId, StickyPatch)> {
        if self.state != EditState::Editing {
            return None;
        }
        let text = self.buffer.trim().to_string();
        self.committed = text.clone();
        self.buffer = text.clone();
        self.state = EditState::Viewing;
        Some((self.shape, StickyPatch::text(text)))
    }

    /// `Editing -> Viewing`, discarding the buffer. No host update.
    pub fn cancel(&mut self) {
        if self.state == EditState::Editing {
            self.buffer = self.committed.clone();
            self.state = EditState::Viewing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sticky::StickyType;
    use kurbo::Point;

    fn session() -> EditSession {
        let note = StickyNote::new(StickyType::Event, Point::ZERO).with_text("Order Placed");
        EditSession::new(&note)
    }

    #[test]
    fn test_starts_viewing() {
        let session = session();
        assert_eq!(session.state(), EditState::Viewing);
        assert!(!session.is_editing());
    }

    #[test]
    fn test_commit_trims_and_patches() {
        let mut session = session();
        assert!(session.begin());
        *session.buffer_mut() = "  Order Placed  ".to_string();

        let (id, patch) = session.commit().unwrap();
        assert_eq!(id, session.shape());
        assert_eq!(patch.text.as_deref(), Some("Order Placed"));
        assert_eq!(session.state(), EditState::Viewing);
        assert_eq!(session.buffer(), "Order Placed");
    }

    #[test]
    fn test_cancel_reverts_buffer() {
        let mut session = session();
        session.begin();
        *session.buffer_mut() = "Payment Received".to_string();

        session.cancel();
        assert_eq!(session.state(), EditState::Viewing);
        assert_eq!(session.buffer(), "Order Placed");
    }

    #[test]
    fn test_commit_without_editing_is_inert() {
        let mut session = session();
        assert!(session.commit().is_none());
        assert_eq!(session.state(), EditState::Viewing);
    }

    #[test]
    fn test_begin_twice_is_inert() {
        let mut session = session();
        assert!(session.begin());
        *session.buffer_mut() = "half-typed".to_string();
        // A second activation gesture must not clobber the buffer.
        assert!(!session.begin());
        assert_eq!(session.buffer(), "half-typed");
    }

    #[test]
    fn test_cancel_while_viewing_is_inert() {
        let mut session = session();
        session.cancel();
        assert_eq!(session.buffer(), "Order Placed");
        assert_eq!(session.state(), EditState::Viewing);
    }
}
