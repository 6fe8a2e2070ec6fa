//! Board document and runtime state.

use std::collections::HashMap;

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Camera;
use crate::host::{Host, HostError, PositionUpdate, StickyPatch, ViewportInfo};
use crate::sticky::{ShapeId, StickyNote};

/// A board document containing all sticky shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDocument {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    /// All shapes in the document, keyed by ID.
    pub shapes: HashMap<ShapeId, StickyNote>,
    /// Z-order of shapes (back to front).
    pub z_order: Vec<ShapeId>,
    /// Bumped once per user-sourced change; an atomic position batch
    /// counts as a single change.
    #[serde(default)]
    pub revision: u64,
}

impl Default for BoardDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            shapes: HashMap::new(),
            z_order: Vec::new(),
            revision: 0,
        }
    }

    /// Add a shape to the document.
    pub fn add_shape(&mut self, note: StickyNote) {
        let id = note.id();
        self.z_order.push(id);
        self.shapes.insert(id, note);
    }

    /// Remove a shape from the document.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<StickyNote> {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&StickyNote> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut StickyNote> {
        self.shapes.get_mut(&id)
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &StickyNote> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Get the bounding box of all shapes.
    pub fn bounds(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for note in self.shapes.values() {
            let bounds = note.bounds();
            result = Some(match result {
                Some(r) => r.union(bounds),
                None => bounds,
            });
        }
        result
    }

    /// Find the topmost shape at a point (in board coordinates).
    pub fn topmost_at(&self, point: Point) -> Option<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .find(|&&id| {
                self.shapes
                    .get(&id)
                    .is_some_and(|note| note.bounds().contains(point))
            })
            .copied()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Runtime board state (not persisted).
///
/// The in-process host implementation: owns the document, camera,
/// selection and viewport, and services the [`Host`] surface the
/// layout and creation paths drive.
#[derive(Debug, Clone)]
pub struct Board {
    /// The document being edited.
    pub document: BoardDocument,
    /// Camera for the view transform.
    pub camera: Camera,
    /// Currently selected shape IDs.
    pub selection: Vec<ShapeId>,
    /// Viewport size in screen pixels.
    pub viewport_size: Size,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new board with an empty document.
    pub fn new() -> Self {
        Self::with_document(BoardDocument::new())
    }

    /// Create a board with an existing document.
    pub fn with_document(document: BoardDocument) -> Self {
        Self {
            document,
            camera: Camera::new(),
            selection: Vec::new(),
            viewport_size: Size::new(0.0, 0.0),
        }
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width, height);
    }

    /// Check if a shape is selected.
    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection.contains(&id)
    }

    /// Clear selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Delete selected shapes. Returns the number removed.
    pub fn delete_selected(&mut self) -> usize {
        let ids: Vec<ShapeId> = self.selection.drain(..).collect();
        let mut removed = 0;
        for id in ids {
            if self.document.remove_shape(id).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            self.document.revision += 1;
        }
        removed
    }
}

impl Host for Board {
    fn sticky_shapes(&self) -> Vec<StickyNote> {
        self.document.shapes_ordered().cloned().collect()
    }

    fn create_sticky(&mut self, note: StickyNote) -> Result<ShapeId, HostError> {
        let id = note.id();
        if self.document.shapes.contains_key(&id) {
            return Err(HostError::CreationRejected(format!(
                "duplicate shape id {id}"
            )));
        }
        self.document.add_shape(note);
        self.document.revision += 1;
        Ok(id)
    }

    fn update_sticky(&mut self, id: ShapeId, patch: StickyPatch) -> Result<(), HostError> {
        let note = self
            .document
            .get_shape_mut(id)
            .ok_or(HostError::NotFound(id))?;
        if let Some(text) = patch.text {
            note.text = text;
        }
        if let Some(position) = patch.position {
            note.position = position;
        }
        if let Some(color) = patch.color {
            note.color = color;
        }
        self.document.revision += 1;
        Ok(())
    }

    fn apply_positions(&mut self, updates: &[PositionUpdate]) -> Result<(), HostError> {
        // Validate the whole batch before touching anything: a bad id
        // must never leave the board half-laid-out.
        for update in updates {
            if !self.document.shapes.contains_key(&update.id) {
                return Err(HostError::NotFound(update.id));
            }
        }
        for update in updates {
            if let Some(note) = self.document.shapes.get_mut(&update.id) {
                note.position = update.position;
            }
        }
        if !updates.is_empty() {
            self.document.revision += 1;
        }
        Ok(())
    }

    fn set_selection(&mut self, ids: &[ShapeId]) {
        self.selection = ids.to_vec();
    }

    fn viewport(&self) -> Option<ViewportInfo> {
        if self.viewport_size.width <= 0.0 || self.viewport_size.height <= 0.0 {
            return None;
        }
        Some(ViewportInfo {
            bounds: self.camera.world_viewport(self.viewport_size),
            screen: self.viewport_size,
        })
    }

    fn set_camera(&mut self, center: Point, zoom: f64) {
        self.camera.look_at(center, zoom, self.viewport_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sticky::StickyType;

    fn note(t: StickyType, x: f64, y: f64) -> StickyNote {
        StickyNote::new(t, Point::new(x, y))
    }

    #[test]
    fn test_document_creation() {
        let doc = BoardDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.revision, 0);
    }

    #[test]
    fn test_add_and_remove_shape() {
        let mut doc = BoardDocument::new();
        let sticky = note(StickyType::Event, 0.0, 0.0);
        let id = sticky.id();

        doc.add_shape(sticky);
        assert_eq!(doc.len(), 1);
        assert!(doc.get_shape(id).is_some());

        let removed = doc.remove_shape(id);
        assert!(removed.is_some());
        assert!(doc.is_empty());
        assert!(doc.z_order.is_empty());
    }

    #[test]
    fn test_topmost_at_prefers_front() {
        let mut doc = BoardDocument::new();
        let back = note(StickyType::Event, 0.0, 0.0);
        let front = note(StickyType::Command, 50.0, 50.0);
        let front_id = front.id();
        doc.add_shape(back);
        doc.add_shape(front);

        // Point inside both: the later-added shape wins.
        assert_eq!(doc.topmost_at(Point::new(60.0, 60.0)), Some(front_id));
        assert_eq!(doc.topmost_at(Point::new(5000.0, 5000.0)), None);
    }

    #[test]
    fn test_json_round_trip() {
        let mut doc = BoardDocument::new();
        doc.name = "Sprint Review".to_string();
        doc.add_shape(note(StickyType::Actor, 10.0, 10.0).with_text("Customer"));
        doc.revision = 7;

        let json = doc.to_json().unwrap();
        let back = BoardDocument::from_json(&json).unwrap();
        assert_eq!(back.id, doc.id);
        assert_eq!(back.name, "Sprint Review");
        assert_eq!(back.len(), 1);
        assert_eq!(back.revision, 7);
        assert_eq!(back.z_order, doc.z_order);
    }

    #[test]
    fn test_create_selects_and_bumps_revision() {
        let mut board = Board::new();
        let id = board
            .create_sticky(note(StickyType::Event, 0.0, 0.0))
            .unwrap();
        board.set_selection(&[id]);

        assert_eq!(board.document.revision, 1);
        assert!(board.is_selected(id));
        assert_eq!(board.selection, vec![id]);
    }

    #[test]
    fn test_create_duplicate_rejected_without_partial_shape() {
        let mut board = Board::new();
        let sticky = note(StickyType::Event, 0.0, 0.0);
        let duplicate = sticky.clone();
        board.create_sticky(sticky).unwrap();

        let result = board.create_sticky(duplicate);
        assert!(matches!(result, Err(HostError::CreationRejected(_))));
        assert_eq!(board.document.len(), 1);
        assert_eq!(board.document.revision, 1);
    }

    #[test]
    fn test_update_patch_applies_only_given_fields() {
        let mut board = Board::new();
        let id = board
            .create_sticky(note(StickyType::Event, 1.0, 2.0).with_text("Order Placed"))
            .unwrap();

        board
            .update_sticky(id, StickyPatch::position(Point::new(9.0, 9.0)))
            .unwrap();
        let shape = board.document.get_shape(id).unwrap();
        assert_eq!(shape.position, Point::new(9.0, 9.0));
        assert_eq!(shape.text, "Order Placed");
    }

    #[test]
    fn test_update_unknown_shape_fails() {
        let mut board = Board::new();
        let result = board.update_sticky(Uuid::new_v4(), StickyPatch::text("x"));
        assert!(matches!(result, Err(HostError::NotFound(_))));
    }

    #[test]
    fn test_position_batch_is_atomic() {
        let mut board = Board::new();
        let a = board
            .create_sticky(note(StickyType::Event, 0.0, 0.0))
            .unwrap();
        let revision = board.document.revision;

        let updates = [
            PositionUpdate {
                id: a,
                position: Point::new(100.0, 100.0),
            },
            PositionUpdate {
                id: Uuid::new_v4(),
                position: Point::new(200.0, 200.0),
            },
        ];
        let result = board.apply_positions(&updates);
        assert!(matches!(result, Err(HostError::NotFound(_))));

        // Nothing moved, nothing bumped.
        assert_eq!(
            board.document.get_shape(a).unwrap().position,
            Point::new(0.0, 0.0)
        );
        assert_eq!(board.document.revision, revision);
    }

    #[test]
    fn test_position_batch_bumps_revision_once() {
        let mut board = Board::new();
        let a = board
            .create_sticky(note(StickyType::Event, 0.0, 0.0))
            .unwrap();
        let b = board
            .create_sticky(note(StickyType::Actor, 10.0, 10.0))
            .unwrap();
        let revision = board.document.revision;

        let updates = [
            PositionUpdate {
                id: a,
                position: Point::new(100.0, 100.0),
            },
            PositionUpdate {
                id: b,
                position: Point::new(350.0, 100.0),
            },
        ];
        board.apply_positions(&updates).unwrap();
        assert_eq!(board.document.revision, revision + 1);
    }

    #[test]
    fn test_viewport_unavailable_without_size() {
        let board = Board::new();
        assert!(board.viewport().is_none());

        let mut board = Board::new();
        board.set_viewport_size(800.0, 600.0);
        let vp = board.viewport().unwrap();
        assert!(!vp.is_degenerate());
    }

    #[test]
    fn test_delete_selected() {
        let mut board = Board::new();
        let id = board
            .create_sticky(note(StickyType::Event, 0.0, 0.0))
            .unwrap();
        board.set_selection(&[id]);

        assert_eq!(board.delete_selected(), 1);
        assert!(board.document.is_empty());
        assert!(board.selection.is_empty());
        assert_eq!(board.document.revision, 2);
    }
}
