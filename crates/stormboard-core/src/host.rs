//! Host whiteboard interface.
//!
//! The host owns the document, rendering, hit-testing, undo and sync.
//! The layout engine and the creation/edit paths talk to it through
//! this narrow surface instead of holding any board state of their own.

use kurbo::{Point, Rect, Size};
use thiserror::Error;

use crate::sticky::{SerializableColor, ShapeId, StickyNote};

/// Host-side failures, terminal to the operation that triggered them.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("shape not found: {0}")]
    NotFound(ShapeId),
    #[error("shape creation rejected: {0}")]
    CreationRejected(String),
}

/// Partial attribute patch for a single sticky.
#[derive(Debug, Clone, Default)]
pub struct StickyPatch {
    pub text: Option<String>,
    pub position: Option<Point>,
    pub color: Option<SerializableColor>,
}

impl StickyPatch {
    /// A patch that only replaces the note text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// A patch that only moves the note.
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }
}

/// One repositioning instruction from a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionUpdate {
    pub id: ShapeId,
    pub position: Point,
}

/// Current camera view, in both world and screen terms.
#[derive(Debug, Clone, Copy)]
pub struct ViewportInfo {
    /// Visible region in board (world) coordinates.
    pub bounds: Rect,
    /// Viewport size in screen pixels.
    pub screen: Size,
}

impl ViewportInfo {
    /// A viewport that cannot host a placement or a camera fit.
    pub fn is_degenerate(&self) -> bool {
        !self.bounds.width().is_finite()
            || !self.bounds.height().is_finite()
            || self.bounds.width() <= 0.0
            || self.bounds.height() <= 0.0
            || self.screen.width <= 0.0
            || self.screen.height <= 0.0
    }
}

/// The narrow surface of the host whiteboard consumed by this layer.
pub trait Host {
    /// Snapshot of all sticky shapes on the current view.
    fn sticky_shapes(&self) -> Vec<StickyNote>;

    /// Create a shape. On success the created id is the sole shape the
    /// caller should select.
    fn create_sticky(&mut self, note: StickyNote) -> Result<ShapeId, HostError>;

    /// Apply a partial attribute patch to one shape.
    fn update_sticky(&mut self, id: ShapeId, patch: StickyPatch) -> Result<(), HostError>;

    /// Apply a batch of position updates as one indivisible change:
    /// either every update applies or none do, and no observer sees a
    /// partially-laid-out board.
    fn apply_positions(&mut self, updates: &[PositionUpdate]) -> Result<(), HostError>;

    /// Replace the selected shape id set.
    fn set_selection(&mut self, ids: &[ShapeId]);

    /// Current viewport, or None when no viewport is available.
    fn viewport(&self) -> Option<ViewportInfo>;

    /// Move the camera to the given world-space center and zoom.
    fn set_camera(&mut self, center: Point, zoom: f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_viewport() {
        let vp = ViewportInfo {
            bounds: Rect::new(0.0, 0.0, 0.0, 0.0),
            screen: Size::new(800.0, 600.0),
        };
        assert!(vp.is_degenerate());

        let vp = ViewportInfo {
            bounds: Rect::new(0.0, 0.0, 800.0, 600.0),
            screen: Size::new(800.0, 600.0),
        };
        assert!(!vp.is_degenerate());
    }
}
