//! Sticky note shape definitions.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }
}

/// The closed set of event-storming sticky note types.
///
/// Adding a member requires extending the color, template and layout
/// order tables in `config` in lockstep; `config::validate` checks the
/// runtime tables for total coverage at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StickyType {
    Event,
    Command,
    Aggregate,
    Actor,
    ReadModel,
    HotSpot,
    System,
    Policy,
    Value,
    Sketch,
    BoundedContext,
}

impl StickyType {
    /// Every member of the closed set.
    pub const ALL: [StickyType; 11] = [
        StickyType::Event,
        StickyType::Command,
        StickyType::Aggregate,
        StickyType::Actor,
        StickyType::ReadModel,
        StickyType::HotSpot,
        StickyType::System,
        StickyType::Policy,
        StickyType::Value,
        StickyType::Sketch,
        StickyType::BoundedContext,
    ];

    /// Stable string tag used in the host's attribute space.
    pub fn tag(&self) -> &'static str {
        match self {
            StickyType::Event => "event",
            StickyType::Command => "command",
            StickyType::Aggregate => "aggregate",
            StickyType::Actor => "actor",
            StickyType::ReadModel => "read-model",
            StickyType::HotSpot => "hot-spot",
            StickyType::System => "system",
            StickyType::Policy => "policy",
            StickyType::Value => "value",
            StickyType::Sketch => "sketch",
            StickyType::BoundedContext => "bounded-context",
        }
    }

    /// Resolve a raw tag to a member of the closed set.
    pub fn from_tag(tag: &str) -> Option<StickyType> {
        Self::ALL.iter().find(|t| t.tag() == tag).copied()
    }
}

/// Standard sticky footprint.
pub const STANDARD_SIZE: Size = Size::new(200.0, 120.0);

/// Bounded-context footprint (large dashed region).
pub const BOUNDED_CONTEXT_SIZE: Size = Size::new(600.0, 400.0);

/// Default attribute values for a new sticky of a given type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickyAttributes {
    pub width: f64,
    pub height: f64,
    pub color: SerializableColor,
}

/// Default width/height/color for a sticky type.
///
/// Bounded-context gets the large size class, every other type the
/// standard one. Pure, no side effects.
pub fn default_attributes(sticky_type: StickyType) -> StickyAttributes {
    let size = match sticky_type {
        StickyType::BoundedContext => BOUNDED_CONTEXT_SIZE,
        _ => STANDARD_SIZE,
    };
    StickyAttributes {
        width: size.width,
        height: size.height,
        color: config::sticky_config(sticky_type).color,
    }
}

/// A positioned, typed, text-bearing sticky note.
///
/// `kind` is the raw type tag as stored in the host's attribute space.
/// Documents written by other tools may carry tags outside the closed
/// set, so resolution to [`StickyType`] is fallible at every use site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StickyNote {
    pub(crate) id: ShapeId,
    kind: String,
    /// Top-left corner position in board coordinates.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Free-form note text, mutated through an edit session.
    pub text: String,
    pub color: SerializableColor,
}

impl StickyNote {
    /// Create a new sticky of the given type with default attributes.
    pub fn new(sticky_type: StickyType, position: Point) -> Self {
        let attrs = default_attributes(sticky_type);
        Self {
            id: Uuid::new_v4(),
            kind: sticky_type.tag().to_string(),
            position,
            width: attrs.width,
            height: attrs.height,
            text: String::new(),
            color: attrs.color,
        }
    }

    /// Create a sticky whose tag comes from a foreign document and may
    /// fall outside the closed type set.
    pub fn with_raw_kind(kind: impl Into<String>, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: kind.into(),
            position,
            width: STANDARD_SIZE.width,
            height: STANDARD_SIZE.height,
            text: String::new(),
            color: SerializableColor::opaque(229, 231, 235),
        }
    }

    /// Set the note text (builder form, used for template prefill).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Get the unique identifier.
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// The raw type tag.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The resolved sticky type, or None for an out-of-set tag.
    pub fn sticky_type(&self) -> Option<StickyType> {
        StickyType::from_tag(&self.kind)
    }

    /// Get the bounding box in board coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for t in StickyType::ALL {
            assert_eq!(StickyType::from_tag(t.tag()), Some(t));
        }
        assert_eq!(StickyType::from_tag("post-it"), None);
    }

    #[test]
    fn test_default_size_classes() {
        for t in StickyType::ALL {
            let attrs = default_attributes(t);
            if t == StickyType::BoundedContext {
                assert!((attrs.width - BOUNDED_CONTEXT_SIZE.width).abs() < f64::EPSILON);
                assert!((attrs.height - BOUNDED_CONTEXT_SIZE.height).abs() < f64::EPSILON);
            } else {
                assert!((attrs.width - STANDARD_SIZE.width).abs() < f64::EPSILON);
                assert!((attrs.height - STANDARD_SIZE.height).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn test_bounds() {
        let note = StickyNote::new(StickyType::Event, Point::new(10.0, 20.0));
        let bounds = note.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 210.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 140.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_foreign_kind_unresolved() {
        let note = StickyNote::with_raw_kind("whiteboard-scribble", Point::ZERO);
        assert_eq!(note.sticky_type(), None);
        assert_eq!(note.kind(), "whiteboard-scribble");
    }

    #[test]
    fn test_serde_round_trip() {
        let note = StickyNote::new(StickyType::ReadModel, Point::new(5.0, 6.0)).with_text("Orders");
        let json = serde_json::to_string(&note).unwrap();
        let back: StickyNote = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), note.id());
        assert_eq!(back.sticky_type(), Some(StickyType::ReadModel));
        assert_eq!(back.text, "Orders");
    }
}
