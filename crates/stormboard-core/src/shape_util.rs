//! Shape-utility capability interface.
//!
//! The host exposes a shape registry; a custom shape type contributes
//! a default-attributes factory, a renderer and a selection indicator
//! through [`ShapeUtil`]. One concrete implementor exists here; no
//! inheritance hierarchy is needed for a single custom shape.

use std::collections::HashMap;

use kurbo::RoundedRect;

use crate::config;
use crate::sticky::{
    default_attributes, SerializableColor, StickyAttributes, StickyNote, StickyType,
};

/// Registry key for the sticky shape type.
pub const STICKY_SHAPE_TYPE: &str = "event-storming-sticky";

/// Corner radius of a sticky, in board units.
pub const CORNER_RADIUS: f64 = 8.0;

/// Body text shown for a note with no text yet.
pub const EMPTY_TEXT_HINT: &str = "Double click to edit";

/// Paint-ready description of one sticky note.
#[derive(Debug, Clone, PartialEq)]
pub struct StickyVisual {
    pub fill: SerializableColor,
    pub corner_radius: f64,
    /// Dashed outline (bounded-context region style).
    pub dashed_border: bool,
    /// Icon glyph for the header row.
    pub header_icon: &'static str,
    /// Header label, drawn uppercase by the UI.
    pub header_label: &'static str,
    /// Body text; an affordance hint when the note is empty.
    pub body: String,
    /// True when the note's kind missed the lookup table and a
    /// placeholder is shown instead of real content.
    pub placeholder: bool,
}

/// Behavior contract a custom shape type registers with the host.
pub trait ShapeUtil {
    /// Stable shape-type identifier, used as the registry key.
    fn shape_type(&self) -> &'static str;

    /// Default attributes for a new shape of the given sticky type.
    fn default_attributes(&self, sticky_type: StickyType) -> StickyAttributes;

    /// Produce the visual representation for a note. Must not fail:
    /// an unrecognized kind renders a visible placeholder.
    fn render(&self, note: &StickyNote) -> StickyVisual;

    /// Selection outline for a note.
    fn indicator(&self, note: &StickyNote) -> RoundedRect;
}

/// The sticky note shape utility.
#[derive(Debug, Default)]
pub struct StickyShapeUtil;

impl ShapeUtil for StickyShapeUtil {
    fn shape_type(&self) -> &'static str {
        STICKY_SHAPE_TYPE
    }

    fn default_attributes(&self, sticky_type: StickyType) -> StickyAttributes {
        default_attributes(sticky_type)
    }

    fn render(&self, note: &StickyNote) -> StickyVisual {
        let Some(sticky_type) = note.sticky_type() else {
            log::warn!(
                "rendering placeholder for unrecognized sticky kind {:?}",
                note.kind()
            );
            return StickyVisual {
                fill: SerializableColor::opaque(229, 231, 235),
                corner_radius: CORNER_RADIUS,
                dashed_border: false,
                header_icon: "❓",
                header_label: "Unknown Type",
                body: note.text.clone(),
                placeholder: true,
            };
        };

        let cfg = config::sticky_config(sticky_type);
        StickyVisual {
            fill: note.color,
            corner_radius: CORNER_RADIUS,
            dashed_border: sticky_type == StickyType::BoundedContext,
            header_icon: cfg.icon,
            header_label: cfg.label,
            body: if note.text.is_empty() {
                EMPTY_TEXT_HINT.to_string()
            } else {
                note.text.clone()
            },
            placeholder: false,
        }
    }

    fn indicator(&self, note: &StickyNote) -> RoundedRect {
        RoundedRect::from_rect(note.bounds(), CORNER_RADIUS)
    }
}

/// Registry of custom shape utilities, keyed by shape type.
#[derive(Default)]
pub struct ShapeRegistry {
    utils: HashMap<&'static str, Box<dyn ShapeUtil>>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the board's built-in shape utilities.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(StickyShapeUtil));
        registry
    }

    /// Register a utility; replaces any previous entry for its type.
    pub fn register(&mut self, util: Box<dyn ShapeUtil>) {
        self.utils.insert(util.shape_type(), util);
    }

    pub fn get(&self, shape_type: &str) -> Option<&dyn ShapeUtil> {
        self.utils.get(shape_type).map(|u| u.as_ref())
    }
}
