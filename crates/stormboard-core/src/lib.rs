//! Stormboard Core Library
//!
//! Platform-agnostic data structures and logic for the Stormboard
//! event-storming whiteboard: the sticky shape model, the auto-align
//! layout engine, and the narrow host interface they drive.

pub mod board;
pub mod camera;
pub mod config;
pub mod editing;
pub mod host;
pub mod layout;
pub mod shape_util;
pub mod sticky;
pub mod storage;

pub use board::{Board, BoardDocument};
pub use camera::Camera;
pub use editing::{EditSession, EditState};
pub use host::{Host, HostError, PositionUpdate, StickyPatch, ViewportInfo};
pub use layout::{AlignError, CameraFit, LayoutEngine, LayoutPlan};
pub use shape_util::{ShapeRegistry, ShapeUtil, StickyShapeUtil, StickyVisual, STICKY_SHAPE_TYPE};
pub use sticky::{SerializableColor, ShapeId, StickyAttributes, StickyNote, StickyType};
