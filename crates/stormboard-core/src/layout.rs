//! Auto-align layout engine.
//!
//! Repositions every sticky on the board into per-type columns in the
//! event-storming narrative order and refits the camera around the
//! result. The placement itself is a pure computation; the engine
//! wraps it with the host round-trip and a reentrancy guard.

use std::collections::HashMap;

use kurbo::{Point, Rect};
use thiserror::Error;

use crate::config::LAYOUT_ORDER;
use crate::host::{Host, HostError, PositionUpdate, ViewportInfo};
use crate::sticky::{StickyNote, StickyType};

/// Origin of the laid-out grid, in board coordinates.
pub const START_X: f64 = 100.0;
pub const START_Y: f64 = 100.0;
/// Horizontal padding between columns.
pub const PADDING: f64 = 20.0;
/// Column width for standard notes.
pub const COLUMN_WIDTH: f64 = 250.0;
/// Row pitch for standard notes (120 high plus 20 padding).
pub const ROW_PITCH: f64 = 140.0;
/// Column width for bounded contexts.
pub const BC_COLUMN_WIDTH: f64 = 650.0;
/// Row pitch for bounded contexts (400 high plus 50 padding).
pub const BC_ROW_PITCH: f64 = 450.0;
/// Margin added around the layout bounds before fitting the camera.
pub const FIT_MARGIN: f64 = 50.0;

/// Align failures, terminal to the one invocation that hit them.
#[derive(Debug, Error)]
pub enum AlignError {
    /// No sticky shapes on the board: nothing is mutated and the
    /// camera stays where it is.
    #[error("nothing to align")]
    NothingToAlign,
    /// An align pass is already in flight.
    #[error("auto align is already in progress")]
    InProgress,
    /// The host refused part of the operation.
    #[error(transparent)]
    Host(#[from] HostError),
}

/// The computed output of one layout pass.
#[derive(Debug, Clone)]
pub struct LayoutPlan {
    /// One position per placed shape, applied as a single batch.
    pub updates: Vec<PositionUpdate>,
    /// Bounding box over every placed footprint.
    pub bounds: Rect,
    /// Number of shapes placed. Unrecognized kinds are dropped, not
    /// counted and not failed.
    pub placed: usize,
}

/// Camera framing derived from a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFit {
    /// Centroid of the layout bounds.
    pub center: Point,
    /// Zoom that fits the bounds plus margin; never past 1:1.
    pub zoom: f64,
}

/// Compute column positions for every recognizable sticky.
///
/// Shapes are partitioned by type, keeping input order within each
/// type; columns are assigned in [`LAYOUT_ORDER`] priority, skipping
/// types with no members. Bounded contexts stack in a single wide
/// column at the origin and push every other column right by the
/// bounded-context column width plus double padding.
pub fn compute_layout(shapes: &[StickyNote]) -> Result<LayoutPlan, AlignError> {
    let mut groups: HashMap<StickyType, Vec<&StickyNote>> = HashMap::new();
    for note in shapes {
        match note.sticky_type() {
            Some(t) => groups.entry(t).or_default().push(note),
            None => log::warn!(
                "auto align: dropping shape {} with unrecognized kind {:?}",
                note.id(),
                note.kind()
            ),
        }
    }
    if groups.is_empty() {
        return Err(AlignError::NothingToAlign);
    }

    let base_x = if groups.contains_key(&StickyType::BoundedContext) {
        START_X + BC_COLUMN_WIDTH + 2.0 * PADDING
    } else {
        START_X
    };

    let mut updates = Vec::new();
    let mut bounds: Option<Rect> = None;
    let mut column = 0usize;

    for ty in LAYOUT_ORDER {
        let Some(members) = groups.get(&ty) else {
            continue;
        };
        let (x, pitch) = if ty == StickyType::BoundedContext {
            (START_X, BC_ROW_PITCH)
        } else {
            let x = base_x + column as f64 * COLUMN_WIDTH;
            column += 1;
            (x, ROW_PITCH)
        };
        for (row, note) in members.iter().enumerate() {
            let position = Point::new(x, START_Y + row as f64 * pitch);
            let footprint = Rect::new(
                position.x,
                position.y,
                position.x + note.width,
                position.y + note.height,
            );
            bounds = Some(match bounds {
                Some(b) => b.union(footprint),
                None => footprint,
            });
            updates.push(PositionUpdate {
                id: note.id(),
                position,
            });
        }
    }

    let Some(bounds) = bounds else {
        return Err(AlignError::NothingToAlign);
    };

    Ok(LayoutPlan {
        placed: updates.len(),
        updates,
        bounds,
    })
}

/// Derive the camera framing that fits `bounds` plus [`FIT_MARGIN`]
/// inside the viewport, clamped to never zoom in past 1:1.
pub fn fit_camera(bounds: Rect, viewport: &ViewportInfo) -> CameraFit {
    let framed = bounds.inflate(FIT_MARGIN, FIT_MARGIN);
    let zoom = (viewport.screen.width / framed.width())
        .min(viewport.screen.height / framed.height())
        .min(1.0);
    CameraFit {
        center: bounds.center(),
        zoom,
    }
}

/// Reentrancy state for the align operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum AlignState {
    #[default]
    Idle,
    Running,
}

/// Drives one auto-align pass against the host: snapshot read, pure
/// placement, atomic position batch, camera fit.
#[derive(Debug, Default)]
pub struct LayoutEngine {
    state: AlignState,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while an align pass is in flight.
    pub fn is_running(&self) -> bool {
        self.state == AlignState::Running
    }

    /// Run one auto-align pass. Returns the number of shapes placed.
    ///
    /// The guard state is reset on completion or failure; a second
    /// invocation while one is in flight fails with `InProgress`.
    pub fn auto_align(&mut self, host: &mut dyn Host) -> Result<usize, AlignError> {
        if self.state == AlignState::Running {
            return Err(AlignError::InProgress);
        }
        self.state = AlignState::Running;
        let result = Self::run(host);
        self.state = AlignState::Idle;
        result
    }

    fn run(host: &mut dyn Host) -> Result<usize, AlignError> {
        let snapshot = host.sticky_shapes();
        let plan = compute_layout(&snapshot)?;
        host.apply_positions(&plan.updates)?;

        match host.viewport() {
            Some(vp) if !vp.is_degenerate() => {
                let fit = fit_camera(plan.bounds, &vp);
                host.set_camera(fit.center, fit.zoom);
            }
            _ => log::warn!("auto align: viewport unavailable, leaving camera untouched"),
        }

        Ok(plan.placed)
    }

    #[cfg(test)]
    fn mark_running(&mut self) {
        self.state = AlignState::Running;
    }
}
