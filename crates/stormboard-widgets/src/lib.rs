//! Reusable egui widget components for the Stormboard UI.
//!
//! - **Buttons**: sticky-palette buttons, plain text buttons
//! - **Swatches**: legend color swatches
//! - **Panels**: panel frames, section labels, separators

pub mod buttons;
pub mod panels;
pub mod swatches;

pub use buttons::{StickyButton, TextButton};
pub use panels::{panel_frame, section_label, separator, toolbar_frame};
pub use swatches::ColorSwatch;

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Small element size (color swatches)
    pub const SMALL: f32 = 16.0;
    /// Row height for palette buttons
    pub const ROW_HEIGHT: f32 = 28.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}
