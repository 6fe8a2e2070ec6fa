//! Color swatch components for the legend.

use egui::{vec2, Color32, CursorIcon, Sense, Stroke, Ui, Vec2};

use crate::sizing;

/// A small color swatch with a hover tooltip.
pub struct ColorSwatch<'a> {
    color: Color32,
    tooltip: &'a str,
    size: Vec2,
}

impl<'a> ColorSwatch<'a> {
    pub fn new(color: Color32, tooltip: &'a str) -> Self {
        Self {
            color,
            tooltip,
            size: vec2(sizing::SMALL, sizing::SMALL),
        }
    }

    /// Set the swatch size.
    pub fn size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    /// Show the swatch and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let (rect, response) = ui.allocate_exact_size(self.size, Sense::click());

        if ui.is_rect_visible(rect) {
            let center = rect.center();
            let radius = rect.width().min(rect.height()) / 2.0;

            ui.painter().circle_filled(center, radius, self.color);
            ui.painter().circle_stroke(
                center,
                radius,
                Stroke::new(1.0, Color32::from_black_alpha(40)),
            );
        }

        let clicked = response.clicked();
        response
            .on_hover_text(self.tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}
