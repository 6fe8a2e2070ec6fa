//! Button components for the toolbar.

use egui::{
    vec2, Align2, Color32, CornerRadius, CursorIcon, Pos2, Rect, Sense, Stroke, StrokeKind, Ui,
};

use crate::{sizing, theme};

/// A palette row button for one sticky type: color chip, icon glyph
/// and label, with the type description as tooltip.
pub struct StickyButton<'a> {
    icon: &'a str,
    label: &'a str,
    tooltip: &'a str,
    chip: Color32,
}

impl<'a> StickyButton<'a> {
    pub fn new(icon: &'a str, label: &'a str, tooltip: &'a str, chip: Color32) -> Self {
        Self {
            icon,
            label,
            tooltip,
            chip,
        }
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let size = vec2(ui.available_width().max(160.0), sizing::ROW_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if response.hovered() {
                theme::HOVER_BG
            } else {
                Color32::TRANSPARENT
            };
            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);

            // Color chip on the left
            let chip_rect = Rect::from_center_size(
                Pos2::new(rect.left() + 14.0, rect.center().y),
                vec2(sizing::SMALL, sizing::SMALL),
            );
            ui.painter()
                .rect_filled(chip_rect, CornerRadius::same(3), self.chip);
            ui.painter().rect_stroke(
                chip_rect,
                CornerRadius::same(3),
                Stroke::new(1.0, Color32::from_black_alpha(30)),
                StrokeKind::Inside,
            );

            // Icon and label
            ui.painter().text(
                Pos2::new(rect.left() + 30.0, rect.center().y),
                Align2::LEFT_CENTER,
                self.icon,
                egui::FontId::proportional(13.0),
                theme::TEXT,
            );
            ui.painter().text(
                Pos2::new(rect.left() + 50.0, rect.center().y),
                Align2::LEFT_CENTER,
                self.label,
                egui::FontId::proportional(13.0),
                theme::TEXT,
            );
        }

        let clicked = response.clicked();
        response
            .on_hover_text(self.tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// A plain text button, optionally drawn in the selected (accent)
/// state.
pub struct TextButton<'a> {
    label: &'a str,
    selected: bool,
    min_width: Option<f32>,
}

impl<'a> TextButton<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            selected: false,
            min_width: None,
        }
    }

    /// Draw in the selected state.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Set minimum width.
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = egui::FontId::proportional(12.0);
        let galley = ui.painter().layout_no_wrap(
            self.label.to_string(),
            font_id.clone(),
            Color32::PLACEHOLDER,
        );
        let text_width = galley.size().x;
        let width = self
            .min_width
            .unwrap_or(text_width + 16.0)
            .max(text_width + 16.0);
        let size = vec2(width, 24.0);

        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                theme::ACCENT
            } else if response.hovered() {
                Color32::from_gray(235)
            } else {
                Color32::from_gray(245)
            };

            let text_color = if self.selected {
                Color32::WHITE
            } else {
                Color32::from_gray(80)
            };

            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);

            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.label,
                font_id,
                text_color,
            );
        }

        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}
