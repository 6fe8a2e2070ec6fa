//! Canvas painting: coordinate conversion and sticky drawing.

use egui::{
    Align2, Color32, CornerRadius, FontId, Pos2, Rect, Shape, Stroke, StrokeKind, vec2,
};
use kurbo::Point;

use stormboard_core::shape_util::EMPTY_TEXT_HINT;
use stormboard_core::{Board, Camera, SerializableColor, ShapeRegistry, StickyVisual,
    STICKY_SHAPE_TYPE};
use stormboard_widgets::theme;

/// Convert a core color to an egui color.
pub fn color32(c: SerializableColor) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// World point to absolute screen position inside the canvas.
pub fn world_to_screen(camera: &Camera, origin: Pos2, point: Point) -> Pos2 {
    let s = camera.world_to_screen(point);
    Pos2::new(origin.x + s.x as f32, origin.y + s.y as f32)
}

/// Absolute screen position to world point.
pub fn screen_to_world(camera: &Camera, origin: Pos2, pos: Pos2) -> Point {
    camera.screen_to_world(Point::new(
        (pos.x - origin.x) as f64,
        (pos.y - origin.y) as f64,
    ))
}

/// Screen rectangle of a sticky note.
pub fn note_screen_rect(camera: &Camera, origin: Pos2, position: Point, w: f64, h: f64) -> Rect {
    let top_left = world_to_screen(camera, origin, position);
    let bottom_right = world_to_screen(camera, origin, Point::new(position.x + w, position.y + h));
    Rect::from_min_max(top_left, bottom_right)
}

/// Paint every sticky in z-order, plus selection indicators.
pub fn paint_board(painter: &egui::Painter, origin: Pos2, board: &Board, registry: &ShapeRegistry) {
    let Some(util) = registry.get(STICKY_SHAPE_TYPE) else {
        return;
    };
    let zoom = board.camera.zoom as f32;

    for note in board.document.shapes_ordered() {
        let rect = note_screen_rect(&board.camera, origin, note.position, note.width, note.height);
        let visual = util.render(note);
        paint_sticky(painter, rect, &visual, zoom);

        if board.is_selected(note.id()) {
            let radius = (util.indicator(note).radii().top_left * board.camera.zoom) as f32;
            painter.rect_stroke(
                rect.expand(2.0),
                CornerRadius::same((radius + 2.0).min(255.0) as u8),
                Stroke::new(2.0, theme::ACCENT),
                StrokeKind::Outside,
            );
        }
    }
}

/// Paint one sticky from its visual description.
fn paint_sticky(painter: &egui::Painter, rect: Rect, visual: &StickyVisual, zoom: f32) {
    let radius = CornerRadius::same((visual.corner_radius as f32 * zoom).clamp(0.0, 12.0) as u8);
    painter.rect_filled(rect, radius, color32(visual.fill));

    if visual.dashed_border {
        let stroke = Stroke::new(1.5, Color32::from_black_alpha(100));
        let corners = [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
            rect.left_top(),
        ];
        for edge in corners.windows(2) {
            painter.extend(Shape::dashed_line(&[edge[0], edge[1]], stroke, 6.0, 4.0));
        }
    } else {
        painter.rect_stroke(
            rect,
            radius,
            Stroke::new(1.0, Color32::from_black_alpha(25)),
            StrokeKind::Inside,
        );
    }

    let pad = 10.0 * zoom;
    let clipped = painter.with_clip_rect(rect.shrink(2.0));

    let header_font = FontId::proportional((11.0 * zoom).clamp(6.0, 22.0));
    let header_color = if visual.placeholder {
        Color32::from_rgb(185, 28, 28)
    } else {
        Color32::from_black_alpha(170)
    };
    clipped.text(
        rect.left_top() + vec2(pad, 8.0 * zoom),
        Align2::LEFT_TOP,
        format!("{} {}", visual.header_icon, visual.header_label.to_uppercase()),
        header_font,
        header_color,
    );

    let body_font = FontId::proportional((13.0 * zoom).clamp(6.0, 26.0));
    let body_color = if visual.body == EMPTY_TEXT_HINT {
        Color32::from_black_alpha(90)
    } else {
        Color32::from_black_alpha(220)
    };
    let wrap_width = (rect.width() - 2.0 * pad).max(10.0);
    let galley = painter.layout(visual.body.clone(), body_font, body_color, wrap_width);
    clipped.galley(
        rect.left_top() + vec2(pad, 28.0 * zoom),
        galley,
        body_color,
    );
}
