use egui::epaint::TextShape;
use egui::{Color32, FontId, Painter, Pos2, Rect, Shape, Stroke};

use super::PaintTarget;
use crate::geometry::rotate;

/// Paints through an egui [`Painter`] onto the on-screen canvas rect
pub struct PainterTarget<'a> {
    painter: &'a Painter,
    canvas: Rect,
}

impl<'a> PainterTarget<'a> {
    pub fn new(painter: &'a Painter, canvas: Rect) -> Self {
        Self { painter, canvas }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        self.canvas.min + pos.to_vec2()
    }
}

impl PaintTarget for PainterTarget<'_> {
    fn bounds(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.canvas.size())
    }

    fn clear(&mut self, bounds: Rect, color: Color32) {
        let rect = bounds.translate(self.canvas.min.to_vec2());
        self.painter.rect_filled(rect, 0.0, color);
    }

    fn draw_path(&mut self, points: &[Pos2], thickness: f32, color: Color32) {
        let points: Vec<Pos2> = points.iter().map(|p| self.to_screen(*p)).collect();

        // Round joins and caps, like a felt tip
        let radius = thickness / 2.0;
        for point in &points {
            self.painter.circle_filled(*point, radius, color);
        }
        self.painter
            .add(Shape::line(points, Stroke::new(thickness, color)));
    }

    fn draw_dot(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter
            .circle_filled(self.to_screen(center), radius, color);
    }

    fn draw_glyph(&mut self, symbol: &str, anchor: Pos2, size: f32, angle: f32, color: Color32) {
        let galley = self
            .painter
            .layout_no_wrap(symbol.to_owned(), FontId::proportional(size), color);

        // Text rotates around its top-left corner, so offset it to spin about the center
        let half = galley.size() / 2.0;
        let pos = self.to_screen(anchor) - rotate(half, angle);

        self.painter.add(
            TextShape::new(pos, galley, color).with_angle(angle.to_radians()),
        );
    }
}
