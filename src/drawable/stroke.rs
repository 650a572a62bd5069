use egui::Pos2;

use super::INK;
use crate::target::PaintTarget;

/// Freehand poly-line built while the pointer is held down
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    thickness: f32,
}

impl Stroke {
    /// Start a new stroke with a single point
    pub fn begin(pos: Pos2, thickness: f32) -> Self {
        Self {
            points: vec![pos],
            thickness,
        }
    }

    /// Extend the stroke with another point. Points are never removed.
    pub fn drag(&mut self, pos: Pos2) {
        self.points.push(pos);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn display(&self, target: &mut dyn PaintTarget) {
        match self.points.as_slice() {
            [] => {}
            // A click without movement still leaves ink
            [point] => target.draw_dot(*point, self.thickness / 2.0, INK),
            points => target.draw_path(points, self.thickness, INK),
        }
    }
}
