use egui::Pos2;

use super::INK;
use crate::target::PaintTarget;

/// A symbol placed at a point, committed in a single action
#[derive(Debug, Clone, PartialEq)]
pub struct Stamp {
    symbol: String,
    anchor: Pos2,
    /// Degrees, stored as given (360 is kept as 360)
    angle: f32,
    size: f32,
}

impl Stamp {
    pub fn place(symbol: impl Into<String>, anchor: Pos2, angle: f32, size: f32) -> Self {
        Self {
            symbol: symbol.into(),
            anchor,
            angle,
            size,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn display(&self, target: &mut dyn PaintTarget) {
        target.draw_glyph(&self.symbol, self.anchor, self.size, self.angle, INK);
    }
}
