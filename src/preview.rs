use egui::{Color32, Pos2};

use crate::target::PaintTarget;

/// Ghost of the active tool drawn under the pointer while idle
#[derive(Debug, Clone, PartialEq)]
pub enum ToolPreview {
    /// Dot the size of the marker tip
    Marker { position: Pos2, thickness: f32 },
    /// The sticker as it would be placed
    Stamp {
        symbol: String,
        position: Pos2,
        angle: f32,
        size: f32,
    },
}

impl ToolPreview {
    pub fn position(&self) -> Pos2 {
        match self {
            ToolPreview::Marker { position, .. } | ToolPreview::Stamp { position, .. } => *position,
        }
    }

    pub fn display(&self, target: &mut dyn PaintTarget, tint: Color32) {
        match self {
            ToolPreview::Marker { position, thickness } => {
                target.draw_dot(*position, thickness / 2.0, tint);
            }
            ToolPreview::Stamp {
                symbol,
                position,
                angle,
                size,
            } => {
                target.draw_glyph(symbol, *position, *size, *angle, tint);
            }
        }
    }
}

/// Tracks where the pointer is relative to the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTracker {
    position: Option<Pos2>,
    inside: bool,
}

impl PointerTracker {
    pub fn enter(&mut self, pos: Pos2) {
        self.inside = true;
        self.position = Some(pos);
    }

    pub fn leave(&mut self) {
        self.inside = false;
    }

    pub fn move_to(&mut self, pos: Pos2) {
        self.position = Some(pos);
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Last position, only while the pointer is over the canvas
    pub fn hover_position(&self) -> Option<Pos2> {
        self.position.filter(|_| self.inside)
    }
}
