use egui::Pos2;

use crate::drawable::{Stamp, Stroke};
use crate::error::{SketchError, SketchResult};
use crate::preview::ToolPreview;

/// The active tool. Marker and stamp are mutually exclusive and the last
/// selection wins: picking a marker forgets the sticker and vice versa.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolSelection {
    Marker { thickness: f32 },
    Stamp { symbol: String },
}

impl ToolSelection {
    pub fn name(&self) -> &'static str {
        match self {
            ToolSelection::Marker { .. } => "Marker",
            ToolSelection::Stamp { .. } => "Sticker",
        }
    }
}

/// Current tool choice plus the rotation applied to placed stickers
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    selection: ToolSelection,
    /// Degrees in 0..=360
    rotation: f32,
    /// Glyph size for placed stickers
    stamp_size: f32,
}

impl ToolState {
    pub fn new(thickness: f32, stamp_size: f32) -> Self {
        Self {
            selection: ToolSelection::Marker { thickness },
            rotation: 0.0,
            stamp_size,
        }
    }

    pub fn selection(&self) -> &ToolSelection {
        &self.selection
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn select_marker(&mut self, thickness: f32) -> SketchResult<()> {
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(SketchError::InvalidThickness(thickness));
        }
        self.selection = ToolSelection::Marker { thickness };
        Ok(())
    }

    /// Select a sticker. Surrounding whitespace is dropped; nothing is left
    /// changed when the symbol is empty.
    pub fn select_stamp(&mut self, symbol: &str) -> SketchResult<()> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(SketchError::EmptySymbol);
        }
        self.selection = ToolSelection::Stamp {
            symbol: symbol.to_owned(),
        };
        Ok(())
    }

    /// Set the sticker rotation. Finite angles are clamped into 0..=360 but
    /// otherwise kept as given, so 360 stays 360.
    pub fn set_rotation(&mut self, degrees: f32) -> SketchResult<()> {
        if !degrees.is_finite() {
            return Err(SketchError::InvalidRotation(degrees));
        }
        self.rotation = degrees.clamp(0.0, 360.0);
        Ok(())
    }

    /// Start a stroke when the marker is active
    pub fn begin_stroke(&self, pos: Pos2) -> Option<Stroke> {
        match &self.selection {
            ToolSelection::Marker { thickness } => Some(Stroke::begin(pos, *thickness)),
            ToolSelection::Stamp { .. } => None,
        }
    }

    /// Build the stamp a click would place when a sticker is active
    pub fn place_stamp(&self, pos: Pos2) -> Option<Stamp> {
        match &self.selection {
            ToolSelection::Stamp { symbol } => {
                Some(Stamp::place(symbol.clone(), pos, self.rotation, self.stamp_size))
            }
            ToolSelection::Marker { .. } => None,
        }
    }

    /// Ghost of the active tool at `position`
    pub fn preview_at(&self, position: Pos2) -> ToolPreview {
        match &self.selection {
            ToolSelection::Marker { thickness } => ToolPreview::Marker {
                position,
                thickness: *thickness,
            },
            ToolSelection::Stamp { symbol } => ToolPreview::Stamp {
                symbol: symbol.clone(),
                position,
                angle: self.rotation,
                size: self.stamp_size,
            },
        }
    }
}
