use crate::export::Exporter;
use crate::target::MAX_DIMENSION;

/// Key under which the configuration is kept in eframe storage
pub const STORAGE_KEY: &str = "sketchpad_config";

/// Largest sticker glyph, in canvas units
pub const MAX_STAMP_SIZE: f32 = 1024.0;
const MAX_CANVAS_SIZE: f32 = 4096.0;

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// A named marker thickness offered in the tools panel
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct MarkerPreset {
    pub label: String,
    pub thickness: f32,
}

impl MarkerPreset {
    pub fn new(label: &str, thickness: f32) -> Self {
        Self {
            label: label.to_owned(),
            thickness,
        }
    }
}

/// Tool preferences and export settings.
///
/// Only preferences live here; the drawing itself is never persisted.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct SketchConfig {
    /// Edge length of the square canvas, in points
    pub canvas_size: f32,
    pub markers: Vec<MarkerPreset>,
    /// Sticker palette, including user-added entries
    pub stickers: Vec<String>,
    /// Glyph size for placed stickers, in canvas units
    pub stamp_size: f32,
    pub export_scale: f32,
    /// Edge length of the exported square image, in pixels
    pub export_size: u32,
    pub export_file_name: String,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas_size: 256.0,
            markers: vec![MarkerPreset::new("Thin", 1.0), MarkerPreset::new("Thick", 5.0)],
            stickers: vec!["⭐".to_owned(), "🐸".to_owned(), "🌮".to_owned()],
            stamp_size: 32.0,
            export_scale: 4.0,
            export_size: 1024,
            export_file_name: "sketchpad.png".to_owned(),
        }
    }
}

impl SketchConfig {
    /// Thickness the marker starts out with
    pub fn default_thickness(&self) -> f32 {
        self.markers.first().map_or(1.0, |preset| preset.thickness)
    }

    pub fn exporter(&self) -> Exporter {
        Exporter::new(self.export_scale, self.export_size, &self.export_file_name)
    }

    /// Replace out-of-range values (typically from stored state) with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !positive(self.canvas_size) || self.canvas_size > MAX_CANVAS_SIZE {
            log::warn!("Ignoring stored canvas size {}", self.canvas_size);
            self.canvas_size = defaults.canvas_size;
        }

        let stored = self.markers.len();
        self.markers.retain(|preset| positive(preset.thickness));
        if self.markers.len() != stored {
            log::warn!("Dropped {} invalid marker presets", stored - self.markers.len());
        }
        if self.markers.is_empty() {
            self.markers = defaults.markers;
        }

        if !positive(self.stamp_size) || self.stamp_size > MAX_STAMP_SIZE {
            log::warn!("Ignoring stored sticker size {}", self.stamp_size);
            self.stamp_size = defaults.stamp_size;
        }
        if !positive(self.export_scale) {
            log::warn!("Ignoring stored export scale {}", self.export_scale);
            self.export_scale = defaults.export_scale;
        }
        if self.export_size == 0 || self.export_size > MAX_DIMENSION {
            log::warn!("Ignoring stored export size {}", self.export_size);
            self.export_size = defaults.export_size;
        }

        let name = self.export_file_name.trim();
        if name.is_empty() || name.contains(['/', '\\']) {
            log::warn!("Ignoring stored export file name {:?}", self.export_file_name);
            self.export_file_name = defaults.export_file_name;
        }

        self
    }

    /// Add a sticker to the palette. Returns `false` for blanks and duplicates.
    pub fn add_sticker(&mut self, symbol: &str) -> bool {
        let symbol = symbol.trim();
        if symbol.is_empty() || self.stickers.iter().any(|s| s == symbol) {
            return false;
        }
        self.stickers.push(symbol.to_owned());
        true
    }
}
