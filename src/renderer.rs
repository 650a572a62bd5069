// src/renderer.rs
use egui::Color32;

use crate::drawable::{DrawableRef, Stroke};
use crate::preview::ToolPreview;
use crate::target::PaintTarget;

/// Replays the committed log onto a paint target.
///
/// The renderer holds no per-frame state: every call clears the target first,
/// so rendering the same inputs twice leaves the target unchanged.
#[derive(Debug, Clone)]
pub struct Renderer {
    background: Color32,
    preview_tint: Color32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            background: Color32::WHITE,
            preview_tint: Color32::from_black_alpha(96),
        }
    }
}

impl Renderer {
    /// Renders the current frame
    ///
    /// Args:
    ///     target: The surface to paint
    ///     committed: The committed log, painted in order (later entries on top)
    ///     in_progress: The stroke currently being drawn, if any
    ///     preview: The tool ghost, painted last
    pub fn render(
        &self,
        target: &mut dyn PaintTarget,
        committed: &[DrawableRef],
        in_progress: Option<&Stroke>,
        preview: Option<&ToolPreview>,
    ) {
        let bounds = target.bounds();
        target.clear(bounds, self.background);

        for drawable in committed {
            drawable.display(target);
        }

        if let Some(stroke) = in_progress {
            stroke.display(target);
        }

        if let Some(preview) = preview {
            preview.display(target, self.preview_tint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::{Drawable, Stamp, INK};
    use crate::target::{DisplayList, PaintOp};
    use egui::Pos2;

    fn sample_log() -> Vec<DrawableRef> {
        let mut a = Stroke::begin(Pos2::new(0.0, 0.0), 2.0);
        a.drag(Pos2::new(10.0, 10.0));
        let b = Stamp::place("⭐", Pos2::new(5.0, 5.0), 0.0, 32.0);
        vec![Drawable::from(a).into_ref(), Drawable::from(b).into_ref()]
    }

    #[test]
    fn test_render_replays_in_log_order() {
        let renderer = Renderer::default();
        let mut list = DisplayList::new(256.0, 256.0);
        renderer.render(&mut list, &sample_log(), None, None);

        let kinds: Vec<&str> = list
            .ops()
            .iter()
            .map(|op| match op {
                PaintOp::Clear { .. } => "clear",
                PaintOp::Path { .. } => "path",
                PaintOp::Dot { .. } => "dot",
                PaintOp::Glyph { .. } => "glyph",
            })
            .collect();
        assert_eq!(kinds, ["clear", "path", "glyph"]);
    }

    #[test]
    fn test_render_is_idempotent() {
        let renderer = Renderer::default();
        let log = sample_log();
        let preview = ToolPreview::Marker {
            position: Pos2::new(20.0, 20.0),
            thickness: 4.0,
        };

        let mut once = DisplayList::new(256.0, 256.0);
        renderer.render(&mut once, &log, None, Some(&preview));

        let mut twice = DisplayList::new(256.0, 256.0);
        renderer.render(&mut twice, &log, None, Some(&preview));
        renderer.render(&mut twice, &log, None, Some(&preview));

        assert_eq!(once, twice);
    }

    #[test]
    fn test_preview_and_in_progress_draw_last() {
        let renderer = Renderer::default();
        let drawing = Stroke::begin(Pos2::new(3.0, 3.0), 8.0);
        let preview = ToolPreview::Stamp {
            symbol: "🐸".to_owned(),
            position: Pos2::new(50.0, 50.0),
            angle: 90.0,
            size: 32.0,
        };

        let mut list = DisplayList::new(256.0, 256.0);
        renderer.render(&mut list, &sample_log(), Some(&drawing), Some(&preview));

        let ops = list.ops();
        assert_eq!(
            ops[ops.len() - 2],
            PaintOp::Dot {
                center: Pos2::new(3.0, 3.0),
                radius: 4.0,
                color: INK,
            }
        );
        assert!(matches!(
            &ops[ops.len() - 1],
            PaintOp::Glyph { symbol, color, .. } if symbol == "🐸" && *color == renderer.preview_tint
        ));
    }
}
