//! Paint targets: the surfaces drawables are replayed onto.
//!
//! Coordinates are canvas-local points. A target decides what a point maps
//! to: screen pixels for [`PainterTarget`], image pixels for [`RasterTarget`].

use egui::{Color32, Pos2, Rect, Vec2};

mod painter;
mod raster;

pub use painter::PainterTarget;
pub use raster::{MAX_DIMENSION, RasterTarget};

/// An opaque 2D surface with the handful of primitives drawables need
pub trait PaintTarget {
    /// The drawable area in canvas coordinates
    fn bounds(&self) -> Rect;

    /// Fill `bounds` with `color`, discarding whatever was painted there
    fn clear(&mut self, bounds: Rect, color: Color32);

    /// Connected poly-line through `points`, in order
    fn draw_path(&mut self, points: &[Pos2], thickness: f32, color: Color32);

    fn draw_dot(&mut self, center: Pos2, radius: f32, color: Color32);

    /// A glyph of height `size` centered on `anchor`, turned clockwise by
    /// `angle` degrees around it
    fn draw_glyph(&mut self, symbol: &str, anchor: Pos2, size: f32, angle: f32, color: Color32);
}

/// A recorded paint call
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Clear {
        rect: Rect,
        color: Color32,
    },
    Path {
        points: Vec<Pos2>,
        thickness: f32,
        color: Color32,
    },
    Dot {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
    Glyph {
        symbol: String,
        anchor: Pos2,
        size: f32,
        angle: f32,
        color: Color32,
    },
}

/// Records paint calls instead of drawing them.
///
/// A clear throws away everything recorded so far, the same way it would wipe
/// pixels, so the list always describes what is currently visible.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    size: Vec2,
    ops: Vec<PaintOp>,
}

impl DisplayList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Everything except clears
    pub fn ink(&self) -> impl Iterator<Item = &PaintOp> {
        self.ops
            .iter()
            .filter(|op| !matches!(op, PaintOp::Clear { .. }))
    }
}

impl PaintTarget for DisplayList {
    fn bounds(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.size)
    }

    fn clear(&mut self, rect: Rect, color: Color32) {
        if rect.contains_rect(self.bounds()) {
            self.ops.clear();
        }
        self.ops.push(PaintOp::Clear { rect, color });
    }

    fn draw_path(&mut self, points: &[Pos2], thickness: f32, color: Color32) {
        self.ops.push(PaintOp::Path {
            points: points.to_vec(),
            thickness,
            color,
        });
    }

    fn draw_dot(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.ops.push(PaintOp::Dot {
            center,
            radius,
            color,
        });
    }

    fn draw_glyph(&mut self, symbol: &str, anchor: Pos2, size: f32, angle: f32, color: Color32) {
        self.ops.push(PaintOp::Glyph {
            symbol: symbol.to_owned(),
            anchor,
            size,
            angle,
            color,
        });
    }
}

/// Forwards to another target with every coordinate and size multiplied by
/// `scale`. Angles are left alone.
pub struct Scaled<'a> {
    inner: &'a mut dyn PaintTarget,
    scale: f32,
}

impl<'a> Scaled<'a> {
    pub fn new(inner: &'a mut dyn PaintTarget, scale: f32) -> Self {
        Self { inner, scale }
    }

    fn to_inner(&self, pos: Pos2) -> Pos2 {
        Pos2::new(pos.x * self.scale, pos.y * self.scale)
    }
}

impl PaintTarget for Scaled<'_> {
    fn bounds(&self) -> Rect {
        let inner = self.inner.bounds();
        Rect::from_min_max(
            Pos2::new(inner.min.x / self.scale, inner.min.y / self.scale),
            Pos2::new(inner.max.x / self.scale, inner.max.y / self.scale),
        )
    }

    fn clear(&mut self, bounds: Rect, color: Color32) {
        let rect = Rect::from_min_max(self.to_inner(bounds.min), self.to_inner(bounds.max));
        self.inner.clear(rect, color);
    }

    fn draw_path(&mut self, points: &[Pos2], thickness: f32, color: Color32) {
        let points: Vec<Pos2> = points.iter().map(|p| self.to_inner(*p)).collect();
        self.inner.draw_path(&points, thickness * self.scale, color);
    }

    fn draw_dot(&mut self, center: Pos2, radius: f32, color: Color32) {
        let center = self.to_inner(center);
        self.inner.draw_dot(center, radius * self.scale, color);
    }

    fn draw_glyph(&mut self, symbol: &str, anchor: Pos2, size: f32, angle: f32, color: Color32) {
        let anchor = self.to_inner(anchor);
        self.inner
            .draw_glyph(symbol, anchor, size * self.scale, angle, color);
    }
}
