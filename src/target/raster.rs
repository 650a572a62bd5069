use std::sync::OnceLock;

use ab_glyph::{Font as _, FontArc, FontVec, OutlinedGlyph, PxScale, ScaleFont as _, point};
use egui::{Color32, FontDefinitions, FontFamily, Pos2, Rect, Vec2};
use image::RgbaImage;

use super::PaintTarget;
use crate::error::{SketchError, SketchResult};
use crate::geometry::{calculate_bounds, distance_to_line_segment, rotate};

/// Largest edge, in pixels, of any offscreen buffer (surface or glyph bitmap)
pub const MAX_DIMENSION: u32 = 8192;

/// Allocate `len` copies of `value` without aborting when memory runs out
fn try_filled<T: Clone>(value: T, len: usize) -> SketchResult<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|err| SketchError::Resource(format!("cannot allocate {len} elements: {err}")))?;
    buffer.resize(len, value);
    Ok(buffer)
}

/// Pixel rows and columns covered by a rect
#[derive(Debug, Clone, Copy)]
struct Span {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl Span {
    fn width(&self) -> usize {
        (self.x1 - self.x0) as usize
    }

    fn height(&self) -> usize {
        (self.y1 - self.y0) as usize
    }

    fn pixels(self) -> impl Iterator<Item = (u32, u32)> {
        (self.y0..self.y1).flat_map(move |y| (self.x0..self.x1).map(move |x| (x, y)))
    }
}

fn pixel_center(x: u32, y: u32) -> Pos2 {
    Pos2::new(x as f32 + 0.5, y as f32 + 0.5)
}

/// Anti-aliased coverage of a pixel whose center is `distance` from a shape of
/// the given half-width
fn coverage(half_width: f32, distance: f32) -> f32 {
    (half_width + 0.5 - distance).clamp(0.0, 1.0)
}

/// Offscreen RGBA surface, one pixel per unit.
///
/// Paint calls can't report errors, so the first allocation failure is kept
/// and handed back by [`RasterTarget::into_image`].
pub struct RasterTarget {
    image: RgbaImage,
    failure: Option<SketchError>,
}

impl RasterTarget {
    /// Allocate a transparent `width × height` surface
    pub fn try_new(width: u32, height: u32) -> SketchResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(SketchError::Resource(format!(
                "{width}x{height} is not a usable surface size"
            )));
        }

        let pixels = try_filled(0u8, width as usize * height as usize * 4)?;
        let image = RgbaImage::from_raw(width, height, pixels)
            .ok_or_else(|| SketchError::Resource("surface buffer has the wrong size".to_owned()))?;

        Ok(Self {
            image,
            failure: None,
        })
    }

    /// The finished image, or the first failure hit while painting
    pub fn into_image(self) -> SketchResult<RgbaImage> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.image),
        }
    }

    fn fail(&mut self, err: SketchError) {
        log::error!("Raster paint failed: {err}");
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }

    /// Pixels touched by `rect`, clipped to the surface
    fn span(&self, rect: Rect) -> Option<Span> {
        if !rect.is_finite() {
            return None;
        }
        let (width, height) = self.image.dimensions();
        let x0 = rect.min.x.floor().clamp(0.0, width as f32) as u32;
        let y0 = rect.min.y.floor().clamp(0.0, height as f32) as u32;
        let x1 = rect.max.x.ceil().clamp(0.0, width as f32) as u32;
        let y1 = rect.max.y.ceil().clamp(0.0, height as f32) as u32;
        (x0 < x1 && y0 < y1).then_some(Span { x0, y0, x1, y1 })
    }

    /// Source-over blend of `color` at `amount` coverage
    fn blend(&mut self, x: u32, y: u32, color: [u8; 4], amount: f32) {
        let alpha = color[3] as f32 / 255.0 * amount.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }

        let pixel = self.image.get_pixel_mut(x, y);
        for channel in 0..3 {
            let mixed = color[channel] as f32 * alpha + pixel[channel] as f32 * (1.0 - alpha);
            pixel[channel] = mixed.round() as u8;
        }
        let dst_alpha = pixel[3] as f32 / 255.0;
        pixel[3] = ((alpha + dst_alpha * (1.0 - alpha)) * 255.0).round() as u8;
    }
}

impl PaintTarget for RasterTarget {
    fn bounds(&self) -> Rect {
        let (width, height) = self.image.dimensions();
        Rect::from_min_size(Pos2::ZERO, Vec2::new(width as f32, height as f32))
    }

    fn clear(&mut self, bounds: Rect, color: Color32) {
        let Some(span) = self.span(bounds) else {
            return;
        };
        let fill = image::Rgba(color.to_srgba_unmultiplied());
        for (x, y) in span.pixels() {
            self.image.put_pixel(x, y, fill);
        }
    }

    fn draw_path(&mut self, points: &[Pos2], thickness: f32, color: Color32) {
        let half = thickness / 2.0;
        if points.is_empty() || !half.is_finite() || half <= 0.0 {
            return;
        }
        let Some(span) = self.span(calculate_bounds(points, half + 1.0)) else {
            return;
        };

        // Coverage is merged with max() so joints don't get painted twice
        let mut mask = match try_filled(0.0f32, span.width() * span.height()) {
            Ok(mask) => mask,
            Err(err) => return self.fail(err),
        };

        let segments: Vec<(Pos2, Pos2)> = match points {
            [point] => vec![(*point, *point)],
            points => points.windows(2).map(|pair| (pair[0], pair[1])).collect(),
        };
        for (start, end) in segments {
            let Some(segment) = self.span(calculate_bounds(&[start, end], half + 1.0)) else {
                continue;
            };
            for (x, y) in segment.pixels() {
                let distance = distance_to_line_segment(pixel_center(x, y), start, end);
                let index = (y - span.y0) as usize * span.width() + (x - span.x0) as usize;
                mask[index] = mask[index].max(coverage(half, distance));
            }
        }

        let rgba = color.to_srgba_unmultiplied();
        for (x, y) in span.pixels() {
            let index = (y - span.y0) as usize * span.width() + (x - span.x0) as usize;
            self.blend(x, y, rgba, mask[index]);
        }
    }

    fn draw_dot(&mut self, center: Pos2, radius: f32, color: Color32) {
        if !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let rect = Rect::from_center_size(center, Vec2::splat(2.0 * (radius + 1.0)));
        let Some(span) = self.span(rect) else {
            return;
        };

        let rgba = color.to_srgba_unmultiplied();
        for (x, y) in span.pixels() {
            let distance = (pixel_center(x, y) - center).length();
            self.blend(x, y, rgba, coverage(radius, distance));
        }
    }

    fn draw_glyph(&mut self, symbol: &str, anchor: Pos2, size: f32, angle: f32, color: Color32) {
        let bitmap = match GlyphFonts::shared().rasterize(symbol, size) {
            Ok(Some(bitmap)) => bitmap,
            Ok(None) => return,
            Err(err) => return self.fail(err),
        };

        // A whole-pixel center keeps rotated lookups off texel edges
        let center = Vec2::new((bitmap.width / 2) as f32, (bitmap.height / 2) as f32);
        let reach = Vec2::new(bitmap.width as f32, bitmap.height as f32).length() / 2.0 + 1.0;
        let Some(span) = self.span(Rect::from_center_size(anchor, Vec2::splat(2.0 * reach))) else {
            return;
        };

        // Walk the destination and look each pixel up in the upright bitmap
        let rgba = color.to_srgba_unmultiplied();
        for (x, y) in span.pixels() {
            let source = rotate(pixel_center(x, y) - anchor, -angle) + center;
            let amount = bitmap.sample(source.x, source.y);
            if amount > 0.0 {
                self.blend(x, y, rgba, amount);
            }
        }
    }
}

/// Upright glyph coverage, one value per pixel
struct GlyphBitmap {
    width: usize,
    height: usize,
    coverage: Vec<f32>,
}

impl GlyphBitmap {
    fn sample(&self, x: f32, y: f32) -> f32 {
        if !(x >= 0.0 && y >= 0.0) {
            return 0.0;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.coverage[y * self.width + x]
    }
}

/// egui's bundled fonts, loaded for ab_glyph so exported stickers match the screen
struct GlyphFonts {
    /// In fallback order: the first font that has a character draws it
    fonts: Vec<FontArc>,
}

impl GlyphFonts {
    fn shared() -> &'static GlyphFonts {
        static FONTS: OnceLock<GlyphFonts> = OnceLock::new();
        FONTS.get_or_init(GlyphFonts::load)
    }

    fn load() -> Self {
        let definitions = FontDefinitions::default();
        let names = definitions
            .families
            .get(&FontFamily::Proportional)
            .cloned()
            .unwrap_or_default();

        let fonts: Vec<FontArc> = names
            .iter()
            .filter_map(|name| {
                let data = definitions.font_data.get(name)?;
                match FontVec::try_from_vec_and_index(data.font.to_vec(), data.index) {
                    Ok(font) => Some(FontArc::new(font)),
                    Err(err) => {
                        log::warn!("Skipping font {name}: {err}");
                        None
                    }
                }
            })
            .collect();

        log::debug!("Loaded {} fonts for sticker export", fonts.len());
        Self { fonts }
    }

    /// Lay out `symbol` on one line at `size` px and rasterize its coverage.
    ///
    /// Returns `None` when nothing in the symbol has ink.
    fn rasterize(&self, symbol: &str, size: f32) -> SketchResult<Option<GlyphBitmap>> {
        if !size.is_finite() || size > MAX_DIMENSION as f32 {
            return Err(SketchError::Resource(format!("glyph size {size} is too large")));
        }
        if size <= 0.0 {
            return Ok(None);
        }

        let scale = PxScale::from(size);
        let mut caret = 0.0;
        let mut outlines: Vec<OutlinedGlyph> = Vec::new();
        for ch in symbol.chars() {
            // Variation selectors and joiners have no glyph anywhere
            let Some(font) = self.fonts.iter().find(|font| font.glyph_id(ch).0 != 0) else {
                continue;
            };
            let id = font.glyph_id(ch);
            let glyph = id.with_scale_and_position(scale, point(caret, 0.0));
            caret += font.as_scaled(scale).h_advance(id);
            if let Some(outline) = font.outline_glyph(glyph) {
                outlines.push(outline);
            }
        }

        let Some(bounds) = outlines
            .iter()
            .map(OutlinedGlyph::px_bounds)
            .reduce(|a, b| ab_glyph::Rect {
                min: point(a.min.x.min(b.min.x), a.min.y.min(b.min.y)),
                max: point(a.max.x.max(b.max.x), a.max.y.max(b.max.y)),
            })
        else {
            return Ok(None);
        };

        let width = (bounds.max.x - bounds.min.x).ceil();
        let height = (bounds.max.y - bounds.min.y).ceil();
        if width > MAX_DIMENSION as f32 || height > MAX_DIMENSION as f32 {
            return Err(SketchError::Resource(format!(
                "glyph bitmap {width}x{height} is too large"
            )));
        }
        let (width, height) = (width as usize, height as usize);
        let mut coverage = try_filled(0.0f32, width * height)?;

        for outline in &outlines {
            let glyph_bounds = outline.px_bounds();
            let left = (glyph_bounds.min.x - bounds.min.x) as usize;
            let top = (glyph_bounds.min.y - bounds.min.y) as usize;
            outline.draw(|px, py, amount| {
                let (x, y) = (left + px as usize, top + py as usize);
                if x < width && y < height {
                    let cell = &mut coverage[y * width + x];
                    *cell = (*cell + amount).min(1.0);
                }
            });
        }

        Ok(Some(GlyphBitmap {
            width,
            height,
            coverage,
        }))
    }
}
