//! Raster surface over an RGBA8 frame buffer.

use rusttype::{point, Font, Scale};

use crate::config::{Color, TextStyle};
use crate::error::{ClockError, Result};
use crate::geometry::{Affine, Point2D, Size};
use crate::surface::{
    FontMeasurer, LineCap, Path, Stroke, Surface, TextMeasurer, TransformStack,
};

/// Pieces each cubic segment is flattened into.
const CURVE_STEPS: usize = 24;

/// RGBA8 frame with an optional font for text.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
    font: Option<&'a Font<'static>>,
    transforms: TransformStack,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
            font: None,
            transforms: TransformStack::default(),
        }
    }

    pub fn with_font(mut self, font: &'a Font<'static>) -> Self {
        self.font = Some(font);
        self
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// RGBA value at `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let px = self.frame.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    fn set_pixel(&mut self, x: i64, y: i64, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let Some(dst) = self.frame.get_mut(idx..idx + 4) else {
            return;
        };
        let a = alpha.clamp(0.0, 1.0);
        let blend = |src: u8, dst: u8| (src as f32 * a + dst as f32 * (1.0 - a)).round() as u8;
        dst[0] = blend(color.r, dst[0]);
        dst[1] = blend(color.g, dst[1]);
        dst[2] = blend(color.b, dst[2]);
        dst[3] = 0xff;
    }

    /// Spreads one coverage sample over the four nearest pixels.
    fn draw_antialiased_pixel(&mut self, p: Point2D, color: Color, alpha: f32) {
        let x_floor = p.x.floor();
        let y_floor = p.y.floor();
        let x_frac = p.x - x_floor;
        let y_frac = p.y - y_floor;
        let (x0, y0) = (x_floor as i64, y_floor as i64);

        let samples = [
            (x0, y0, (1.0 - x_frac) * (1.0 - y_frac)),
            (x0 + 1, y0, x_frac * (1.0 - y_frac)),
            (x0, y0 + 1, (1.0 - x_frac) * y_frac),
            (x0 + 1, y0 + 1, x_frac * y_frac),
        ];
        for (px, py, weight) in samples {
            let final_alpha = alpha * weight as f32;
            if final_alpha > 0.001 {
                self.set_pixel(px, py, color, final_alpha);
            }
        }
    }

    /// Anti-aliased segment in device coordinates.
    fn draw_thick_line_aa(
        &mut self,
        p0: Point2D,
        p1: Point2D,
        thickness: f32,
        cap: LineCap,
        color: Color,
    ) {
        let half = thickness as f64 / 2.0;
        let pad = half.ceil() + 1.0;
        let min_x = (p0.x.min(p1.x) - pad).floor().max(0.0) as i64;
        let max_x = (p0.x.max(p1.x) + pad).ceil().min(self.width as f64 - 1.0) as i64;
        let min_y = (p0.y.min(p1.y) - pad).floor().max(0.0) as i64;
        let max_y = (p0.y.max(p1.y) + pad).ceil().min(self.height as f64 - 1.0) as i64;

        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let len_sq = dx * dx + dy * dy;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let (cx, cy) = (x as f64 + 0.5, y as f64 + 0.5);
                let raw_t = if len_sq > 0.0 {
                    ((cx - p0.x) * dx + (cy - p0.y) * dy) / len_sq
                } else {
                    0.0
                };
                if cap == LineCap::Butt && !(0.0..=1.0).contains(&raw_t) {
                    continue;
                }
                let t = raw_t.clamp(0.0, 1.0);
                let (lx, ly) = (p0.x + t * dx, p0.y + t * dy);
                let dist = ((lx - cx).powi(2) + (ly - cy).powi(2)).sqrt();
                let aa = (1.0 - (dist - half).clamp(0.0, 1.0)) as f32;
                if aa > 0.01 {
                    self.set_pixel(x, y, color, aa);
                }
            }
        }
    }
}

impl Surface for Canvas<'_> {
    fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    fn draw_line(&mut self, start: Point2D, end: Point2D, stroke: &Stroke) -> Result<()> {
        let transform = self.transforms.current();
        self.draw_thick_line_aa(
            transform.apply(start),
            transform.apply(end),
            stroke.width,
            stroke.cap,
            stroke.color,
        );
        Ok(())
    }

    fn draw_path(&mut self, path: &Path, stroke: &Stroke) -> Result<()> {
        let transform = self.transforms.current();
        for polyline in path.flatten(CURVE_STEPS) {
            for pair in polyline.windows(2) {
                // joints are covered by round caps of the neighbouring pieces
                self.draw_thick_line_aa(
                    transform.apply(pair[0]),
                    transform.apply(pair[1]),
                    stroke.width,
                    LineCap::Round,
                    stroke.color,
                );
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, top_left: Point2D, style: &TextStyle) -> Result<()> {
        let font = self.font.ok_or(ClockError::MissingFont)?;
        let transform = self.transforms.current();
        let scale = Scale::uniform(style.font_size);
        let v_metrics = font.v_metrics(scale);
        let origin = point(top_left.x as f32, top_left.y as f32 + v_metrics.ascent);
        for glyph in font.layout(text, scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                if coverage > 0.001 {
                    let local = Point2D::new(
                        (bb.min.x + gx as i32) as f64,
                        (bb.min.y + gy as i32) as f64,
                    );
                    self.draw_antialiased_pixel(transform.apply(local), style.color, coverage);
                }
            });
        }
        Ok(())
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> Result<Size> {
        let font = self.font.ok_or(ClockError::MissingFont)?;
        FontMeasurer::new(font).measure(text, style)
    }

    fn push_transform(&mut self, transform: Affine) {
        self.transforms.push(transform);
    }

    fn pop_transform(&mut self) -> Result<()> {
        self.transforms.pop()
    }
}
