//! The drawing surface the face is composed onto.
//!
//! Two implementations ship with the crate: [`crate::scene::Scene`] records
//! commands for later replay and inspection, [`crate::canvas::Canvas`]
//! rasterizes into an RGBA frame.

use rusttype::{point, Font, Scale};

use crate::config::{Color, TextStyle};
use crate::error::{ClockError, Result};
use crate::geometry::{Affine, Point2D, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub cap: LineCap,
}

impl Stroke {
    pub const fn new(color: Color, width: f32, cap: LineCap) -> Self {
        Self { color, width, cap }
    }

    pub const fn round(color: Color, width: f32) -> Self {
        Self::new(color, width, LineCap::Round)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point2D),
    LineTo(Point2D),
    CubicTo {
        ctrl1: Point2D,
        ctrl2: Point2D,
        to: Point2D,
    },
}

/// Open path made of straight and cubic Bézier segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, to: Point2D) -> &mut Self {
        self.segments.push(PathSegment::MoveTo(to));
        self
    }

    pub fn line_to(&mut self, to: Point2D) -> &mut Self {
        self.segments.push(PathSegment::LineTo(to));
        self
    }

    pub fn cubic_to(&mut self, ctrl1: Point2D, ctrl2: Point2D, to: Point2D) -> &mut Self {
        self.segments.push(PathSegment::CubicTo { ctrl1, ctrl2, to });
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// First point of the path.
    pub fn start(&self) -> Option<Point2D> {
        self.segments.first().map(segment_end)
    }

    /// Point the pen rests on after the last segment.
    pub fn end(&self) -> Option<Point2D> {
        self.segments.last().map(segment_end)
    }

    /// Approximates the path with polylines, one per sub-path.
    /// Each cubic is split into `steps` straight pieces.
    pub fn flatten(&self, steps: usize) -> Vec<Vec<Point2D>> {
        let steps = steps.max(1);
        let mut polylines: Vec<Vec<Point2D>> = Vec::new();
        let mut pen = Point2D::default();
        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(to) => {
                    polylines.push(vec![to]);
                    pen = to;
                }
                PathSegment::LineTo(to) => {
                    current_polyline(&mut polylines, pen).push(to);
                    pen = to;
                }
                PathSegment::CubicTo { ctrl1, ctrl2, to } => {
                    let polyline = current_polyline(&mut polylines, pen);
                    for i in 1..=steps {
                        let t = i as f64 / steps as f64;
                        polyline.push(cubic_point(pen, ctrl1, ctrl2, to, t));
                    }
                    pen = to;
                }
            }
        }
        polylines
    }
}

fn segment_end(segment: &PathSegment) -> Point2D {
    match *segment {
        PathSegment::MoveTo(p) | PathSegment::LineTo(p) => p,
        PathSegment::CubicTo { to, .. } => to,
    }
}

fn current_polyline(polylines: &mut Vec<Vec<Point2D>>, pen: Point2D) -> &mut Vec<Point2D> {
    if polylines.is_empty() {
        polylines.push(vec![pen]);
    }
    let last = polylines.len() - 1;
    &mut polylines[last]
}

fn cubic_point(p0: Point2D, p1: Point2D, p2: Point2D, p3: Point2D, t: f64) -> Point2D {
    let mt = 1.0 - t;
    let (w0, w1, w2, w3) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
    Point2D::new(
        w0 * p0.x + w1 * p1.x + w2 * p2.x + w3 * p3.x,
        w0 * p0.y + w1 * p1.y + w2 * p2.y + w3 * p3.y,
    )
}

/// Unrotated text measurement.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> Result<Size>;
}

/// Measures with real glyph metrics: advance width by `ascent - descent`.
#[derive(Clone, Copy)]
pub struct FontMeasurer<'a> {
    font: &'a Font<'static>,
}

impl<'a> FontMeasurer<'a> {
    pub fn new(font: &'a Font<'static>) -> Self {
        Self { font }
    }
}

impl TextMeasurer for FontMeasurer<'_> {
    fn measure(&self, text: &str, style: &TextStyle) -> Result<Size> {
        let scale = Scale::uniform(style.font_size);
        let v_metrics = self.font.v_metrics(scale);
        let width = self
            .font
            .layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        Ok(Size::new(
            width as f64,
            (v_metrics.ascent - v_metrics.descent) as f64,
        ))
    }
}

/// Monospaced stand-in: every character advances `advance` ems and a line
/// is `line_height` ems tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    pub advance: f64,
    pub line_height: f64,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMeasurer for FixedAdvance {
    fn measure(&self, text: &str, style: &TextStyle) -> Result<Size> {
        let em = style.font_size as f64;
        Ok(Size::new(
            text.chars().count() as f64 * self.advance * em,
            self.line_height * em,
        ))
    }
}

/// Nested transform scopes. The current transform is the composition of
/// everything pushed so far, innermost applied first.
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    stack: Vec<Affine>,
}

impl TransformStack {
    pub fn current(&self) -> Affine {
        self.stack.last().copied().unwrap_or(Affine::IDENTITY)
    }

    pub fn push(&mut self, transform: Affine) {
        let combined = transform.then(self.current());
        self.stack.push(combined);
    }

    pub fn pop(&mut self) -> Result<()> {
        self.stack
            .pop()
            .map(|_| ())
            .ok_or(ClockError::UnbalancedTransform)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Primitive operations the face is drawn with. Coordinates are local to
/// the innermost transform scope.
pub trait Surface {
    fn size(&self) -> Size;

    fn draw_line(&mut self, start: Point2D, end: Point2D, stroke: &Stroke) -> Result<()>;

    fn draw_path(&mut self, path: &Path, stroke: &Stroke) -> Result<()>;

    /// Draws `text` with its unrotated box's top-left corner at `top_left`.
    fn draw_text(&mut self, text: &str, top_left: Point2D, style: &TextStyle) -> Result<()>;

    fn measure_text(&self, text: &str, style: &TextStyle) -> Result<Size>;

    fn push_transform(&mut self, transform: Affine);

    fn pop_transform(&mut self) -> Result<()>;

    /// Opens a scope rotated by `angle_degrees` about `pivot`.
    fn push_rotation(&mut self, angle_degrees: f64, pivot: Point2D) {
        self.push_transform(Affine::rotation_about(angle_degrees, pivot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{assert_close, assert_point_close};

    #[test]
    fn path_reports_start_and_end() {
        let mut path = Path::new();
        path.move_to(Point2D::new(1.0, 2.0))
            .line_to(Point2D::new(5.0, 2.0))
            .cubic_to(
                Point2D::new(4.0, 2.0),
                Point2D::new(4.0, 6.0),
                Point2D::new(5.0, 6.0),
            );
        assert_eq!(path.start(), Some(Point2D::new(1.0, 2.0)));
        assert_eq!(path.end(), Some(Point2D::new(5.0, 6.0)));
        assert_eq!(Path::new().start(), None);
    }

    #[test]
    fn flatten_hits_cubic_endpoints() {
        let mut path = Path::new();
        path.move_to(Point2D::new(0.0, 0.0)).cubic_to(
            Point2D::new(0.0, 10.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(10.0, 0.0),
        );
        let lines = path.flatten(8);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 9);
        assert_point_close(lines[0][8], Point2D::new(10.0, 0.0));
        // symmetric curve peaks halfway at 3/4 of the control height
        assert_point_close(lines[0][4], Point2D::new(5.0, 7.5));
    }

    #[test]
    fn fixed_advance_counts_characters() {
        let size = FixedAdvance::default()
            .measure("05", &TextStyle::new(10.0, Color::new(0, 0, 0)))
            .unwrap();
        assert_close(size.width, 12.0);
        assert_close(size.height, 12.0);
    }

    #[test]
    fn transform_stack_composes_and_detects_imbalance() {
        let mut stack = TransformStack::default();
        stack.push(Affine::translation(10.0, 0.0));
        stack.push(Affine::rotation(90.0));
        // inner rotation first, then the outer translation
        assert_point_close(
            stack.current().apply(Point2D::new(1.0, 0.0)),
            Point2D::new(10.0, 1.0),
        );
        stack.pop().unwrap();
        stack.pop().unwrap();
        assert!(stack.current().is_identity());
        assert!(matches!(stack.pop(), Err(ClockError::UnbalancedTransform)));
    }
}
