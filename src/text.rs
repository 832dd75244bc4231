//! Text drawn at an angle, centered on a pivot.
//!
//! A rotated rectangle covers more screen area than the unrotated one except
//! at multiples of 90°, so centering has to use the rotated footprint.

use crate::config::TextStyle;
use crate::error::Result;
use crate::geometry::{rotate_point, Point2D, Size};
use crate::surface::Surface;

/// Axis-aligned footprint of a rotated text block. Recomputed on every draw.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotatedTextBox {
    pub width: f64,
    pub height: f64,
}

/// Footprint of a `size` box after rotating it by `angle_degrees` about its
/// top-left corner.
pub fn rotated_bounds(size: Size, angle_degrees: f64) -> RotatedTextBox {
    let corners = [
        Point2D::new(0.0, 0.0),
        Point2D::new(size.width, 0.0),
        Point2D::new(0.0, size.height),
        Point2D::new(size.width, size.height),
    ]
    .map(|corner| rotate_point(corner, angle_degrees));

    let (min_x, max_x, min_y, max_y) = corners.iter().fold(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |(min_x, max_x, min_y, max_y), p| {
            (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
        },
    );
    RotatedTextBox {
        width: max_x - min_x,
        height: max_y - min_y,
    }
}

pub fn measure_rotated<S: Surface + ?Sized>(
    surface: &S,
    text: &str,
    style: &TextStyle,
    angle_degrees: f64,
) -> Result<RotatedTextBox> {
    let size = surface.measure_text(text, style)?;
    Ok(rotated_bounds(size, angle_degrees))
}

/// Draws `text` rotated by `angle_degrees` about `pivot`, offset by half the
/// rotated footprint.
pub fn draw_rotated_text<S: Surface + ?Sized>(
    surface: &mut S,
    text: &str,
    style: &TextStyle,
    angle_degrees: f64,
    pivot: Point2D,
) -> Result<()> {
    let footprint = measure_rotated(&*surface, text, style, angle_degrees)?;
    let origin = Point2D::new(
        pivot.x - footprint.width / 2.0,
        pivot.y - footprint.height / 2.0,
    );
    surface.push_rotation(angle_degrees, pivot);
    let drawn = surface.draw_text(text, origin, style);
    surface.pop_transform()?;
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Color;
    use crate::error::ClockError;
    use crate::geometry::{assert_close, assert_point_close, Affine};
    use crate::scene::{DrawCommand, Scene};
    use crate::surface::{FixedAdvance, Path, Stroke};
    use rand::Rng;

    fn style() -> TextStyle {
        TextStyle::new(20.0, Color::new(0xff, 0xff, 0xff))
    }

    fn scene() -> Scene<FixedAdvance> {
        Scene::new(200.0, 200.0, FixedAdvance::default())
    }

    #[test]
    fn zero_angle_matches_unrotated_size_exactly() {
        let scene = scene();
        let plain = scene.measure_text("45", &style()).unwrap();
        let rotated = measure_rotated(&scene, "45", &style(), 0.0).unwrap();
        assert_eq!(rotated.width, plain.width);
        assert_eq!(rotated.height, plain.height);
    }

    #[test]
    fn half_turn_keeps_size() {
        let size = Size::new(24.0, 24.0 * 1.5);
        let rotated = rotated_bounds(size, 180.0);
        assert_close(rotated.width, size.width);
        assert_close(rotated.height, size.height);
    }

    #[test]
    fn quarter_turns_swap_axes() {
        let size = Size::new(30.0, 12.0);
        for angle in [90.0, 270.0, -90.0] {
            let rotated = rotated_bounds(size, angle);
            assert_close(rotated.width, 12.0);
            assert_close(rotated.height, 30.0);
        }
    }

    #[test]
    fn footprint_never_shrinks_and_is_symmetric_under_half_turns() {
        let mut rng = rand::rng();
        let size = Size::new(37.0, 14.0);
        for _ in 0..200 {
            let angle = rng.random_range(-720.0..720.0);
            let a = rotated_bounds(size, angle);
            let b = rotated_bounds(size, angle + 180.0);
            assert!((a.width - b.width).abs() < 1e-9);
            assert!((a.height - b.height).abs() < 1e-9);
            assert!(a.width * a.height >= size.width * size.height - 1e-6);
        }
    }

    #[test]
    fn forty_five_degrees_grows_footprint() {
        let rotated = rotated_bounds(Size::new(10.0, 10.0), 45.0);
        assert_close(rotated.width, 10.0 * 2f64.sqrt());
        assert_close(rotated.height, 10.0 * 2f64.sqrt());
    }

    fn drawn_top_left(scene: &Scene<FixedAdvance>) -> Point2D {
        match scene.commands() {
            [DrawCommand::Text { top_left, .. }] => *top_left,
            other => panic!("expected a single text command, got {other:?}"),
        }
    }

    #[test]
    fn draw_offsets_by_rotated_footprint_inside_rotation_scope() {
        let mut scene = scene();
        let pivot = Point2D::new(100.0, 60.0);
        draw_rotated_text(&mut scene, "0505", &style(), 90.0, pivot).unwrap();

        let [DrawCommand::Text {
            text,
            top_left,
            transform,
            ..
        }] = scene.commands()
        else {
            panic!("expected a single text command, got {:?}", scene.commands());
        };
        // "0505" is 48x24 unrotated, 24x48 once turned a quarter
        assert_eq!(text, "0505");
        assert_point_close(*top_left, Point2D::new(88.0, 36.0));
        let expected = Affine::rotation_about(90.0, pivot);
        assert_point_close(transform.apply(pivot), pivot);
        assert_point_close(
            transform.apply(Point2D::new(0.0, 0.0)),
            expected.apply(Point2D::new(0.0, 0.0)),
        );
    }

    #[test]
    fn oblique_angle_centers_the_rotated_footprint() {
        let mut scene = scene();
        let pivot = Point2D::new(120.0, 80.0);
        draw_rotated_text(&mut scene, "30", &style(), 30.0, pivot).unwrap();

        let plain = scene.measure_text("30", &style()).unwrap();
        let footprint = rotated_bounds(plain, 30.0);
        assert!(footprint.width > plain.width && footprint.height > plain.height);
        assert_point_close(
            drawn_top_left(&scene),
            Point2D::new(
                pivot.x - footprint.width / 2.0,
                pivot.y - footprint.height / 2.0,
            ),
        );
    }

    /// Records like a `Scene` but refuses to draw text.
    struct TextFails(Scene<FixedAdvance>);

    impl Surface for TextFails {
        fn size(&self) -> Size {
            self.0.size()
        }

        fn draw_line(&mut self, start: Point2D, end: Point2D, stroke: &Stroke) -> Result<()> {
            self.0.draw_line(start, end, stroke)
        }

        fn draw_path(&mut self, path: &Path, stroke: &Stroke) -> Result<()> {
            self.0.draw_path(path, stroke)
        }

        fn draw_text(&mut self, _: &str, _: Point2D, _: &TextStyle) -> Result<()> {
            Err(ClockError::MissingFont)
        }

        fn measure_text(&self, text: &str, style: &TextStyle) -> Result<Size> {
            self.0.measure_text(text, style)
        }

        fn push_transform(&mut self, transform: Affine) {
            self.0.push_transform(transform);
        }

        fn pop_transform(&mut self) -> Result<()> {
            self.0.pop_transform()
        }
    }

    #[test]
    fn draw_error_is_returned_after_the_rotation_scope_closes() {
        let mut surface = TextFails(scene());
        let pivot = Point2D::new(50.0, 50.0);
        let result = draw_rotated_text(&mut surface, "45", &style(), 45.0, pivot);
        assert!(matches!(result, Err(ClockError::MissingFont)));

        // no scope left open: the next draw is unrotated and nothing is left to pop
        let stroke = Stroke::round(Color::new(0, 0, 0), 1.0);
        surface
            .draw_line(Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0), &stroke)
            .unwrap();
        let [DrawCommand::Line { transform, .. }] = surface.0.commands() else {
            panic!("expected one line, got {:?}", surface.0.commands());
        };
        assert!(transform.is_identity());
        assert!(matches!(
            surface.pop_transform(),
            Err(ClockError::UnbalancedTransform)
        ));
    }

    #[test]
    fn unrotated_text_is_centered_on_pivot() {
        let mut scene = scene();
        let pivot = Point2D::new(40.0, 40.0);
        draw_rotated_text(&mut scene, "55", &style(), 0.0, pivot).unwrap();
        let Some(DrawCommand::Text { top_left, .. }) = scene.texts().next() else {
            panic!("no text recorded");
        };
        let size = scene.measure_text("55", &style()).unwrap();
        assert_point_close(
            Point2D::new(top_left.x + size.width / 2.0, top_left.y + size.height / 2.0),
            pivot,
        );
    }
}
