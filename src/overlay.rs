//! The notch that joins the hour label to the tick labels at three o'clock.

use crate::config::ClockConfig;
use crate::error::Result;
use crate::geometry::{point_on_circle, Point2D};
use crate::surface::{Path, Surface};

/// Half the angular opening of the notch around three o'clock.
pub const OVERLAY_HALF_ANGLE_DEG: f64 = 8.0;
/// Widest label a dial can show, measured to reserve room for any digit set.
pub const WIDEST_LABEL: &str = "60";

/// Builds the open notch path. The caller strokes it.
///
/// The path runs from the outer ring at +8° horizontally to the vertical
/// notch line, curves down to the height of the −8° point, and returns to
/// the ring at −8°.
pub fn build_overlay_path<S: Surface + ?Sized>(
    surface: &S,
    center: Point2D,
    outer_radius: f64,
    config: &ClockConfig,
    surface_width: f64,
) -> Result<Path> {
    let start = point_on_circle(center, outer_radius, OVERLAY_HALF_ANGLE_DEG.to_radians());
    let end = point_on_circle(center, outer_radius, (-OVERLAY_HALF_ANGLE_DEG).to_radians());
    let overlay_radius = (end.y - start.y) / 2.0;

    let seconds = &config.seconds_dial;
    let minutes = &config.minutes_dial;
    let seconds_label_max_width = surface.measure_text(WIDEST_LABEL, &seconds.label_style)?.width;
    let minutes_label_max_width = surface.measure_text(WIDEST_LABEL, &minutes.label_style)?.width;

    let overlay_line_x = surface_width
        - seconds.emphasis_tick_length
        - seconds.label_top_padding
        - seconds_label_max_width
        - minutes.emphasis_tick_length
        - minutes.label_top_padding
        - minutes_label_max_width / 2.0;

    let mut path = Path::new();
    path.move_to(start)
        .line_to(Point2D::new(overlay_line_x, start.y))
        .cubic_to(
            Point2D::new(overlay_line_x - overlay_radius, start.y),
            Point2D::new(overlay_line_x - overlay_radius, end.y),
            Point2D::new(overlay_line_x, end.y),
        )
        .line_to(end);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{assert_close, assert_point_close};
    use crate::scene::Scene;
    use crate::surface::{FixedAdvance, PathSegment};

    fn scene() -> Scene<FixedAdvance> {
        Scene::new(480.0, 480.0, FixedAdvance::default())
    }

    #[test]
    fn starts_and_ends_on_the_outer_ring() {
        let config = ClockConfig::default();
        let center = Point2D::new(240.0, 240.0);
        for radius in [40.0, 120.0, 240.0] {
            let path = build_overlay_path(&scene(), center, radius, &config, 480.0).unwrap();
            let start = point_on_circle(center, radius, 8f64.to_radians());
            let end = point_on_circle(center, radius, (-8f64).to_radians());
            assert_point_close(path.start().unwrap(), start);
            assert_point_close(path.end().unwrap(), end);
            assert!(start.y < center.y && end.y > center.y);
        }
    }

    #[test]
    fn notch_line_reserves_room_for_both_labels() {
        let config = ClockConfig::default();
        let scene = scene();
        let center = Point2D::new(240.0, 240.0);
        let path = build_overlay_path(&scene, center, 240.0, &config, 480.0).unwrap();

        let measurer = FixedAdvance::default();
        let label_width = |size: f32| 2.0 * measurer.advance * size as f64;
        let seconds_width = label_width(config.seconds_dial.label_style.font_size);
        let minutes_width = label_width(config.minutes_dial.label_style.font_size);
        let expected_x = 480.0
            - config.seconds_dial.emphasis_tick_length
            - config.seconds_dial.label_top_padding
            - seconds_width
            - config.minutes_dial.emphasis_tick_length
            - config.minutes_dial.label_top_padding
            - minutes_width / 2.0;

        let segments = path.segments();
        assert_eq!(segments.len(), 4);
        let PathSegment::LineTo(corner) = segments[1] else {
            panic!("expected a line to the notch, got {:?}", segments[1]);
        };
        assert_close(corner.x, expected_x);
        assert_close(corner.y, path.start().unwrap().y);

        let PathSegment::CubicTo { ctrl1, ctrl2, to } = segments[2] else {
            panic!("expected the notch curve, got {:?}", segments[2]);
        };
        let overlay_radius = 240.0 * 8f64.to_radians().sin();
        assert_close(ctrl1.x, expected_x - overlay_radius);
        assert_close(ctrl2.x, expected_x - overlay_radius);
        assert_close(to.x, expected_x);
        assert_close(to.y, path.end().unwrap().y);
    }
}
