//! One ring of 60 ticks with a label on every fifth.

use crate::config::DialConfig;
use crate::error::Result;
use crate::geometry::{point_on_circle, Point2D};
use crate::surface::{Stroke, Surface};
use crate::text::draw_rotated_text;

pub const TICK_COUNT: usize = 60;
pub const TICK_ANGLE_STEP_DEG: f64 = 360.0 / TICK_COUNT as f64;
/// Every fifth tick is longer and labeled.
pub const EMPHASIS_INTERVAL: usize = 5;

/// Angle of tick `step_index` on a dial turned by `dial_rotation_deg`.
pub fn step_angle_deg(step_index: usize, dial_rotation_deg: f64) -> f64 {
    step_index as f64 * TICK_ANGLE_STEP_DEG + dial_rotation_deg
}

pub fn is_emphasis(step_index: usize) -> bool {
    step_index % EMPHASIS_INTERVAL == 0
}

/// Two-digit label, `3 -> "03"`.
pub fn step_label(step_index: usize) -> String {
    format!("{:02}", step_index)
}

/// Draws a ring of 60 ticks around `center`, labeling every fifth one.
/// A non-positive radius draws nothing.
pub fn draw_dial<S: Surface + ?Sized>(
    surface: &mut S,
    center: Point2D,
    radius: f64,
    dial_rotation_deg: f64,
    config: &DialConfig,
) -> Result<()> {
    if radius.is_nan() || radius <= 0.0 {
        log::debug!("skipping dial with degenerate radius {radius}");
        return Ok(());
    }

    let stroke = Stroke::round(config.tick_color, config.tick_stroke_width);
    for step_index in 0..TICK_COUNT {
        let angle = step_angle_deg(step_index, dial_rotation_deg).to_radians();
        let emphasis = is_emphasis(step_index);
        let tick_length = if emphasis {
            config.emphasis_tick_length
        } else {
            config.normal_tick_length
        };

        // tick end may cross the center when tick_length > radius
        let start = point_on_circle(center, radius, angle);
        let end = point_on_circle(center, radius - tick_length, angle);
        surface.draw_line(start, end, &stroke)?;

        if emphasis {
            draw_step_label(
                surface,
                center,
                radius,
                step_index,
                tick_length,
                dial_rotation_deg,
                config,
            )?;
        }
    }
    Ok(())
}

/// Label just inside the tick, counter-rotated by the tick's own angle.
pub fn draw_step_label<S: Surface + ?Sized>(
    surface: &mut S,
    center: Point2D,
    radius: f64,
    step_index: usize,
    tick_length: f64,
    dial_rotation_deg: f64,
    config: &DialConfig,
) -> Result<()> {
    let angle = step_angle_deg(step_index, dial_rotation_deg).to_radians();
    let pivot = point_on_circle(
        center,
        radius - tick_length - config.label_top_padding,
        angle,
    );
    let rotation = -(step_index as f64 * TICK_ANGLE_STEP_DEG) - dial_rotation_deg;
    draw_rotated_text(
        surface,
        &step_label(step_index),
        &config.label_style,
        rotation,
        pivot,
    )
}
