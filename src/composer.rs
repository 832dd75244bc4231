//! Lays out both rings, the hour label and the overlay for one frame.

use crate::animation::AnimationState;
use crate::config::ClockConfig;
use crate::dial::draw_dial;
use crate::error::Result;
use crate::geometry::Point2D;
use crate::overlay::build_overlay_path;
use crate::surface::{Stroke, Surface};

/// Zero-padded hour text, `7 -> "07"`.
pub fn hour_label(hour: u8) -> String {
    format!("{:02}", hour)
}

/// Draws one complete frame: seconds ring, minutes ring, hour label and the
/// overlay notch. A zero-sized surface draws nothing.
pub fn compose_frame<S: Surface + ?Sized>(
    surface: &mut S,
    state: &AnimationState,
    config: &ClockConfig,
) -> Result<()> {
    let size = surface.size();
    if size.is_empty() {
        log::debug!("skipping frame on empty surface {size:?}");
        return Ok(());
    }
    log::trace!("composing frame for {state:?}");

    let center = Point2D::new(size.width / 2.0, size.height / 2.0);
    let outer_radius = size.width.min(size.height) / 2.0;
    let inner_radius = outer_radius - config.inner_dial_inset;

    draw_dial(
        surface,
        center,
        outer_radius,
        state.second_rotation_deg,
        &config.seconds_dial,
    )?;
    draw_dial(
        surface,
        center,
        inner_radius,
        state.minute_rotation_deg,
        &config.minutes_dial,
    )?;

    let hour = hour_label(state.hour);
    let hour_size = surface.measure_text(&hour, &config.hour_label_style)?;
    let top_left = Point2D::new(
        center.x - hour_size.width / 2.0,
        center.y - hour_size.height / 2.0,
    );
    surface.draw_text(&hour, top_left, &config.hour_label_style)?;

    let overlay = build_overlay_path(&*surface, center, outer_radius, config, size.width)?;
    surface.draw_path(
        &overlay,
        &Stroke::round(config.overlay_stroke_color, config.overlay_stroke_width),
    )
}
