//! Headless rendering of a single frame to PNG.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use rusttype::Font;

use crate::animation::AnimationState;
use crate::canvas::Canvas;
use crate::composer::compose_frame;
use crate::config::ClockConfig;
use crate::error::{ClockError, Result};

/// Renders one frame into a fresh RGBA8 buffer of `width × height`.
pub fn render_rgba(
    font: &Font<'static>,
    config: &ClockConfig,
    state: &AnimationState,
    width: usize,
    height: usize,
) -> Result<Vec<u8>> {
    let mut frame = vec![0u8; width * height * 4];
    let mut canvas = Canvas::new(&mut frame, width, height).with_font(font);
    canvas.clear(config.background_color);
    compose_frame(&mut canvas, state, config)?;
    Ok(frame)
}

pub fn write_png_file(path: &Path, frame: &[u8], width: u32, height: u32) -> Result<()> {
    let file = File::create(path).map_err(|source| ClockError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_png(BufWriter::new(file), frame, width, height)?;
    log::info!("wrote {width}x{height} snapshot to {}", path.display());
    Ok(())
}

pub(crate) fn write_png<W: io::Write>(
    w: W,
    frame: &[u8],
    width: u32,
    height: u32,
) -> std::result::Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(frame)?;
    writer.finish()
}
