//! Animated rotating-dial clock face.
//!
//! [`Clock`] opens a window and runs the face, or renders a single frame to
//! PNG. The drawing core is usable on its own: [`composer::compose_frame`]
//! draws onto any [`surface::Surface`].

pub mod animation;
pub mod canvas;
pub mod composer;
pub mod config;
pub mod dial;
pub mod error;
pub mod geometry;
pub mod overlay;
pub mod scene;
pub mod snapshot;
pub mod surface;
pub mod text;

// External crate imports
use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;

// Standard library imports
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

pub use animation::{AnimationClock, AnimationState, FixedClock, SystemClock, WallClock, WallTime};
pub use config::{ClockConfig, Color, DialConfig, TextStyle};
pub use error::{ClockError, Result};

use canvas::Canvas;
use composer::compose_frame;

/// Main clock struct - the primary public interface
pub struct Clock {
    config: ClockConfig,
    font: Font<'static>,
}

impl Clock {
    pub fn new(config: ClockConfig, font_data: Vec<u8>) -> Result<Self> {
        let font = Font::try_from_vec(font_data).ok_or(ClockError::FontParse)?;
        Ok(Self { config, font })
    }

    /// Reads the font from `path` before building the clock.
    pub fn from_font_file(config: ClockConfig, path: &Path) -> Result<Self> {
        let font_data = std::fs::read(path).map_err(|source| ClockError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(config, font_data)
    }

    /// Opens the window seeded from the local time and runs until closed.
    pub fn show(&self) -> Result<()> {
        self.show_with_clock(&SystemClock)
    }

    pub fn show_with_clock<W: WallClock + ?Sized>(&self, wall: &W) -> Result<()> {
        self.run_window(wall)
    }

    /// Renders a single frame for `wall`'s current time and writes it as PNG.
    pub fn snapshot<W: WallClock + ?Sized>(&self, wall: &W, path: &Path) -> Result<()> {
        let state = AnimationState::seeded(wall.now());
        let (width, height) = (self.config.window_width, self.config.window_height);
        let frame = snapshot::render_rgba(&self.font, &self.config, &state, width, height)?;
        snapshot::write_png_file(path, &frame, width as u32, height as u32)
    }

    fn run_window<W: WallClock + ?Sized>(&self, wall: &W) -> Result<()> {
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                self.config.window_width as f64,
                self.config.window_height as f64,
            ))
            .build(&event_loop)?;

        let window = Arc::new(window);
        let window_clone = Arc::clone(&window);

        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;
        log::info!("opened {fb_width}x{fb_height} clock window");

        // The three schedules and the redraw subscription live in this
        // closure and are dropped together when the loop exits.
        let started = Instant::now();
        let mut animation = AnimationClock::new(wall, 0);
        let redraw_window = Arc::clone(&window);
        animation.set_redraw_hook(move |_| redraw_window.request_redraw());

        event_loop.run(move |event, window_target| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    fb_width = new_size.width as usize;
                    fb_height = new_size.height as usize;
                    if let Err(err) = pixels.resize_buffer(new_size.width, new_size.height) {
                        log::warn!("failed to resize frame buffer: {err}");
                    }
                    if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                        log::warn!("failed to resize surface: {err}");
                    }
                    window_clone.request_redraw();
                }
                WindowEvent::RedrawRequested => {
                    let state = animation.state();
                    let frame = pixels.frame_mut();
                    let mut canvas = Canvas::new(frame, fb_width, fb_height).with_font(&self.font);
                    canvas.clear(self.config.background_color);
                    if let Err(err) = compose_frame(&mut canvas, &state, &self.config) {
                        log::error!("failed to compose frame: {err}");
                        window_target.exit();
                        return;
                    }
                    if let Err(err) = pixels.render() {
                        log::error!("failed to present frame: {err}");
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                let now_ms = started.elapsed().as_millis() as u64;
                animation.advance(now_ms);
                let next_due = started + Duration::from_millis(animation.next_due_ms());
                window_target.set_control_flow(ControlFlow::WaitUntil(next_due));
            }
            _ => {}
        })?;

        Ok(())
    }
}
