use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while drawing or hosting the clock face.
///
/// Degenerate geometry is not an error: a dial with a non-positive radius or
/// a zero-sized surface simply draws nothing.
#[derive(Debug, Error)]
pub enum ClockError {
    #[error("font data could not be parsed")]
    FontParse,

    #[error("surface has no font loaded, cannot measure or draw text")]
    MissingFont,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("pixel surface error: {0}")]
    Pixels(#[from] pixels::Error),

    #[error("png encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    #[error("invalid time {0:?}, expected HH:MM:SS")]
    InvalidTime(String),

    #[error("pop_transform called without a matching push")]
    UnbalancedTransform,
}

pub type Result<T> = std::result::Result<T, ClockError>;
