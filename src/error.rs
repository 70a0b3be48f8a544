// Crate error type. Every variant states *where* things went wrong.
use thiserror::Error;

/// Result type for sketchpad operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed.
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Pushing the screen buffer to the window failed.
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// A colour string was not `#RRGGBB`.
    #[error("Invalid color {0:?}: expected #RRGGBB")]
    InvalidColor(String),

    /// A surface was requested with a zero side.
    #[error("Invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// PNG encoding of the surface failed.
    #[error("Image encode error: {0}")]
    Encode(#[from] image::ImageError),

    /// Writing the exported file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
