//! # Sketchpad
//!
//! A freehand drawing surface: pen and eraser strokes on a fixed-size
//! opaque raster, clear, and PNG export.
//!
//! - [`surface::DrawingSurface`] owns the tool settings, the stroke state
//!   machine and the raster, and can be driven headless.
//! - [`app::App`] hosts it in a `minifb` window with a toolbar.

pub mod app;
pub mod config;
pub mod draw;
pub mod error;
pub mod export;
pub mod notify;
pub mod raster;
pub mod surface;
pub mod toolbar;
pub mod types;

pub use error::{Error, Result};
pub use surface::{DrawingSurface, StrokeState};
