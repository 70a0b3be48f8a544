//! Export of the drawing surface to a PNG file.

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageEncoder;
use image::codecs::png::PngEncoder;

use crate::error::Result;
use crate::raster::RasterSurface;

/// Filename used when nothing else is configured.
pub const DEFAULT_FILENAME: &str = "drawing.png";

/// Encode the surface as an RGB8 PNG. Deterministic for equal surfaces.
///
/// # Errors
///
/// Returns [`crate::Error::Encode`] if the encoder rejects the buffer.
pub fn encode_png(surface: &RasterSurface) -> Result<Vec<u8>> {
    let rgb = surface.to_rgb_bytes();
    let mut buf = Vec::with_capacity(rgb.len() / 4);
    PngEncoder::new(&mut buf).write_image(
        &rgb,
        surface.width() as u32,
        surface.height() as u32,
        image::ColorType::Rgb8.into(),
    )?;
    Ok(buf)
}

/// Destination for exported images.
pub trait FileSaver {
    /// Persist `bytes` under `filename`; returns where they ended up.
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Writes exports into a fixed directory, overwriting same-named files.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSaver for DirectorySaver {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        fs::write(&path, bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote export");
        Ok(path)
    }
}
