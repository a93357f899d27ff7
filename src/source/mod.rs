pub mod geometry;
pub mod loader;

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use geometry::CanvasGeometry;

/// A decoded user image together with its normalized canvas raster.
///
/// Immutable once built; a new load replaces it wholesale.
#[derive(Debug, Clone)]
pub struct SourceImage {
    raw: Vec<u8>,
    natural_width: u32,
    natural_height: u32,
    geometry: CanvasGeometry,
    normalized: RgbaImage,
}

impl SourceImage {
    /// The bytes exactly as supplied by the user.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Decoded natural `(width, height)` before fitting.
    pub fn natural_size(&self) -> (u32, u32) {
        (self.natural_width, self.natural_height)
    }

    pub fn geometry(&self) -> CanvasGeometry {
        self.geometry
    }

    /// The image resized to [`Self::geometry`].
    pub fn normalized(&self) -> &RgbaImage {
        &self.normalized
    }

    /// Encode the normalized raster as PNG (the persisted `original.png`).
    pub fn normalized_png(&self) -> crate::error::Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.normalized.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }
}
