pub mod export;
pub mod rasterizer;

use std::io::Cursor;

use image::{GrayImage, ImageFormat};
use sha2::{Digest, Sha256};

use crate::source::geometry::CanvasGeometry;

/// Single-channel mask: 255 where painted, 0 elsewhere (anti-aliased
/// stroke rims fall in between).
///
/// Self-contained snapshot of the strokes at generation time; later
/// edits on the surface do not reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskImage {
    pixels: GrayImage,
}

impl MaskImage {
    pub(crate) fn from_gray(pixels: GrayImage) -> Self {
        Self { pixels }
    }

    pub fn geometry(&self) -> CanvasGeometry {
        CanvasGeometry::new(self.pixels.width(), self.pixels.height())
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.pixels
    }

    /// `true` when no pixel is selected (all black).
    pub fn is_blank(&self) -> bool {
        self.pixels.as_raw().iter().all(|&v| v == 0)
    }

    /// Number of pixels with any paint coverage.
    pub fn painted_pixel_count(&self) -> usize {
        self.pixels.as_raw().iter().filter(|&&v| v > 0).count()
    }

    /// Encode as PNG (the persisted and downloaded `mask.png`).
    pub fn to_png(&self) -> crate::error::Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.pixels.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    /// SHA-256 of `width || height || pixels`, lowercase hex.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.pixels.width().to_le_bytes());
        hasher.update(self.pixels.height().to_le_bytes());
        hasher.update(self.pixels.as_raw());
        hex::encode(hasher.finalize())
    }
}
