// 入力画像のデコードと正規化: bytes → SourceImage

use std::io::Cursor;
use std::path::Path;

use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};

use super::SourceImage;
use super::geometry::{CanvasBounds, CanvasGeometry};
use crate::error::InpaintError;

/// Decode `bytes` and fit the result into `bounds`.
///
/// EXIF orientation is applied before fitting, so the natural size is the
/// size of the upright image.
///
/// Fails with [`InpaintError::DecodeError`] when the bytes are not an
/// image the decoder understands. Nothing outside the returned value is
/// touched, so a failed load cannot disturb an existing session.
pub fn load_source(bytes: Vec<u8>, bounds: CanvasBounds) -> crate::error::Result<SourceImage> {
    let decoded = decode_upright(&bytes)?;

    let (natural_width, natural_height) = (decoded.width(), decoded.height());
    if natural_width == 0 || natural_height == 0 {
        return Err(InpaintError::decode(format!(
            "Image has zero dimension: {natural_width}x{natural_height}"
        )));
    }

    let geometry = CanvasGeometry::fit(natural_width, natural_height, bounds);
    let normalized = if geometry.width == natural_width && geometry.height == natural_height {
        decoded.to_rgba8()
    } else {
        decoded
            .resize_exact(geometry.width, geometry.height, FilterType::Triangle)
            .to_rgba8()
    };

    tracing::debug!(
        natural_width,
        natural_height,
        width = geometry.width,
        height = geometry.height,
        "normalized source image"
    );

    Ok(SourceImage {
        raw: bytes,
        natural_width,
        natural_height,
        geometry,
        normalized,
    })
}

fn decode_upright(bytes: &[u8]) -> crate::error::Result<DynamicImage> {
    let decode_err = |e: &dyn std::fmt::Display| {
        InpaintError::decode(format!("Failed to decode image: {e}"))
    };

    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| decode_err(&e))?
        .into_decoder()
        .map_err(|e| decode_err(&e))?;
    // 壊れた EXIF は無視して画素データをそのまま使う
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);

    let mut image = DynamicImage::from_decoder(decoder).map_err(|e| decode_err(&e))?;
    if orientation != Orientation::NoTransforms {
        tracing::debug!(?orientation, "applying EXIF orientation");
        image.apply_orientation(orientation);
    }
    Ok(image)
}

/// Read an image file from disk and normalize it.
pub fn load_source_file(path: &Path, bounds: CanvasBounds) -> crate::error::Result<SourceImage> {
    let bytes = std::fs::read(path)?;
    load_source(bytes, bounds)
}
