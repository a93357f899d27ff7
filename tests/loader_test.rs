// Image loading: bytes -> decoded, normalized SourceImage

mod common;

use inpaint_mask::error::{FailureCategory, InpaintError};
use inpaint_mask::source::geometry::{CanvasBounds, CanvasGeometry};
use inpaint_mask::source::loader::{load_source, load_source_file};

use common::png_bytes;

#[test]
fn test_load_small_image_keeps_natural_size() {
    let bytes = png_bytes(64, 48, [10, 20, 30, 255]);
    let source = load_source(bytes.clone(), CanvasBounds::default()).expect("decode png");

    assert_eq!(source.natural_size(), (64, 48));
    assert_eq!(source.geometry(), CanvasGeometry::new(64, 48));
    assert_eq!(source.normalized().dimensions(), (64, 48));
    assert_eq!(source.raw_bytes(), bytes.as_slice());
    assert_eq!(source.normalized().get_pixel(3, 3).0, [10, 20, 30, 255]);
}

#[test]
fn test_load_oversized_image_is_resized_to_geometry() {
    let bytes = png_bytes(1600, 900, [200, 100, 50, 255]);
    let source = load_source(bytes, CanvasBounds::default()).expect("decode png");

    assert_eq!(source.natural_size(), (1600, 900));
    assert_eq!(source.geometry(), CanvasGeometry::new(800, 450));
    assert_eq!(source.normalized().dimensions(), (800, 450));
    // solid colour survives resampling
    assert_eq!(source.normalized().get_pixel(400, 225).0, [200, 100, 50, 255]);
}

#[test]
fn test_normalized_png_round_trips_dimensions() {
    let bytes = png_bytes(500, 1200, [0, 0, 255, 255]);
    let source = load_source(bytes, CanvasBounds::default()).expect("decode png");

    let png = source.normalized_png().expect("encode png");
    let decoded = image::load_from_memory(&png).expect("decode normalized png");
    assert_eq!((decoded.width(), decoded.height()), (250, 600));
}

#[test]
fn test_load_corrupt_bytes_is_decode_failure() {
    let err = load_source(b"definitely not an image".to_vec(), CanvasBounds::default())
        .expect_err("garbage must not decode");
    assert!(matches!(err, InpaintError::DecodeError(_)), "got {err:?}");
    assert_eq!(err.category(), FailureCategory::Decode);
}

#[test]
fn test_load_truncated_png_is_decode_failure() {
    let mut bytes = png_bytes(32, 32, [1, 2, 3, 255]);
    bytes.truncate(bytes.len() / 2);
    let err = load_source(bytes, CanvasBounds::default()).expect_err("truncated png");
    assert_eq!(err.category(), FailureCategory::Decode);
}

#[test]
fn test_load_source_file_reads_from_disk() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("photo.png");
    std::fs::write(&path, png_bytes(900, 300, [9, 9, 9, 255])).expect("write fixture");

    let source = load_source_file(&path, CanvasBounds::default()).expect("load file");
    assert_eq!(source.geometry(), CanvasGeometry::new(800, 267));
}

#[test]
fn test_load_source_file_missing_is_io_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = load_source_file(&dir.path().join("missing.png"), CanvasBounds::default())
        .expect_err("missing file");
    assert!(matches!(err, InpaintError::IoError(_)), "got {err:?}");
}

// ============================================================
// EXIF orientation
// ============================================================

/// Left half red, right half blue, encoded as JPEG with an EXIF APP1
/// segment carrying `orientation` right after SOI.
fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
    use image::codecs::jpeg::JpegEncoder;
    use image::{Rgb, RgbImage};

    let img = RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb([220, 20, 20])
        } else {
            Rgb([20, 20, 220])
        }
    });
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, 90)
        .encode_image(&img)
        .expect("encode test jpeg");

    // Exif header + big-endian TIFF with a single Orientation (0x0112) entry
    let mut exif = b"Exif\0\0MM\0\x2a\0\0\0\x08".to_vec();
    exif.extend_from_slice(&[0x00, 0x01]);
    exif.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
    exif.extend_from_slice(&orientation.to_be_bytes());
    exif.extend_from_slice(&[0x00, 0x00]);
    exif.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

    let mut app1 = vec![0xFF, 0xE1];
    app1.extend_from_slice(&((exif.len() + 2) as u16).to_be_bytes());
    app1.extend_from_slice(&exif);

    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&app1);
    out.extend_from_slice(&jpeg[2..]);
    out
}

#[test]
fn test_load_applies_exif_rotation_before_fitting() {
    let source = load_source(jpeg_with_orientation(1600, 900, 6), CanvasBounds::default())
        .expect("load rotated jpeg");

    assert_eq!(source.natural_size(), (900, 1600));
    assert_eq!(source.geometry(), CanvasGeometry::new(338, 600));
    assert_eq!(source.normalized().dimensions(), (338, 600));

    // rotated 90° clockwise: the red left half ends up on top
    let top = source.normalized().get_pixel(169, 20);
    let bottom = source.normalized().get_pixel(169, 580);
    assert!(top[0] > 150 && top[2] < 100, "top: {top:?}");
    assert!(bottom[2] > 150 && bottom[0] < 100, "bottom: {bottom:?}");
}

#[test]
fn test_load_jpeg_without_rotation_keeps_orientation() {
    let source = load_source(jpeg_with_orientation(1600, 900, 1), CanvasBounds::default())
        .expect("load jpeg");
    assert_eq!(source.natural_size(), (1600, 900));
    assert_eq!(source.geometry(), CanvasGeometry::new(800, 450));
}
