// 塗りレイヤー → 黒背景に合成した単一チャンネルのマスク

use image::{DynamicImage, Rgba, RgbaImage, imageops};

use super::MaskImage;
use crate::annotation::PaintLayerSource;

/// Opaque fill under the paint layer.
const MASK_BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Rasterize the current paint layer of `source` into a fresh mask.
///
/// Steps:
/// 1. Allocate a buffer of the source geometry
/// 2. Fill it opaque black
/// 3. Composite only the exported paint layer on top
///
/// The display background and the photo underneath never take part, so
/// the result depends on the strokes alone. No strokes gives an all-black
/// mask. Every call starts from scratch; identical stroke histories give
/// pixel-identical masks.
pub fn rasterize<S: PaintLayerSource + ?Sized>(source: &S) -> MaskImage {
    let geometry = source.geometry();
    let mut canvas = RgbaImage::from_pixel(geometry.width, geometry.height, MASK_BACKGROUND);

    let layer = source.export_paint_layer();
    imageops::overlay(&mut canvas, &layer, 0, 0);

    let gray = DynamicImage::ImageRgba8(canvas).to_luma8();
    tracing::debug!(
        width = geometry.width,
        height = geometry.height,
        "mask rasterized"
    );
    MaskImage::from_gray(gray)
}
