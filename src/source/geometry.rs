// キャンバス寸法の算出: 自然サイズ → 上限内に収まる表示サイズ

/// Default maximum canvas width in pixels.
pub const MAX_WIDTH: u32 = 800;
/// Default maximum canvas height in pixels.
pub const MAX_HEIGHT: u32 = 600;

/// Upper bounds for the working canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasBounds {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for CanvasBounds {
    fn default() -> Self {
        CanvasBounds {
            max_width: MAX_WIDTH,
            max_height: MAX_HEIGHT,
        }
    }
}

/// Pixel dimensions of the annotation canvas and of every raster derived
/// from it (normalized source, paint layer, mask).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasGeometry {
    pub width: u32,
    pub height: u32,
}

impl CanvasGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Fit a natural image size into `bounds`, preserving aspect ratio.
    ///
    /// Width is clamped first; the height clamp then applies to the
    /// already width-adjusted height, so an image that is still too tall
    /// gets a second proportional shrink. Both results are rounded to the
    /// nearest pixel (never below 1). Images already inside the bounds keep
    /// their natural size.
    pub fn fit(natural_width: u32, natural_height: u32, bounds: CanvasBounds) -> Self {
        let max_w = f64::from(bounds.max_width);
        let max_h = f64::from(bounds.max_height);
        let mut w = f64::from(natural_width);
        let mut h = f64::from(natural_height);

        if w > max_w {
            h = max_w * h / w;
            w = max_w;
        }
        if h > max_h {
            w = max_h * w / h;
            h = max_h;
        }

        Self {
            width: round_dimension(w),
            height: round_dimension(h),
        }
    }

    /// Number of pixels covered by this geometry.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    pub fn fits_within(&self, bounds: CanvasBounds) -> bool {
        self.width <= bounds.max_width && self.height <= bounds.max_height
    }
}

/// Round half-up to the nearest pixel, keeping at least one pixel.
fn round_dimension(v: f64) -> u32 {
    ((v + 0.5).floor() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_dimension_half_rounds_up() {
        assert_eq!(round_dimension(449.5), 450);
        assert_eq!(round_dimension(449.49), 449);
        assert_eq!(round_dimension(0.08), 1);
    }

    #[test]
    fn test_fit_exact_bounds_unchanged() {
        let g = CanvasGeometry::fit(800, 600, CanvasBounds::default());
        assert_eq!(g, CanvasGeometry::new(800, 600));
    }

    #[test]
    fn test_fit_both_clamps_apply() {
        // 2000x2000 -> width clamp 800x800 -> height clamp 600x600
        let g = CanvasGeometry::fit(2000, 2000, CanvasBounds::default());
        assert_eq!(g, CanvasGeometry::new(600, 600));
    }
}
