// Canvas fitting: natural size -> bounded canvas geometry

use inpaint_mask::source::geometry::{CanvasBounds, CanvasGeometry, MAX_HEIGHT, MAX_WIDTH};

fn fit(w: u32, h: u32) -> CanvasGeometry {
    CanvasGeometry::fit(w, h, CanvasBounds::default())
}

// ============================================================
// 1. Worked examples
// ============================================================

#[test]
fn test_fit_wide_image_width_clamp_only() {
    // scale 0.5; the width clamp alone already satisfies the height bound
    assert_eq!(fit(1600, 900), CanvasGeometry::new(800, 450));
}

#[test]
fn test_fit_tall_image_height_clamp_only() {
    // scale = 600 / 1200 = 0.5
    assert_eq!(fit(500, 1200), CanvasGeometry::new(250, 600));
}

#[test]
fn test_fit_wide_then_still_too_tall() {
    // 1000x1000 -> 800x800 -> 600x600
    assert_eq!(fit(1000, 1000), CanvasGeometry::new(600, 600));
    // 1200x1000 -> 800x666.67 -> 720x600
    assert_eq!(fit(1200, 1000), CanvasGeometry::new(720, 600));
}

#[test]
fn test_fit_rounds_to_nearest_pixel() {
    // 1000x333 -> 800x266.4 -> 266
    assert_eq!(fit(1000, 333), CanvasGeometry::new(800, 266));
    // 1000x334 -> 800x267.2 -> 267
    assert_eq!(fit(1000, 334), CanvasGeometry::new(800, 267));
}

// ============================================================
// 2. No upscaling
// ============================================================

#[test]
fn test_fit_small_images_keep_natural_size() {
    for &(w, h) in &[(1, 1), (320, 240), (800, 600), (799, 1), (1, 600), (640, 480)] {
        assert_eq!(fit(w, h), CanvasGeometry::new(w, h), "{w}x{h}");
    }
}

// ============================================================
// 3. Bounds and aspect ratio over a sweep of oversized inputs
// ============================================================

#[test]
fn test_fit_oversized_within_bounds_and_aspect_preserved() {
    let bounds = CanvasBounds::default();
    let mut checked = 0;
    for w in (100..=6000).step_by(137) {
        for h in (100..=6000).step_by(149) {
            if w <= MAX_WIDTH && h <= MAX_HEIGHT {
                continue;
            }
            let g = CanvasGeometry::fit(w, h, bounds);
            assert!(g.fits_within(bounds), "{w}x{h} -> {g:?}");

            // Rounding moves each side by at most half a pixel.
            let natural = f64::from(w) / f64::from(h);
            let lo = (f64::from(g.width) - 0.5) / (f64::from(g.height) + 0.5);
            let hi = (f64::from(g.width) + 0.5) / (f64::from(g.height) - 0.5);
            assert!(
                natural >= lo - 1e-9 && natural <= hi + 1e-9,
                "{w}x{h} -> {g:?}: aspect {natural} outside [{lo}, {hi}]"
            );

            // One side always touches its bound.
            assert!(g.width == MAX_WIDTH || g.height == MAX_HEIGHT, "{w}x{h} -> {g:?}");
            checked += 1;
        }
    }
    assert!(checked > 1000);
}

#[test]
fn test_fit_extreme_sliver_keeps_one_pixel() {
    let g = fit(10_000, 1);
    assert_eq!(g, CanvasGeometry::new(800, 1));
}

#[test]
fn test_fit_custom_bounds() {
    let bounds = CanvasBounds {
        max_width: 256,
        max_height: 256,
    };
    assert_eq!(
        CanvasGeometry::fit(1024, 512, bounds),
        CanvasGeometry::new(256, 128)
    );
    assert_eq!(
        CanvasGeometry::fit(512, 1024, bounds),
        CanvasGeometry::new(128, 256)
    );
}
